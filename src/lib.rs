//! Solar kit pricing engine.
//!
//! Prices photovoltaic kits from their equipment cost: a target margin gives
//! the initial price, which is then nudged so the customer's payback lands
//! inside the configured window. Kits can be ranked against each other, and a
//! kit can be sized and assembled from a component catalog for a quick quote.

pub mod catalog;
pub mod error;
pub mod io;
pub mod kit;
pub mod policy;
/// Savings, payback, payment plans and the proposal calculator.
pub mod pricing;
pub mod quick_quote;
mod report;
pub mod selector;

#[cfg(feature = "api")]
pub mod api;
