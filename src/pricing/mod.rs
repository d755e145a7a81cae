/// Policy-driven proposal calculation for a single kit.
pub mod calculator;
/// Batch comparison and ranking of proposals.
pub mod compare;
/// Payback window clamp.
pub mod payback;
/// Monthly generation and savings estimates.
pub mod savings;
/// Payment-plan price derivation.
pub mod structure;

pub use calculator::{
    CalculationBlock, CostBlock, Proposal, ProposalCalculator, calculate_with_policy,
};
pub use compare::{RankedProposal, compare_systems};
pub use payback::{AdjustedPrice, Payback, PaybackAdjustment, adjust_price_for_payback};
pub use savings::{SavingsEstimate, estimate_savings, gross_monthly_generation};
pub use structure::{PaymentPlans, structure_pricing};
