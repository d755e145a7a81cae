//! Consumption-based quick quotes.
//!
//! Sizes a system from a household's monthly consumption (or its electricity
//! bill), builds a synthetic kit through a [`ComponentSelector`] and prices it
//! with the regular proposal calculator.

use serde::{Deserialize, Serialize};

use crate::catalog::{InverterEntry, ModuleEntry};
use crate::error::QuickQuoteError;
use crate::policy::{PolicyOverrides, PricingPolicy};
use crate::pricing::{Proposal, ProposalCalculator};
use crate::selector::{ComponentSelector, CostBreakdown, SelectedSystem};

/// Quick-quote input. At least one of consumption and bill value is required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuickQuoteRequest {
    /// Monthly consumption (kWh). Wins over `bill_value` when both are set.
    pub monthly_consumption_kwh: Option<f64>,
    /// Monthly electricity bill; converted at the tariff.
    pub bill_value: Option<f64>,
    pub hsp: Option<f64>,
    pub tariff: Option<f64>,
    pub simultaneity_factor: Option<f64>,
}

impl QuickQuoteRequest {
    fn overrides(&self) -> PolicyOverrides {
        PolicyOverrides {
            hsp: self.hsp,
            tariff: self.tariff,
            simultaneity_factor: self.simultaneity_factor,
            ..PolicyOverrides::default()
        }
    }
}

/// Sizing figures reported next to the proposal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuickQuoteInfo {
    pub original_consumption_kwh: f64,
    pub bill_value_estimated: f64,
    pub power_required: f64,
    pub power_provided: f64,
    pub oversizing_percent: f64,
}

/// Priced synthetic kit with its sizing and component details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickQuote {
    #[serde(flatten)]
    pub proposal: Proposal,
    pub quick_quote_info: QuickQuoteInfo,
    pub cost_breakdown: CostBreakdown,
    pub components_selected: SelectedComponents,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedComponents {
    pub module: ModuleEntry,
    pub inverter: InverterEntry,
}

/// Power (kWp) needed to cover the simultaneous share of `consumption_kwh`.
///
/// `consumption * simultaneity / (hsp * days_per_month * efficiency)`
pub fn required_power(consumption_kwh: f64, policy: &PricingPolicy) -> f64 {
    let adjusted = consumption_kwh * (policy.simultaneity_factor / 100.0);
    adjusted / (policy.hsp * policy.days_per_month * (policy.system_efficiency / 100.0))
}

/// Percent by which `provided` exceeds `required`, never below zero.
fn oversizing_percent(provided: f64, required: f64) -> f64 {
    let ratio = provided / required;
    if ratio > 1.0 {
        (ratio - 1.0) * 100.0
    } else {
        0.0
    }
}

/// Builds and prices a kit for the household described by `request`.
///
/// # Errors
///
/// Returns `QuickQuoteError` if no consumption can be derived, the selector
/// cannot build a kit, or the calculator rejects it.
pub fn generate_quick_quote<S: ComponentSelector + ?Sized>(
    selector: &S,
    calculator: &ProposalCalculator,
    request: &QuickQuoteRequest,
) -> Result<QuickQuote, QuickQuoteError> {
    let overrides = request.overrides();
    let policy = calculator.effective_policy(Some(&overrides))?;

    let consumption = match (request.monthly_consumption_kwh, request.bill_value) {
        (Some(kwh), _) => kwh,
        (None, Some(bill)) => bill / policy.tariff,
        (None, None) => return Err(QuickQuoteError::MissingConsumption),
    };
    if !(consumption.is_finite() && consumption > 0.0) {
        return Err(QuickQuoteError::InvalidConsumption(consumption));
    }

    let power_required = required_power(consumption, &policy);
    tracing::info!(consumption_kwh = consumption, power_required, "sizing quick quote");

    let SelectedSystem {
        kit,
        cost_breakdown,
        module,
        inverter,
    } = selector.select(power_required)?;
    let proposal = calculator.calculate(&kit, Some(&overrides))?;

    let quick_quote_info = QuickQuoteInfo {
        original_consumption_kwh: consumption,
        bill_value_estimated: request.bill_value.unwrap_or(consumption * policy.tariff),
        power_required,
        power_provided: kit.power_kwp,
        oversizing_percent: oversizing_percent(kit.power_kwp, power_required),
    };

    tracing::info!(
        final_price = proposal.pricing.final_price,
        payback = %proposal.payback(),
        "quick quote generated"
    );

    Ok(QuickQuote {
        proposal,
        quick_quote_info,
        cost_breakdown,
        components_selected: SelectedComponents { module, inverter },
    })
}
