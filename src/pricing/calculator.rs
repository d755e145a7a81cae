//! Policy-driven proposal calculation for a single kit.

use serde::Serialize;

use crate::error::ProposalError;
use crate::kit::KitSpecification;
use crate::policy::{PolicyOverrides, PricingPolicy};

use super::payback::{Payback, PaybackAdjustment, adjust_price_for_payback};
use super::savings::{estimate_savings, gross_monthly_generation};
use super::structure::{PaymentPlans, structure_pricing};

/// Cost side of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBlock {
    pub equipment_cost: f64,
    /// Freight charged on top of equipment (zero when included).
    pub freight_cost: f64,
    pub total_cost: f64,
}

/// Intermediate and derived figures of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationBlock {
    /// Total cost plus the target margin.
    pub initial_price: f64,
    pub monthly_savings: f64,
    /// Gross generation estimate (kWh/month), before the consumption factor.
    pub monthly_generation: f64,
    /// Generation counted as savings (kWh/month).
    pub billed_generation: f64,
    /// Realized payback; `null` when there is no positive return.
    pub final_payback_months: Payback,
    /// Margin after the payback clamp; may be below target or negative.
    pub final_margin_percent: f64,
    pub payback_adjustment: PaybackAdjustment,
}

/// Full pricing proposal for one kit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proposal {
    pub kit_info: KitSpecification,
    pub costs: CostBlock,
    pub calculations: CalculationBlock,
    pub pricing: PaymentPlans,
    pub parameters_used: PricingPolicy,
}

impl Proposal {
    /// Realized payback of the proposal.
    pub fn payback(&self) -> Payback {
        self.calculations.final_payback_months
    }
}

/// Computes proposals under a fixed base policy.
///
/// The base policy is read-only; per-call overrides produce a fresh snapshot,
/// so one calculator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ProposalCalculator {
    policy: PricingPolicy,
}

impl ProposalCalculator {
    /// Creates a calculator over `policy`.
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    /// Base policy used when no overrides are given.
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Policy snapshot for one call.
    ///
    /// # Errors
    ///
    /// Returns `ProposalError::InvalidPolicy` if the merged policy does not
    /// validate.
    pub fn effective_policy(
        &self,
        overrides: Option<&PolicyOverrides>,
    ) -> Result<PricingPolicy, ProposalError> {
        let policy = overrides
            .filter(|o| !o.is_empty())
            .map_or(self.policy, |o| self.policy.with_overrides(o));
        let errors = policy.validate();
        if errors.is_empty() {
            Ok(policy)
        } else {
            Err(ProposalError::InvalidPolicy(errors))
        }
    }

    /// Builds the proposal for `kit`, merging `overrides` over the base policy.
    ///
    /// # Errors
    ///
    /// Returns `ProposalError` if the kit has a non-positive power or cost, a
    /// negative freight value, or the merged policy is invalid.
    pub fn calculate(
        &self,
        kit: &KitSpecification,
        overrides: Option<&PolicyOverrides>,
    ) -> Result<Proposal, ProposalError> {
        let policy = self.effective_policy(overrides)?;
        calculate_with_policy(kit, &policy)
    }
}

/// Builds the proposal for `kit` under an already validated `policy`.
///
/// # Errors
///
/// Returns `ProposalError::InvalidKit` on a precondition violation.
pub fn calculate_with_policy(
    kit: &KitSpecification,
    policy: &PricingPolicy,
) -> Result<Proposal, ProposalError> {
    check_kit(kit)?;

    let total_cost = kit.total_cost();
    let initial_price = total_cost * (1.0 + policy.margin_target / 100.0);
    let savings = estimate_savings(kit.power_kwp, policy);
    let adjusted = adjust_price_for_payback(initial_price, savings.monthly_savings, policy);
    let pricing = structure_pricing(adjusted.final_price, policy);
    let final_margin_percent = (adjusted.final_price / total_cost - 1.0) * 100.0;

    tracing::debug!(
        kit = %kit.name,
        total_cost,
        initial_price,
        final_price = adjusted.final_price,
        monthly_savings = savings.monthly_savings,
        payback = %adjusted.payback,
        adjustment = ?adjusted.adjustment,
        "proposal computed"
    );

    Ok(Proposal {
        kit_info: kit.clone(),
        costs: CostBlock {
            equipment_cost: kit.equipment_cost,
            freight_cost: kit.freight_cost(),
            total_cost,
        },
        calculations: CalculationBlock {
            initial_price,
            monthly_savings: savings.monthly_savings,
            monthly_generation: gross_monthly_generation(kit.power_kwp, policy),
            billed_generation: savings.monthly_generation_kwh,
            final_payback_months: adjusted.payback,
            final_margin_percent,
            payback_adjustment: adjusted.adjustment,
        },
        pricing,
        parameters_used: *policy,
    })
}

fn check_kit(kit: &KitSpecification) -> Result<(), ProposalError> {
    let invalid = |field, message| ProposalError::InvalidKit {
        kit: kit.name.clone(),
        field,
        message,
    };

    if !(kit.power_kwp.is_finite() && kit.power_kwp > 0.0) {
        return Err(invalid("power_kwp", "must be a positive number"));
    }
    if !(kit.equipment_cost.is_finite() && kit.equipment_cost > 0.0) {
        return Err(invalid("equipment_cost", "must be a positive number"));
    }
    if !(kit.freight_value.is_finite() && kit.freight_value >= 0.0) {
        return Err(invalid("freight_value", "must be a non-negative number"));
    }
    Ok(())
}
