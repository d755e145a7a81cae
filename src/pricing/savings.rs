//! Monthly generation and savings estimates.

use serde::Serialize;

use crate::policy::PricingPolicy;

/// Consumption-adjusted generation and the savings it is billed at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsEstimate {
    /// Generation counted as savings (kWh per month).
    pub monthly_generation_kwh: f64,
    /// Generation valued at the policy tariff (currency per month).
    pub monthly_savings: f64,
}

/// Gross monthly generation (kWh) before the consumption factor.
///
/// `power * hsp * days_per_month * efficiency`
pub fn gross_monthly_generation(power_kwp: f64, policy: &PricingPolicy) -> f64 {
    power_kwp * policy.hsp * policy.days_per_month * (policy.system_efficiency / 100.0)
}

/// Estimates the monthly saving of a system of `power_kwp`.
///
/// Non-positive power yields a non-positive saving; callers that need a
/// meaningful figure validate power first.
///
/// # Examples
///
/// ```
/// use solar_quote::policy::PricingPolicy;
/// use solar_quote::pricing::estimate_savings;
///
/// let estimate = estimate_savings(10.0, &PricingPolicy::default());
/// assert!(estimate.monthly_savings > 0.0);
/// ```
pub fn estimate_savings(power_kwp: f64, policy: &PricingPolicy) -> SavingsEstimate {
    let monthly_generation_kwh =
        gross_monthly_generation(power_kwp, policy) * (policy.consumption_factor / 100.0);
    SavingsEstimate {
        monthly_generation_kwh,
        monthly_savings: monthly_generation_kwh * policy.tariff,
    }
}
