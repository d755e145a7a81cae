//! Payment-plan price derivation.

use serde::Serialize;

use crate::policy::PricingPolicy;

/// Installments of the financed plan.
pub const FINANCING_INSTALLMENTS: u32 = 18;
/// Installments of the no-interest plan.
pub const NO_INTEREST_INSTALLMENTS: u32 = 12;

/// Every price offered for one final price.
///
/// Values are unrounded; presentation rounds for display. For a positive
/// final price and non-negative rates (cash discount at most 100 %):
/// `cash_price <= final_price <= price_no_discount <= crossed_price`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaymentPlans {
    pub final_price: f64,
    /// Discounted pay-in-full price.
    pub cash_price: f64,
    /// Reference price of the no-interest installment plan.
    pub price_no_discount: f64,
    /// Anchor price shown struck through.
    pub crossed_price: f64,
    /// Total paid under the financed plan.
    pub financing_total: f64,
    pub financing_installment: f64,
    pub installment_12x: f64,
    pub discount_cash_percent: f64,
    pub financing_rate_percent: f64,
}

/// Expands `final_price` into the payment plans defined by `policy`.
pub fn structure_pricing(final_price: f64, policy: &PricingPolicy) -> PaymentPlans {
    let price_no_discount = final_price * (1.0 + policy.markup_no_discount / 100.0);
    let financing_total = final_price * (1.0 + policy.financing_rate / 100.0);

    PaymentPlans {
        final_price,
        cash_price: final_price * (1.0 - policy.discount_cash / 100.0),
        price_no_discount,
        crossed_price: price_no_discount * (1.0 + policy.markup_crossed_price / 100.0),
        financing_total,
        financing_installment: financing_total / f64::from(FINANCING_INSTALLMENTS),
        installment_12x: price_no_discount / f64::from(NO_INTEREST_INSTALLMENTS),
        discount_cash_percent: policy.discount_cash,
        financing_rate_percent: policy.financing_rate,
    }
}
