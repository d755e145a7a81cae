//! Payback window clamp.
//!
//! The final price is forced so that the realized payback lands inside
//! `[payback_min, payback_max]`. This is a clamp, not a search: the resulting
//! payback is exactly one bound, or the unmodified initial payback when that
//! one already lies inside the window.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::policy::PricingPolicy;

/// Months needed for cumulative savings to equal the investment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payback {
    /// Finite payback in months.
    Months(f64),
    /// No positive monthly return: the investment is never recovered.
    Unbounded,
}

impl Payback {
    /// Computes `investment / monthly_savings`, or `Unbounded` when savings
    /// are not a positive number.
    pub fn of(investment: f64, monthly_savings: f64) -> Self {
        if monthly_savings.is_finite() && monthly_savings > 0.0 {
            Self::Months(investment / monthly_savings)
        } else {
            Self::Unbounded
        }
    }

    /// Finite months, if any.
    pub fn months(self) -> Option<f64> {
        match self {
            Self::Months(months) => Some(months),
            Self::Unbounded => None,
        }
    }

    /// Total order used for ranking: shorter first, `Unbounded` last.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Months(a), Self::Months(b)) => a.total_cmp(b),
            (Self::Months(_), Self::Unbounded) => Ordering::Less,
            (Self::Unbounded, Self::Months(_)) => Ordering::Greater,
            (Self::Unbounded, Self::Unbounded) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Months(months) => write!(f, "{months:.1} months"),
            Self::Unbounded => write!(f, "never"),
        }
    }
}

/// Serialized as a number of months, or `null` when unbounded.
impl Serialize for Payback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.months().serialize(serializer)
    }
}

/// What the adjuster did to the initial price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackAdjustment {
    /// Initial payback already inside the window.
    Accepted,
    /// Payback was shorter than `payback_min`; price raised.
    RaisedToMinimum,
    /// Payback was longer than `payback_max`; price lowered.
    LoweredToMaximum,
    /// Degenerate case: no positive return, initial price kept.
    NoPositiveReturn,
}

/// Final price and its realized payback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjustedPrice {
    pub final_price: f64,
    pub payback: Payback,
    pub adjustment: PaybackAdjustment,
}

/// Clamps the payback of `initial_price` into the policy window.
///
/// When `monthly_savings` is not positive the payback is
/// [`Payback::Unbounded`], the clamp does not apply and `initial_price` is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use solar_quote::policy::PricingPolicy;
/// use solar_quote::pricing::{Payback, adjust_price_for_payback};
///
/// let policy = PricingPolicy::default(); // window [16, 20]
/// let adjusted = adjust_price_for_payback(10_000.0, 1_000.0, &policy);
/// assert_eq!(adjusted.final_price, 16_000.0);
/// assert_eq!(adjusted.payback, Payback::Months(16.0));
/// ```
pub fn adjust_price_for_payback(
    initial_price: f64,
    monthly_savings: f64,
    policy: &PricingPolicy,
) -> AdjustedPrice {
    let Payback::Months(initial_payback) = Payback::of(initial_price, monthly_savings) else {
        return AdjustedPrice {
            final_price: initial_price,
            payback: Payback::Unbounded,
            adjustment: PaybackAdjustment::NoPositiveReturn,
        };
    };

    if initial_payback < policy.payback_min {
        AdjustedPrice {
            final_price: monthly_savings * policy.payback_min,
            payback: Payback::Months(policy.payback_min),
            adjustment: PaybackAdjustment::RaisedToMinimum,
        }
    } else if initial_payback > policy.payback_max {
        AdjustedPrice {
            final_price: monthly_savings * policy.payback_max,
            payback: Payback::Months(policy.payback_max),
            adjustment: PaybackAdjustment::LoweredToMaximum,
        }
    } else {
        AdjustedPrice {
            final_price: initial_price,
            payback: Payback::Months(initial_payback),
            adjustment: PaybackAdjustment::Accepted,
        }
    }
}
