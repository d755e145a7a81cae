//! Property tests for the pricing invariants.

mod common;

use proptest::prelude::*;

use solar_quote::policy::{PolicyOverrides, PricingPolicy};
use solar_quote::pricing::{
    Payback, PaybackAdjustment, ProposalCalculator, adjust_price_for_payback, compare_systems,
    estimate_savings, structure_pricing,
};

proptest! {
    #[test]
    fn savings_grow_with_power(low in 0.1f64..500.0, bump in 0.01f64..100.0) {
        let policy = PricingPolicy::default();
        prop_assert!(
            estimate_savings(low, &policy).monthly_savings
                < estimate_savings(low + bump, &policy).monthly_savings
        );
    }

    #[test]
    fn savings_grow_with_sun_and_tariff(
        power in 0.1f64..500.0,
        hsp in 1.0f64..8.0,
        tariff in 0.1f64..3.0,
        bump in 0.01f64..2.0,
    ) {
        let base = PricingPolicy { hsp, tariff, ..PricingPolicy::default() };
        let sunnier = PricingPolicy { hsp: hsp + bump, ..base };
        let pricier = PricingPolicy { tariff: tariff + bump, ..base };
        let savings = |policy: &PricingPolicy| estimate_savings(power, policy).monthly_savings;
        prop_assert!(savings(&base) < savings(&sunnier));
        prop_assert!(savings(&base) < savings(&pricier));
    }

    #[test]
    fn payback_lands_inside_window(
        initial in 1.0f64..1e7,
        savings in 1.0f64..1e5,
        min in 0.0f64..60.0,
        width in 0.0f64..60.0,
    ) {
        let policy = PricingPolicy {
            payback_min: min,
            payback_max: min + width,
            ..PricingPolicy::default()
        };
        let adjusted = adjust_price_for_payback(initial, savings, &policy);
        let months = adjusted.payback.months();
        prop_assert!(months.is_some());
        let months = months.unwrap_or_default();
        prop_assert!(months >= policy.payback_min && months <= policy.payback_max);

        match adjusted.adjustment {
            PaybackAdjustment::Accepted => prop_assert_eq!(adjusted.final_price, initial),
            PaybackAdjustment::RaisedToMinimum => prop_assert!(adjusted.final_price >= initial),
            PaybackAdjustment::LoweredToMaximum => prop_assert!(adjusted.final_price <= initial),
            PaybackAdjustment::NoPositiveReturn => prop_assert!(false, "savings are positive"),
        }
    }

    #[test]
    fn no_savings_keeps_initial_price(initial in 1.0f64..1e7, savings in -1e4f64..=0.0) {
        let adjusted = adjust_price_for_payback(initial, savings, &PricingPolicy::default());
        prop_assert_eq!(adjusted.final_price, initial);
        prop_assert_eq!(adjusted.payback, Payback::Unbounded);
    }

    #[test]
    fn payment_plans_are_ordered(
        final_price in 1.0f64..1e7,
        discount in 0.0f64..=100.0,
        markup in 0.0f64..100.0,
        crossed in 0.0f64..100.0,
    ) {
        let policy = PricingPolicy {
            discount_cash: discount,
            markup_no_discount: markup,
            markup_crossed_price: crossed,
            ..PricingPolicy::default()
        };
        let plans = structure_pricing(final_price, &policy);
        prop_assert!(plans.cash_price <= plans.final_price);
        prop_assert!(plans.final_price <= plans.price_no_discount);
        prop_assert!(plans.price_no_discount <= plans.crossed_price);
    }

    #[test]
    fn ranking_ignores_input_order(
        specs in prop::collection::vec((1_000.0f64..200_000.0, 1.0f64..100.0), 1..12),
        tariff in prop_oneof![Just(0.0), 0.5f64..2.0],
    ) {
        let kits: Vec<_> = specs
            .iter()
            .enumerate()
            .map(|(i, &(cost, power))| common::kit(&format!("kit {i}"), cost, power))
            .collect();
        let mut reversed = kits.clone();
        reversed.reverse();

        let overrides = PolicyOverrides { tariff: Some(tariff), ..PolicyOverrides::default() };
        let calculator = ProposalCalculator::default();
        let forward = compare_systems(&calculator, &kits, Some(&overrides));
        let backward = compare_systems(&calculator, &reversed, Some(&overrides));
        prop_assert!(forward.is_ok() && backward.is_ok());
        let (forward, backward) = (forward.unwrap_or_default(), backward.unwrap_or_default());

        let paybacks = |ranked: &[solar_quote::pricing::RankedProposal]| {
            ranked.iter().map(|r| r.proposal.payback()).collect::<Vec<_>>()
        };
        prop_assert_eq!(paybacks(&forward), paybacks(&backward));

        for pair in forward.windows(2) {
            prop_assert!(pair[0].proposal.payback().rank_cmp(&pair[1].proposal.payback()).is_le());
        }
        for (i, r) in forward.iter().enumerate() {
            prop_assert_eq!(r.rank, i + 1);
            prop_assert_eq!(r.is_recommended, i == 0);
        }
    }
}
