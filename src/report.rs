//! Human-readable proposal summaries for the command line.
//!
//! Rounding happens here and in the CSV export only; the engine keeps full
//! precision.

use std::fmt;

use crate::pricing::{Proposal, RankedProposal};
use crate::quick_quote::QuickQuote;

impl fmt::Display for Proposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kit = &self.kit_info;
        let calc = &self.calculations;
        let pricing = &self.pricing;

        writeln!(f, "{} ({:.2} kWp)", kit.name, kit.power_kwp)?;
        if !kit.modules_desc.is_empty() {
            writeln!(f, "  Modules:               {}", kit.modules_desc)?;
        }
        if !kit.inverter_desc.is_empty() {
            writeln!(f, "  Inverter:              {}", kit.inverter_desc)?;
        }
        writeln!(f, "  Total cost:            {:.2}", self.costs.total_cost)?;
        writeln!(f, "  Monthly generation:    {:.1} kWh", calc.monthly_generation)?;
        writeln!(f, "  Monthly savings:       {:.2}", calc.monthly_savings)?;
        writeln!(f, "  Payback:               {}", calc.final_payback_months)?;
        writeln!(f, "  Final margin:          {:.1}%", calc.final_margin_percent)?;
        writeln!(f, "  Final price:           {:.2}", pricing.final_price)?;
        writeln!(
            f,
            "  Cash price:            {:.2} (-{:.1}%)",
            pricing.cash_price, pricing.discount_cash_percent
        )?;
        writeln!(
            f,
            "  12x no interest:       {:.2} ({:.2} total)",
            pricing.installment_12x, pricing.price_no_discount
        )?;
        writeln!(
            f,
            "  18x financed:          {:.2} ({:.2} total)",
            pricing.financing_installment, pricing.financing_total
        )?;
        write!(f, "  Anchor price:          {:.2}", pricing.crossed_price)
    }
}

impl fmt::Display for RankedProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_recommended {
            writeln!(f, "#{} [recommended]", self.rank)?;
        } else {
            writeln!(f, "#{}", self.rank)?;
        }
        write!(f, "{}", self.proposal)
    }
}

impl fmt::Display for QuickQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = &self.quick_quote_info;
        writeln!(f, "--- Quick quote ---")?;
        writeln!(f, "Consumption:             {:.0} kWh/month", info.original_consumption_kwh)?;
        writeln!(f, "Estimated bill:          {:.2}", info.bill_value_estimated)?;
        writeln!(
            f,
            "Power required/provided: {:.2} / {:.2} kWp ({:+.1}%)",
            info.power_required, info.power_provided, info.oversizing_percent
        )?;
        write!(f, "{}", self.proposal)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::catalog::tests::SAMPLE_CATALOG;
    use crate::kit::KitSpecification;
    use crate::policy::PolicyOverrides;
    use crate::pricing::{ProposalCalculator, compare_systems};
    use crate::quick_quote::{QuickQuoteRequest, generate_quick_quote};

    #[test]
    fn summary_rounds_for_display() {
        let proposal = ProposalCalculator::default()
            .calculate(&KitSpecification::sample(), None)
            .expect("sample kit is valid");
        let text = proposal.to_string();
        assert!(text.contains("Final price:           70000.00"));
        assert!(text.contains("Payback:               16.3 months"));
    }

    #[test]
    fn recommended_marker_only_on_first() {
        let kits = vec![KitSpecification::sample(), KitSpecification::sample()];
        let ranked = compare_systems(&ProposalCalculator::default(), &kits, None)
            .expect("kits are valid");
        assert!(ranked[0].to_string().starts_with("#1 [recommended]"));
        assert!(ranked[1].to_string().starts_with("#2\n"));
    }

    #[test]
    fn unbounded_payback_shown_as_never() {
        let overrides = PolicyOverrides {
            tariff: Some(0.0),
            ..PolicyOverrides::default()
        };
        let proposal = ProposalCalculator::default()
            .calculate(&KitSpecification::sample(), Some(&overrides))
            .expect("sample kit is valid");
        assert!(proposal.to_string().contains("Payback:               never"));
    }

    #[test]
    fn oversizing_carries_its_own_sign() {
        let catalog = Catalog::from_json_str(SAMPLE_CATALOG).unwrap();
        let request = QuickQuoteRequest {
            monthly_consumption_kwh: Some(3000.0),
            ..QuickQuoteRequest::default()
        };
        let mut quote =
            generate_quick_quote(&catalog, &ProposalCalculator::default(), &request).unwrap();

        quote.quick_quote_info.oversizing_percent = 0.0;
        let text = quote.to_string();
        assert!(text.contains("kWp (+0.0%)"), "{text}");
        assert!(!text.contains("+-"));
    }
}
