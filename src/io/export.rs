//! CSV export for ranked proposals.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::pricing::RankedProposal;

/// Column header for the comparison CSV.
const HEADER: &str = "rank,name,power_kwp,total_cost,final_price,cash_price,\
                      monthly_savings,payback_months,final_margin_percent,recommended";

/// Exports ranked proposals to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(proposals: &[RankedProposal], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(proposals, buf)
}

/// Writes ranked proposals as CSV to any writer.
///
/// Money columns carry two decimals; an unbounded payback is an empty cell.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(proposals: &[RankedProposal], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in proposals {
        let p = &r.proposal;
        let payback = p
            .payback()
            .months()
            .map(|m| format!("{m:.2}"))
            .unwrap_or_default();
        wtr.write_record(&[
            r.rank.to_string(),
            p.kit_info.name.clone(),
            format!("{:.2}", p.kit_info.power_kwp),
            format!("{:.2}", p.costs.total_cost),
            format!("{:.2}", p.pricing.final_price),
            format!("{:.2}", p.pricing.cash_price),
            format!("{:.2}", p.calculations.monthly_savings),
            payback,
            format!("{:.2}", p.calculations.final_margin_percent),
            r.is_recommended.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
