//! Solar kit pricing CLI: argument wiring, logging setup and output.

mod cli;

use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use solar_quote::catalog::Catalog;
use solar_quote::io::export::export_csv;
use solar_quote::kit::KitSpecification;
use solar_quote::policy::PricingPolicy;
use solar_quote::pricing::{ProposalCalculator, compare_systems};
use solar_quote::quick_quote::{QuickQuoteRequest, generate_quick_quote};

use crate::cli::{Args, Command, CompareArgs, QuickArgs};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let policy = args
        .policy
        .as_deref()
        .map_or_else(PricingPolicy::default, PricingPolicy::load_or_default);
    let calculator = ProposalCalculator::new(policy);

    match args.command {
        Command::Compare(compare) => run_compare(&calculator, &compare),
        Command::Quick(quick) => run_quick(&calculator, &quick),
        Command::Sample => {
            let proposal = calculator.calculate(&KitSpecification::sample(), None)?;
            println!("{proposal}");
            Ok(())
        }
        #[cfg(feature = "api")]
        Command::Serve(serve) => run_serve(calculator, &serve),
    }
}

fn run_compare(calculator: &ProposalCalculator, args: &CompareArgs) -> anyhow::Result<()> {
    let kits = read_kits(&args.kits)?;
    let ranked = compare_systems(calculator, &kits, None)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else if ranked.is_empty() {
        println!("No kits to compare.");
    } else {
        for r in &ranked {
            println!("{r}\n");
        }
    }

    if let Some(path) = &args.csv {
        export_csv(&ranked, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        tracing::info!(path = %path.display(), rows = ranked.len(), "ranking exported");
    }
    Ok(())
}

fn run_quick(calculator: &ProposalCalculator, args: &QuickArgs) -> anyhow::Result<()> {
    let catalog = Catalog::from_file(&args.catalog)?;
    let request = QuickQuoteRequest {
        monthly_consumption_kwh: args.consumption_kwh,
        bill_value: args.bill_value,
        hsp: args.hsp,
        tariff: args.tariff,
        simultaneity_factor: args.simultaneity,
    };
    let quote = generate_quick_quote(&catalog, calculator, &request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        println!("{quote}");
    }
    Ok(())
}

/// Reads a JSON array of kits.
fn read_kits(path: &Path) -> anyhow::Result<Vec<KitSpecification>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read kits file {}", path.display()))?;
    let kits = serde_json::from_str(&content)
        .with_context(|| format!("invalid kits file {}", path.display()))?;
    Ok(kits)
}

#[cfg(feature = "api")]
fn run_serve(calculator: ProposalCalculator, args: &cli::ServeArgs) -> anyhow::Result<()> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let catalog = match &args.catalog {
        Some(path) => Some(Catalog::from_file(path)?),
        None => {
            tracing::warn!("no catalog given; /quick-quote and /components will answer 503");
            None
        }
    };
    let state = Arc::new(solar_quote::api::AppState {
        calculator,
        catalog,
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    rt.block_on(solar_quote::api::serve(state, addr))?;
    Ok(())
}
