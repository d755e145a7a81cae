use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// Pricing policy file (TOML or JSON); defaults apply when absent or invalid.
    #[clap(long, global = true, env = "SOLAR_QUOTE_POLICY")]
    pub policy: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Price and rank the kits listed in a JSON file.
    #[clap(name = "compare")]
    Compare(CompareArgs),

    /// Size and price a kit from monthly consumption or an electricity bill.
    #[clap(name = "quick")]
    Quick(QuickArgs),

    /// Price the built-in sample kit.
    #[clap(name = "sample")]
    Sample,

    /// Serve the HTTP API.
    #[cfg(feature = "api")]
    #[clap(name = "serve")]
    Serve(ServeArgs),
}

#[derive(Parser)]
pub struct CompareArgs {
    /// JSON array of kit specifications.
    pub kits: PathBuf,

    /// Export the ranking to a CSV file.
    #[clap(long)]
    pub csv: Option<PathBuf>,

    /// Print the ranked proposals as JSON instead of the text summary.
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct QuickArgs {
    /// Component catalog (JSON).
    #[clap(long)]
    pub catalog: PathBuf,

    /// Monthly consumption in kWh.
    #[clap(long = "consumption-kwh")]
    pub consumption_kwh: Option<f64>,

    /// Monthly electricity bill.
    #[clap(long = "bill-value")]
    pub bill_value: Option<f64>,

    /// Peak sun hours per day.
    #[clap(long)]
    pub hsp: Option<f64>,

    /// Energy tariff per kWh.
    #[clap(long)]
    pub tariff: Option<f64>,

    /// Simultaneity factor percent.
    #[clap(long)]
    pub simultaneity: Option<f64>,

    #[clap(long)]
    pub json: bool,
}

#[cfg(feature = "api")]
#[derive(Parser)]
pub struct ServeArgs {
    #[clap(long, default_value = "3000", env = "PORT")]
    pub port: u16,

    /// Catalog backing `/quick-quote` and `/components`.
    #[clap(long, env = "SOLAR_QUOTE_CATALOG")]
    pub catalog: Option<PathBuf>,
}
