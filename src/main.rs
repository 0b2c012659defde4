//! Deal Analyzer CLI
//!
//! Computes financing-cost metrics for one deal, prints them, and optionally
//! exports a "Deal Analysis" document.
//!
//! Parameters resolve from reference defaults, then `--input` JSON, then
//! `DEAL_*` environment variables, then explicit flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use deal_analyzer::config::{ParameterOverrides, ParameterSource};
use deal_analyzer::deal::{DealCostCalculator, MaturityPolicy};
use deal_analyzer::report::{format_field, DealReport, ReportFormat};

#[derive(Debug, Parser)]
#[command(name = "deal-analyzer", version, about = "Financing-cost analysis for a seller-financed deal")]
struct Cli {
    /// JSON file with deal parameters (missing fields use reference defaults)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Ignore DEAL_* environment variables
    #[arg(long)]
    no_env: bool,

    #[arg(long)]
    property_value: Option<f64>,

    #[arg(long)]
    seller_down_payment: Option<f64>,

    /// Annual bank rate as a decimal (e.g. 0.075)
    #[arg(long)]
    bank_interest_rate: Option<f64>,

    #[arg(long)]
    loan_term_years: Option<u32>,

    /// Seller note rate (recorded but not used by the calculation)
    #[arg(long)]
    seller_interest_rate: Option<f64>,

    #[arg(long)]
    seller_term_months: Option<u32>,

    #[arg(long)]
    seller_monthly_payment: Option<f64>,

    #[arg(long)]
    hold_years: Option<f64>,

    /// Hold periods past bank loan maturity: stop-at-maturity or extrapolate
    #[arg(long, default_value = "stop-at-maturity")]
    maturity_policy: MaturityPolicy,

    /// Export the analysis document, to PATH or to deal_analysis.<ext> when omitted
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    export: Option<Option<PathBuf>>,

    /// Export format: text, csv or json (defaults to the export path's extension)
    #[arg(long)]
    format: Option<ReportFormat>,

    /// Print results as JSON instead of formatted lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            property_value: self.property_value,
            seller_down_payment: self.seller_down_payment,
            bank_interest_rate: self.bank_interest_rate,
            loan_term_years: self.loan_term_years,
            seller_interest_rate: self.seller_interest_rate,
            seller_term_months: self.seller_term_months,
            seller_monthly_payment: self.seller_monthly_payment,
            hold_years: self.hold_years,
        }
    }
}

/// Export destination and format from the optional `--export` path and `--format`
///
/// An explicit format wins, then the path's extension, then text. Without a
/// path the format's default file name is used.
fn export_target(path: Option<&Path>, format: Option<ReportFormat>) -> (PathBuf, ReportFormat) {
    match path {
        Some(path) => {
            let format = format.or_else(|| ReportFormat::from_path(path)).unwrap_or_default();
            (path.to_path_buf(), format)
        }
        None => {
            let format = format.unwrap_or_default();
            (PathBuf::from(format.default_file_name()), format)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let source = ParameterSource {
        file: cli.input.clone(),
        use_env: !cli.no_env,
        overrides: cli.overrides(),
    };
    match &source.file {
        Some(path) => info!("Loading deal parameters from {}", path.display()),
        None => info!("Using reference deal parameters"),
    }
    if !source.overrides.is_empty() {
        info!("Applying command-line parameter overrides");
    }

    let params = source.resolve().context("Failed to resolve deal parameters")?;
    debug!("Resolved parameters: {:?}", params);

    let calculator = DealCostCalculator::with_maturity_policy(cli.maturity_policy);
    debug!("Calculator config: {:?}", calculator.config());
    let results = calculator
        .compute(&params)
        .context("Deal analysis failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&results).context("Failed to serialize results")?;
        println!("{}", json);
    } else {
        println!("Deal Analysis");
        println!("=============\n");
        for (field, value) in results.fields() {
            println!("{:<24} {:>18}", field.label(), format_field(field, value));
        }
    }

    if let Some(export) = &cli.export {
        let (path, format) = export_target(export.as_deref(), cli.format);

        let report = DealReport::new(params, results);
        report
            .export(&path, format)
            .with_context(|| format!("Failed to export report to {}", path.display()))?;
        info!("Exported {:?} report to {}", format, path.display());
        if !cli.json {
            println!("\nReport written to: {}", path.display());
        }
    }

    Ok(())
}
