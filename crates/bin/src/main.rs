//! Albany CLI binary.
//!
//! Runs the two-estimator alpha study on CSV inputs or on a seeded synthetic
//! panel.

use albany::study::{StudyConfig, run_alpha_study};
use albany::synthetic::TwoGroupScenario;
use albany_data::{load_dated_panel, load_panel};
use albany_output::{ExportFormat, Exporter};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "albany")]
#[command(about = "Albany: risk-adjusted group performance comparison", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an alpha study on CSV inputs
    Estimate {
        /// Return panel CSV (T x N)
        returns: PathBuf,

        /// Factor matrix CSV (T x Kx, constant in column 0)
        factors: PathBuf,

        /// Group design CSV (N x Kz)
        groups: PathBuf,

        /// Returns and factors carry an ISO date in their first column
        #[arg(long)]
        dated: bool,

        /// Inputs carry a header record
        #[arg(long)]
        headers: bool,

        /// Design column of the group held long
        #[arg(long, default_value = "0")]
        long_group: usize,

        /// Design column of the group held short
        #[arg(long, default_value = "1")]
        short_group: usize,

        /// Periods per year for annualization
        #[arg(long, default_value = "252")]
        annualization: f64,

        /// Fixed Newey-West lag count (default: automatic selection)
        #[arg(long)]
        nw_lags: Option<usize>,

        /// Write the study comparison as CSV
        #[arg(long)]
        csv_out: Option<PathBuf>,

        /// Write the full study result as pretty JSON
        #[arg(long)]
        json_out: Option<PathBuf>,
    },

    /// Run the study on a seeded synthetic two-group panel
    Demo {
        /// Number of time periods
        #[arg(long, default_value = "1260")]
        periods: usize,

        /// Number of units, split evenly between two groups
        #[arg(long, default_value = "40")]
        units: usize,

        /// Standard deviation of the per-period group shock; zero makes
        /// residuals cross-sectionally independent
        #[arg(long, default_value = "0.12")]
        group_shock: f64,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Estimate {
            returns,
            factors,
            groups,
            dated,
            headers,
            long_group,
            short_group,
            annualization,
            nw_lags,
            csv_out,
            json_out,
        } => {
            let data = if dated {
                load_dated_panel(&returns, &factors, &groups, headers)?
            } else {
                load_panel(&returns, &factors, &groups, headers)?
            };

            let config = StudyConfig {
                group_long: long_group,
                group_short: short_group,
                annualization,
                newey_west_lags: nw_lags,
            };
            let outcome = run_alpha_study(&data, &config)?;

            let title = format!("group {long_group} vs group {short_group}");
            let study = outcome.study_report(&title);
            println!("{}", outcome.panel_report("panel coefficients"));
            println!("{study}");

            if let Some(path) = csv_out {
                study.export_to_file(&path, ExportFormat::Csv)?;
                println!("wrote {}", path.display());
            }
            if let Some(path) = json_out {
                study.export_to_file(&path, ExportFormat::PrettyJson)?;
                println!("wrote {}", path.display());
            }
        }

        Commands::Demo {
            periods,
            units,
            group_shock,
            seed,
        } => {
            let scenario = TwoGroupScenario {
                n_periods: periods,
                n_units: units,
                group_shock_vol: group_shock,
                seed,
                ..Default::default()
            };
            let data = scenario.generate()?;
            let outcome = run_alpha_study(&data, &StudyConfig::default())?;

            println!("{}", outcome.panel_report("panel coefficients (synthetic)"));
            println!("{}", outcome.study_report("group 0 vs group 1 (synthetic)"));
        }
    }

    Ok(())
}
