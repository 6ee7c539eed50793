//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::data::pipeline::PipelineParams;
use crate::data::sample::{DEFAULT_SAMPLE_SIZE, DEFAULT_SEED};
use crate::data::views::DEFAULT_TOP_N;

/// Dataset opened at startup when no path is given.
pub const DEFAULT_DATA_PATH: &str = "Imports_Exports_Dataset.csv";

/// Interactive dashboard of import and export transactions.
#[derive(Parser, Debug, Clone)]
#[command(name = "trade-dashboard", version, about)]
pub struct Args {
    /// Trade table to load (.csv, .json or .parquet)
    #[arg(long, env = "TRADE_DASHBOARD_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Number of rows drawn from the table
    #[arg(long, env = "TRADE_DASHBOARD_SAMPLE_SIZE", default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Seed of the random sample
    #[arg(long, env = "TRADE_DASHBOARD_SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of countries in the top-countries chart
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Write every view as JSON to this path and exit without opening a window
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Args {
    pub fn pipeline_params(&self) -> PipelineParams {
        PipelineParams {
            sample_size: self.sample_size,
            seed: self.seed,
            top_n: self.top_n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_sample() {
        let args = Args::try_parse_from(["trade-dashboard"]).unwrap();
        assert_eq!(args.pipeline_params(), PipelineParams::default());
        assert_eq!(args.export, None);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "trade-dashboard",
            "--data",
            "trades.parquet",
            "--sample-size",
            "50",
            "--seed",
            "1",
            "--export",
            "views.json",
        ])
        .unwrap();
        assert_eq!(args.data, PathBuf::from("trades.parquet"));
        assert_eq!(args.pipeline_params().sample_size, 50);
        assert_eq!(args.pipeline_params().seed, 1);
        assert_eq!(args.export, Some(PathBuf::from("views.json")));
    }
}
