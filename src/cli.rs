use std::path::PathBuf;

use clap::{Args, Parser};

use crate::data::scan::ALL_DATASETS;

pub const DEFAULT_DATA_DIR: &str = "datasets/GUI-R1";
pub const DATA_DIR_ENV: &str = "SAMPLE_PEEK_DATA_DIR";

/// Options shared by every tool.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Directory containing the parquet files
    #[arg(long, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Save results to a JSON file
    #[arg(long)]
    pub save_json: bool,
}

/// Show one sample from each parquet file.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct ShowSamplesCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Index of the sample to show; clamped to the last row
    #[arg(long, default_value_t = 0)]
    pub sample_index: usize,

    /// Path to save the JSON file
    #[arg(long, default_value = "samples.json")]
    pub json_path: PathBuf,
}

/// Show multiple samples from each parquet file.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct ShowMultipleSamplesCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of samples to show from each dataset
    #[arg(long, default_value_t = 3)]
    pub num_samples: usize,

    /// Select random samples instead of sequential ones
    #[arg(long)]
    pub random: bool,

    /// Seed for --random, for reproducible picks
    #[arg(long, requires = "random")]
    pub seed: Option<u64>,

    /// Specific dataset to show (file name without .parquet) or "all"
    #[arg(long, default_value = ALL_DATASETS)]
    pub dataset: String,

    /// Path to save the JSON file
    #[arg(long, default_value = "multiple_samples.json")]
    pub json_path: PathBuf,
}

/// Load and analyze parquet datasets.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct InspectDatasetsCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Specific dataset to load (file name without .parquet) or "all"
    #[arg(long, default_value = ALL_DATASETS)]
    pub dataset: String,

    /// Show schema and a sample row for each dataset
    #[arg(long)]
    pub verbose: bool,

    /// Path to save the JSON summary
    #[arg(long, default_value = "dataset_summary.json")]
    pub json_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definitions_are_valid() {
        ShowSamplesCli::command().debug_assert();
        ShowMultipleSamplesCli::command().debug_assert();
        InspectDatasetsCli::command().debug_assert();
    }

    #[test]
    fn multiple_samples_defaults() {
        let cli = ShowMultipleSamplesCli::try_parse_from(["show-multiple-samples", "--data-dir", "d"]).unwrap();
        assert_eq!(cli.num_samples, 3);
        assert!(!cli.random);
        assert_eq!(cli.dataset, "all");
        assert!(!cli.common.save_json);
        assert_eq!(cli.json_path, PathBuf::from("multiple_samples.json"));
        assert_eq!(cli.common.data_dir, PathBuf::from("d"));
    }

    #[test]
    fn seed_requires_random() {
        assert!(ShowMultipleSamplesCli::try_parse_from(["x", "--seed", "4"]).is_err());
        let cli = ShowMultipleSamplesCli::try_parse_from(["x", "--random", "--seed", "4"]).unwrap();
        assert_eq!(cli.seed, Some(4));
    }

    #[test]
    fn show_samples_parses_index() {
        let cli = ShowSamplesCli::try_parse_from(["x", "--sample-index", "12", "--save-json"]).unwrap();
        assert_eq!(cli.sample_index, 12);
        assert!(cli.common.save_json);
        assert_eq!(cli.json_path, PathBuf::from("samples.json"));
    }

    #[test]
    fn inspect_parses_dataset_and_verbose() {
        let cli = InspectDatasetsCli::try_parse_from(["x", "--dataset", "web", "--verbose"]).unwrap();
        assert_eq!(cli.dataset, "web");
        assert!(cli.verbose);
    }
}
