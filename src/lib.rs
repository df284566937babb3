//! Command-line tools for looking inside Parquet datasets of GUI-agent
//! samples: print a few records per file, export them as JSON, and compute
//! light descriptive statistics.

pub mod cli;
pub mod commands;
pub mod data;
pub mod export;
pub mod report;
