use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use sample_peek::data::demo::{demo_batch, write_parquet};

/// Write a small synthetic dataset file for trying out the viewers.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct GenerateCli {
    /// Output file
    #[arg(long, default_value = "datasets/GUI-R1/demo.parquet")]
    output: PathBuf,

    /// Number of rows to write
    #[arg(long, default_value_t = 20)]
    rows: usize,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = GenerateCli::parse();
    if let Some(parent) = cli.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let batch = demo_batch(cli.rows)?;
    write_parquet(&cli.output, &batch)?;

    println!("Wrote {} samples to {}", batch.num_rows(), cli.output.display());
    Ok(())
}
