use anyhow::Result;
use clap::Parser;

use sample_peek::cli::InspectDatasetsCli;
use sample_peek::commands::inspect;

fn main() -> Result<()> {
    env_logger::init();

    let cli = InspectDatasetsCli::parse();
    let stdout = std::io::stdout();
    inspect::run(&cli, &mut stdout.lock())?;
    Ok(())
}
