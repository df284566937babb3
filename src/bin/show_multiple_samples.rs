use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sample_peek::cli::ShowMultipleSamplesCli;
use sample_peek::commands::multi;

fn main() -> Result<()> {
    env_logger::init();

    let cli = ShowMultipleSamplesCli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let stdout = std::io::stdout();
    multi::run(&cli, &mut stdout.lock(), &mut rng)?;
    Ok(())
}
