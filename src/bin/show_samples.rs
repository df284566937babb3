use anyhow::Result;
use clap::Parser;

use sample_peek::cli::ShowSamplesCli;
use sample_peek::commands::show;

fn main() -> Result<()> {
    env_logger::init();

    let cli = ShowSamplesCli::parse();
    let stdout = std::io::stdout();
    show::run(&cli, &mut stdout.lock())?;
    Ok(())
}
