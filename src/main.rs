use anyhow::Result;
use clap::Parser;

use csvgrid::cli::CliArgs;
use csvgrid::config::GridConfig;

fn main() -> Result<()> {
    csvgrid::tracing::init();

    let args = CliArgs::parse();
    let defaults = GridConfig::load();
    let config = args.into_config(&defaults).map_err(anyhow::Error::msg)?;

    let stdout = std::io::stdout();
    csvgrid::app::run(&config, &mut stdout.lock())?;

    Ok(())
}
