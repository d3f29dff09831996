//! Command-line entry point for the cli-project helpers.
//! Encodes parameters and stages project folders from the shell.

use clap::Parser;
use cli_project::cli::{Args, run};
use cli_project::logging;

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Args::parse();
    run(args, &mut std::io::stdout().lock())?;
    Ok(())
}
