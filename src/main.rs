use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use districtmap::cli::{Cli, Commands};
use districtmap::commands::{build, palette};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match &cli.command {
        Commands::Build(args) => build::run(&cli, args),
        Commands::Palette(args) => palette::run(&cli, args),
    }
}
