use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Interactive district comparison map builder
#[derive(Parser, Debug)]
#[command(name = "districtmap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the interactive HTML map (forbids stdout)
    Build(BuildArgs),

    /// Print the district id -> status/color table
    Palette(PaletteArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory that relative input and output paths resolve against
    #[arg(long, default_value = ".", value_hint = ValueHint::DirPath)]
    pub root: PathBuf,

    /// JSON configuration file; omitted fields keep their defaults
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output HTML file (must be a file path; "-" is rejected)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// JSON configuration file; omitted fields keep their defaults
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Default log filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
