//! cie1931 - CIE1931 LED correction table generator
//!
//! Writes perceptual brightness lookup tables as C headers for firmware.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cie1931")]
#[command(author, version, about = "CIE1931 LED correction table generator")]
#[command(long_about = "
Generates a CIE1931 perceptual brightness correction table and writes it
as a C header (const array plus size/range macros) for LED dimming firmware.

Examples:
  cie1931 generate                          # 8-bit table -> cie1931.h
  cie1931 generate -p wide -o led10.h       # 10-bit table
  cie1931 generate --range 4095 --scale 103 # 12-bit output, full scale
  cie1931 generate -c table.yaml --stdout   # settings from a YAML file
  cie1931 print -p byte                     # index/value pairs
  cie1931 verify cie1931.h -p byte          # check an existing header
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a correction table header
    #[command(visible_alias = "gen")]
    Generate(GenerateArgs),

    /// Print index/value pairs of a table
    #[command(visible_alias = "p")]
    Print(PrintArgs),

    /// Check an existing header against a freshly generated table
    #[command(visible_alias = "v")]
    Verify(VerifyArgs),
}

/// Table selection shared by every command.
#[derive(Args, Clone, Default)]
struct TableArgs {
    /// Preset: byte (8-bit, scale 103), wide (10-bit, scale 100)
    #[arg(short, long, default_value = "byte")]
    preset: String,

    /// YAML config file (overrides the preset)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum input index (table holds size+1 entries)
    #[arg(long)]
    size: Option<u32>,

    /// Maximum output value
    #[arg(long)]
    range: Option<u32>,

    /// Lightness reached at the last index (103 ends at full range)
    #[arg(long)]
    scale: Option<f64>,

    /// Rounding: even, away
    #[arg(long)]
    rounding: Option<String>,

    /// C array identifier
    #[arg(long)]
    table_name: Option<String>,

    /// C element type
    #[arg(long)]
    int_type: Option<String>,
}

/// Arguments for the `generate` command.
#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    table: TableArgs,

    /// Output header
    #[arg(short, long, default_value = "cie1931.h")]
    output: PathBuf,

    /// Write the header to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Also print index/value pairs while generating
    #[arg(long, conflicts_with = "stdout")]
    print: bool,
}

/// Arguments for the `print` command.
#[derive(Args)]
struct PrintArgs {
    #[command(flatten)]
    table: TableArgs,
}

/// Arguments for the `verify` command.
#[derive(Args)]
struct VerifyArgs {
    /// Header to check
    header: PathBuf,

    #[command(flatten)]
    table: TableArgs,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args, cli.verbose),
        Commands::Print(args) => commands::print::run(args, cli.verbose),
        Commands::Verify(args) => commands::verify::run(args, cli.verbose),
    }
}
