//! Command-line front end
//!
//! `firepack convert` normalizes scene and prefab documents into typed
//! trees plus clip and frame-manifest side files; `firepack info` prints a
//! summary of a document without converting it.

mod commands;

use clap::{Parser, Subcommand};
use commands::convert::ConvertArgs;
use commands::info::InfoArgs;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "firepack", version, about = "Scene graph normalizer")]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert scene/prefab documents to normalized trees
    Convert(ConvertArgs),
    /// Summarize a document's records without converting
    Info(InfoArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert(args) => commands::convert::cmd_convert(&args),
        Commands::Info(args) => commands::info::cmd_info(&args),
    };

    if let Err(e) = result {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}
