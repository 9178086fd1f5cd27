//! gtcompose CLI: write and inspect `.gtzip` title packages.
//!
//! Usage:
//!   gtcompose example [OPTIONS]   Write the sample composition
//!   gtcompose inspect <PATH>      List the entries of a package
//!   gtcompose config [--save]     Show (or write) the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gtcompose_common::config::ComposeConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "gtcompose",
    about = "Build title-designer packages from code",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the sample two-layer composition
    Example {
        /// Output package path (defaults to <output_dir>/basic_example.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Canvas width
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Canvas height
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Also print the composition as JSON
        #[arg(long)]
        dump: bool,
    },

    /// List the entries of a package and print its document
    Inspect {
        /// Path to the package
        path: PathBuf,

        /// Print document.xml
        #[arg(long)]
        document: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ComposeConfig::load();
    if cli.verbose {
        gtcompose_common::logging::init_cli_logging(true);
    } else {
        gtcompose_common::logging::init_logging(&config.logging);
    }

    match cli.command {
        Commands::Example {
            output,
            width,
            height,
            dump,
        } => commands::example::run(&config, output, width, height, dump),
        Commands::Inspect { path, document } => commands::inspect::run(path, document),
        Commands::Config { save } => commands::config::run(&config, save),
    }
}
