//! qecc Command-Line Interface
//!
//! Builds error-correction experiments for the bit-flip, phase-flip, Shor
//! and Steane codes, runs them on the reference statevector simulator, and
//! exports the underlying programs as OpenQASM 3.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::common::{CodeKind, ExperimentArgs, Stage};
use commands::{emit, run, sweep, table, version};
use config::Config;

/// qecc - quantum error-correcting codes on a statevector simulator
#[derive(Parser)]
#[command(name = "qecc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file (default: ~/.qecc/config.yaml)
    #[arg(long, global = true, env = "QECC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one experiment and print the outcome counts
    Run {
        /// Code to run
        #[arg(short, long, value_enum)]
        code: CodeKind,

        #[command(flatten)]
        experiment: ExperimentArgs,

        /// Number of shots
        #[arg(short, long)]
        shots: Option<u32>,

        /// Sampling seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print the execution result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check every correctable single-error location
    Sweep {
        /// Code to sweep
        #[arg(short, long, value_enum)]
        code: CodeKind,

        /// Shots per experiment
        #[arg(short, long)]
        shots: Option<u32>,

        /// Sampling seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print a code's syndrome tables
    Table {
        /// Code to describe
        #[arg(short, long, value_enum)]
        code: CodeKind,
    },

    /// Export a code stage as OpenQASM 3
    Emit {
        /// Code to export
        #[arg(short, long, value_enum)]
        code: CodeKind,

        /// Which program to export
        #[arg(long, value_enum, default_value = "experiment")]
        stage: Stage,

        #[command(flatten)]
        experiment: ExperimentArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = Config::load(cli.config.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|config| {
            init_logging(cli.verbose, &config);
            execute(cli.command, &config)
        });

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// `-v` flags win over the configured level.
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(command: Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Run {
            code,
            experiment,
            shots,
            seed,
            json,
        } => run::execute(code, &experiment, shots, seed, json, config),

        Commands::Sweep { code, shots, seed } => sweep::execute(code, shots, seed, config),

        Commands::Table { code } => table::execute(code),

        Commands::Emit {
            code,
            stage,
            experiment,
            output,
        } => emit::execute(code, stage, &experiment, output.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}
