//! partisim CLI: simulation, benchmarking, and debugging.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "partisim")]
#[command(version, about = "partisim: particle integration and dense Cholesky toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a config file.
    Simulate {
        /// Path to simulation config (TOML).
        #[arg(short, long, default_value = "simulation.toml")]
        config: String,
    },

    /// Run the scenario benchmark suite.
    Benchmark {
        /// Which scenario to run (free_flight, pinned_pendulum, spring_chain, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Factor a random SPD matrix and report accuracy and timing.
    Factor {
        /// Matrix dimension.
        #[arg(short = 'n', long, default_value_t = 256)]
        size: usize,

        /// Seed for the random matrix.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Kernel to use (blocked, unblocked, both).
        #[arg(long, default_value = "both")]
        strategy: String,
    },

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a simulation config.
    Validate {
        /// Path to config file.
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate { config } => commands::simulate(&config),
        Commands::Benchmark { scenario, output } => commands::benchmark(&scenario, output.as_deref()),
        Commands::Factor { size, seed, strategy } => commands::factor(size, seed, &strategy),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
