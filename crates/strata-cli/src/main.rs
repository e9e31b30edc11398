//! `strata` — demonstration driver for the backup engine.
//!
//! # Usage
//!
//! ```text
//! strata demo                      # run the demo scenario
//! strata demo -c strata.toml       # run with a config file
//! strata demo --arena-capacity 64  # tiny arena, watch it fill up
//! ```

mod config;
mod telemetry;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use strata_engine::{BackupEngine, EngineError};
use strata_types::{EngineConfig, Instruction, Timestamp};
use tracing::info;

use config::CliConfig;

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "strata",
    version,
    about = "Time-versioned block storage engine demo driver"
)]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo backup / time-travel-read scenario.
    Demo {
        /// Override chunk slot width in bytes.
        #[arg(long)]
        chunk_width: Option<usize>,

        /// Override arena capacity in bytes.
        #[arg(long)]
        arena_capacity: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CliConfig::load(cli.config.as_deref())?;
    telemetry::init(&config.log.level);

    match cli.command {
        Commands::Demo {
            chunk_width,
            arena_capacity,
        } => {
            if let Some(width) = chunk_width {
                config.engine.chunk_width = width;
            }
            if let Some(capacity) = arena_capacity {
                config.engine.arena_capacity = capacity;
            }
            run_demo(config.engine_config())
        }
    }
}

// -----------------------------------------------------------------------
// Demo scenario
// -----------------------------------------------------------------------

fn run_demo(config: EngineConfig) -> Result<()> {
    let mut engine = BackupEngine::new(config);

    engine.full_backup("f1", 1, b"this is the file")?;
    print_file(&engine, "f1", 5);

    engine.full_backup("f2", 3, b"I am Iron Man")?;
    print_file(&engine, "f3", 3);
    print_file(&engine, "f2", 3);

    engine.full_backup("f1", 4, b"this is the new file")?;
    print_file(&engine, "f1", 4);

    report(&engine.incremental_backup("f1", 2, &[Instruction::Delete { ordinal: 1 }]));
    print_file(&engine, "f1", 3);

    report(&engine.incremental_backup(
        "f2",
        4,
        &[
            Instruction::Append {
                data: b", Morgan".to_vec(),
            },
            Instruction::Alter {
                ordinal: 2,
                data: b"CHANGED!".to_vec(),
            },
        ],
    ));
    print_file(&engine, "f2", 5);

    let usage = engine.arena_usage();
    info!(
        used = usage.used_bytes,
        total = usage.total_bytes,
        "arena usage after demo"
    );
    Ok(())
}

fn print_file(engine: &BackupEngine, filename: &str, timestamp: Timestamp) {
    match engine.read_file(filename, timestamp) {
        Ok(content) => println!(
            "{filename}@{timestamp}: {}",
            String::from_utf8_lossy(&content)
        ),
        Err(e) => println!("{filename}@{timestamp}: {e}"),
    }
}

fn report(outcomes: &[Result<(), EngineError>]) {
    for (index, outcome) in outcomes.iter().enumerate() {
        if let Err(e) = outcome {
            eprintln!("instruction {index}: {e}");
        }
    }
}
