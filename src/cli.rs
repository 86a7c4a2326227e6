use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plantops", version, about = "Plant care watering advisor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test backend connections
    Check,
    /// Resolve location, fetch weather, and print watering advice
    Advise {
        /// JSON file with the plant due list:
        /// [{"id": 1, "next_water_date": "2025-06-01"}, ...]
        #[arg(short, long)]
        plants: Option<PathBuf>,
    },
}
