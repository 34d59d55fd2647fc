//! CLI frontend for the Forest Escape adventure.

mod commands;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use fe_core::GameConfig;
use fe_core::config::DEFAULT_SAVE_PATH;

#[derive(Parser)]
#[command(
    name = "forest-escape",
    about = "Forest Escape: a timed text adventure",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the adventure
    Play {
        /// RNG seed for dodge rolls
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Seconds to answer each prompt before hesitating
        #[arg(short, long, default_value = "10")]
        timeout: u64,

        /// Save file used by the `save` and `load` commands
        #[arg(long, default_value = DEFAULT_SAVE_PATH)]
        save_file: PathBuf,

        /// Write a journal of the session to this file (plain text for `.txt`, markdown otherwise)
        #[arg(short, long)]
        journal: Option<PathBuf>,
    },

    /// Show the player stored in a save file
    Inspect {
        /// Save file to read
        #[arg(long, default_value = DEFAULT_SAVE_PATH)]
        save_file: PathBuf,
    },

    /// List the story nodes and where they lead
    Story,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            seed,
            timeout,
            save_file,
            journal,
        } => {
            let config = GameConfig::default()
                .with_seed(seed)
                .with_timeout(Duration::from_secs(timeout))
                .with_save_path(save_file);
            commands::play::run(config, journal.as_deref())
        }
        Commands::Inspect { save_file } => commands::inspect::run(&save_file),
        Commands::Story => commands::story::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
