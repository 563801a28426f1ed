//! subseq CLI — split a SubRip file into one folder per subtitle sequence.
//!
//! Usage:
//!   subseq organize --srt <FILE> --audio <DIR> --output <DIR>
//!   subseq inspect --srt <FILE> [--audio <DIR>]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use subseq_common::config::AppConfig;
use subseq_common::SubseqError;

mod commands;

#[derive(Parser)]
#[command(
    name = "subseq",
    about = "Pair subtitle entries with their audio clips, one folder per sequence",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/subseq/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write <output>/<seq>/<seq>.srt and copy <audio>/<seq>.mp3 for every entry
    Organize {
        /// Input SubRip file
        #[arg(long)]
        srt: Option<PathBuf>,

        /// Directory of <sequence>.mp3 clips
        #[arg(long)]
        audio: Option<PathBuf>,

        /// Output root directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report what would be written without touching the output tree
        #[arg(long)]
        dry_run: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the entries of a SubRip file
    Inspect {
        /// Input SubRip file
        #[arg(long)]
        srt: Option<PathBuf>,

        /// Also report which entries have a clip in this directory
        #[arg(long)]
        audio: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    subseq_common::logging::init_logging(&logging);

    let result = match cli.command {
        Commands::Organize {
            srt,
            audio,
            output,
            dry_run,
            json,
        } => config
            .layout(srt, audio, output)
            .map_err(anyhow::Error::from)
            .and_then(|layout| {
                tracing::debug!(?layout, dry_run, "organize");
                commands::organize::run(&layout, dry_run, json)
            }),
        Commands::Inspect { srt, audio } => srt
            .or_else(|| config.paths.subtitle_file.clone())
            .ok_or_else(|| anyhow::Error::from(SubseqError::missing_path("subtitle_file", "srt")))
            .and_then(|srt| {
                let audio = audio.or_else(|| config.paths.audio_dir.clone());
                tracing::debug!(?srt, ?audio, "inspect");
                commands::inspect::run(srt, audio)
            }),
    };

    result.map_err(|e| {
        tracing::error!("{e:#}");
        e
    })
}
