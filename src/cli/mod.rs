//! Command-line interface for the session consolidation pipeline.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;

use crate::config::SessionConfig;
use crate::core::writers::write_session_workbook;
use crate::processors::consolidate::collect_session;

#[derive(Parser)]
#[command(name = "session-pipeline")]
#[command(about = "Telemetry session consolidation pipeline", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Consolidate the latest per-subsystem CSV logs into one workbook
    Consolidate {
        /// Participant identifier (prompted for when omitted)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Write the default configuration to a YAML file
    InitConfig {
        /// Destination path for the config file
        path: PathBuf,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.chars().count() > 39 {
            let head: String = value.chars().take(36).collect();
            format!("{}...", head)
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<39} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match SessionConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                SessionConfig::default()
            }
        },
        None => SessionConfig::default(),
    };

    match cli.command {
        Commands::Consolidate { name } => {
            cmd_consolidate(name, &config);
        }
        Commands::InitConfig { path } => {
            cmd_init_config(&path);
        }
    }
}

fn cmd_consolidate(name: Option<String>, config: &SessionConfig) {
    let start = Instant::now();

    let participant = match name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
    {
        Some(n) => n,
        None => match prompt_participant() {
            Ok(n) => n,
            Err(e) => {
                error!("Failed to read participant name: {}", e);
                std::process::exit(1);
            }
        },
    };

    let participant_dir = config.resolve(&config.participants_base).join(&participant);
    if let Err(e) = std::fs::create_dir_all(&participant_dir) {
        error!(
            "Failed to create participant folder {}: {}",
            participant_dir.display(),
            e
        );
        std::process::exit(1);
    }

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let output_path = participant_dir.join(format!("{participant}_Session_{timestamp}.xlsx"));

    println!("\nConsolidating session CSVs...\n");

    let datasets = match collect_session(config) {
        Ok(datasets) => datasets,
        Err(e) => {
            error!("Consolidation failed: {:#}", e);
            std::process::exit(1);
        }
    };

    if datasets.is_empty() {
        error!("No subsystem produced any data; nothing to write");
        std::process::exit(1);
    }

    let spinner = create_spinner("Writing session workbook...");

    match write_session_workbook(&output_path, &datasets) {
        Ok(()) => {
            spinner.finish_and_clear();

            println!("\nSession created:");
            println!("{}", output_path.display());

            print_summary(
                "Session Consolidation Complete",
                &[
                    ("Participant", participant.clone()),
                    ("Sheets written", datasets.len().to_string()),
                    ("Output file", output_path.display().to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Failed to write workbook: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_init_config(path: &PathBuf) {
    match SessionConfig::default().to_yaml(path) {
        Ok(()) => println!("Wrote default config to {}", path.display()),
        Err(e) => {
            error!("Failed to write config to {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

/// Block until the operator enters a non-empty participant identifier.
fn prompt_participant() -> io::Result<String> {
    loop {
        print!("Participant name: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed before a participant name was entered",
            ));
        }

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
        println!("Invalid name, try again.");
    }
}
