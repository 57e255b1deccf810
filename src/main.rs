// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use tracing_subscriber::EnvFilter;

use podserve::{DEFAULT_CONFIG_FILE, build_feed, load_config, run_server};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static SATELLITE: Emoji<'_, '_> = Emoji("📡 ", "[~] ");

/// Publish a directory of MP3 files as a podcast feed
#[derive(Parser, Debug)]
#[command(name = "podserve")]
#[command(about = "Publish a directory of MP3 files as a podcast feed")]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Quiet mode - only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan once and write the feed to stdout or a file
    Generate {
        /// Write the feed here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the feed and the audio files over HTTP
    Serve {
        /// Override the listen address from the config
        #[arg(short, long)]
        listen: Option<String>,
    },
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.quiet);

    let mut config = load_config(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    match args.command {
        Command::Generate { output } => {
            let rendered = build_feed(&config, Some(Utc::now())).context("Failed to build feed")?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered.body)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    if !args.quiet {
                        eprintln!(
                            "{SUCCESS}{} episodes written to {}",
                            rendered.episode_count.to_string().green().bold(),
                            path.display().to_string().cyan()
                        );
                    }
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout
                        .write_all(&rendered.body)
                        .and_then(|_| stdout.write_all(b"\n"))
                        .context("Failed to write feed to stdout")?;
                }
            }
        }

        Command::Serve { listen } => {
            if let Some(listen) = listen {
                config.listen = listen;
                config.listen_addr().context("Invalid --listen address")?;
            }

            if !args.quiet {
                eprintln!(
                    "\n{}{} {}\n",
                    MICROPHONE,
                    config.channel.title.bold().magenta(),
                    "- Podcast Feed Server".dimmed()
                );
                eprintln!(
                    "{SATELLITE}Feed: {}",
                    config.channel.feed_url.as_str().cyan()
                );
            }

            run_server(config).await.context("Server failed")?;
        }
    }

    Ok(())
}
