//! voxparse - fuzzy matching from the command line
//!
//! Scores strings and picks the best match among choices, the way a voice
//! assistant resolves a noisy transcript against known commands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};
use voxparse::config::Config;
use voxparse::utils::{find_matches, fuzzy_match, match_one_by, match_one_map_by};
use voxparse::{Scorer, VoxError};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score how similar two strings are (0.0 - 1.0)
    Ratio { a: String, b: String },

    /// Pick the choice that best matches the query
    Match {
        query: String,

        /// Choices; with --map each one is KEY=VALUE
        #[arg(required = true)]
        choices: Vec<String>,

        /// Match against keys and print the value of the best one
        #[arg(long)]
        map: bool,

        /// ratio, levenshtein or jaro_winkler
        #[arg(long)]
        scorer: Option<Scorer>,
    },

    /// List the closest choices, best first
    Close {
        query: String,

        #[arg(required = true)]
        choices: Vec<String>,

        /// Maximum number of results
        #[arg(short)]
        n: Option<usize>,

        /// Minimum score a choice needs
        #[arg(long)]
        cutoff: Option<f64>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging before the config loads so its warnings are shown:
    // --verbose, then RUST_LOG, then the config's log_level
    let env_filter = EnvFilter::try_from_default_env().ok();
    let pinned = args.verbose || env_filter.is_some();
    let initial = if args.verbose {
        EnvFilter::new("debug")
    } else {
        env_filter.unwrap_or_else(|| EnvFilter::new("info"))
    };
    let (filter, filter_handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    if !pinned {
        filter_handle
            .reload(EnvFilter::new(config.log_level.to_lowercase()))
            .context("Failed to apply configured log level")?;
    }

    debug!("voxparse v{} ({:?})", env!("CARGO_PKG_VERSION"), config);

    match args.command {
        Command::Ratio { a, b } => {
            let score = fuzzy_match(&a, &b);
            if args.json {
                println!("{}", json!({ "a": a, "b": b, "score": score }));
            } else {
                println!("{:.4}", score);
            }
        }
        Command::Match {
            query,
            choices,
            map,
            scorer,
        } => {
            let scorer = scorer.unwrap_or(config.scorer);
            let (selection, score) = if map {
                let pairs = parse_pairs(&choices)?;
                let (value, score) = match_one_map_by(&query, pairs, scorer)?;
                (value.to_string(), score)
            } else {
                let (choice, score) = match_one_by(&query, &choices, scorer)?;
                (choice.clone(), score)
            };
            info!("🎯 '{}' -> '{}' ({:.3})", query, selection, score);

            if args.json {
                println!(
                    "{}",
                    json!({ "query": query, "selection": selection, "score": score })
                );
            } else {
                println!("{}\t{:.4}", selection, score);
            }
        }
        Command::Close {
            query,
            choices,
            n,
            cutoff,
        } => {
            let n = n.unwrap_or(config.max_matches);
            let cutoff = cutoff.unwrap_or(config.match_cutoff);
            let matches = find_matches(&query, &choices, n, cutoff)?;

            if args.json {
                println!("{}", serde_json::to_string(&matches)?);
            } else if matches.is_empty() {
                println!("No matches for '{}' above {:.2}", query, cutoff);
            } else {
                for m in matches {
                    println!("{}\t{:.4}", m.value, m.score);
                }
            }
        }
    }

    Ok(())
}

/// Split KEY=VALUE arguments into pairs, keeping their order
fn parse_pairs(choices: &[String]) -> Result<Vec<(&str, &str)>, VoxError> {
    choices
        .iter()
        .map(|choice| {
            choice.split_once('=').ok_or_else(|| {
                VoxError::InvalidArgument(format!(
                    "'{}' is not a KEY=VALUE pair: a list or mapping of choices must be provided",
                    choice
                ))
            })
        })
        .collect()
}
