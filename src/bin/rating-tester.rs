//! Rating Tester CLI Tool
//!
//! Command-line tool for exercising the rating engine without a frontend.
//!
//! Usage:
//!   cargo run --bin rating-tester -- --help
//!   cargo run --bin rating-tester match --player 1500 --opponent 1500 --outcome win
//!   cargo run --bin rating-tester scenarios --player 1400 --opponent 1600
//!   cargo run --bin rating-tester classify --rating 2250
//!   cargo run --bin rating-tester validate --value 1500.5
//!   cargo run --bin rating-tester simulate --players 4 --games 12

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use podium::config::AppConfig;
use podium::rating::{
    classify_rating, is_valid_rating, record_result, EloConfig, EloRatingCalculator,
    InMemoryRatingStorage, RatingCalculator, RatingEntry, RatingStorage,
};
use podium::types::{MatchOutcome, Rating};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "rating-tester")]
#[command(about = "Exercise the podium rating engine from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the rating change for a single match
    Match {
        /// Rated player's current rating
        #[arg(short, long)]
        player: Rating,
        /// Opponent's current rating
        #[arg(short, long)]
        opponent: Rating,
        /// Match outcome: win, draw, or loss
        #[arg(long)]
        outcome: String,
    },
    /// Show possible deltas for a pairing at each outcome
    Scenarios {
        /// Rated player's current rating
        #[arg(short, long)]
        player: Rating,
        /// Opponent's current rating
        #[arg(short, long)]
        opponent: Rating,
    },
    /// Classify a rating into its skill category
    Classify {
        /// Rating to classify
        #[arg(short, long)]
        rating: Rating,
    },
    /// Check whether a candidate rating value is valid
    Validate {
        /// Candidate value (may be fractional)
        #[arg(short, long)]
        value: f64,
    },
    /// Run a deterministic series of matches through the in-memory store
    Simulate {
        /// Number of players on the ladder
        #[arg(short, long, default_value = "4")]
        players: usize,
        /// Number of matches to play
        #[arg(short, long, default_value = "12")]
        games: usize,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn parse_outcome(raw: &str) -> Result<MatchOutcome> {
    match raw.to_lowercase().as_str() {
        "win" | "w" | "1" | "1.0" => Ok(MatchOutcome::Win),
        "draw" | "d" | "0.5" => Ok(MatchOutcome::Draw),
        "loss" | "l" | "0" | "0.0" => Ok(MatchOutcome::Loss),
        other => Err(anyhow!(
            "Unknown outcome '{}': expected win, draw, or loss",
            other
        )),
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };

    if let Some(level) = &cli.log_level {
        config.service.log_level = level.clone();
    }

    Ok(config)
}

fn run_simulation(calculator: &EloRatingCalculator, players: usize, games: usize) -> Result<()> {
    let storage = InMemoryRatingStorage::default();

    // Spread starting ratings so the ladder is not flat
    for i in 0..players {
        let id = format!("player_{}", i + 1);
        let rating = calculator.initial_rating() + (i as Rating) * 50;
        storage.store_rating(RatingEntry::new(id, rating))?;
    }

    // Deterministic schedule: adjacent pairs, outcomes cycling win/loss/draw
    for game in 0..games {
        let a = game % players;
        let b = (game + 1) % players;
        let outcome = match game % 3 {
            0 => MatchOutcome::Win,
            1 => MatchOutcome::Loss,
            _ => MatchOutcome::Draw,
        };

        let player_id = format!("player_{}", a + 1);
        let opponent_id = format!("player_{}", b + 1);
        let (record, _) = record_result(calculator, &storage, &player_id, &opponent_id, outcome)?;
        info!(
            "game {}: {} vs {} ({}) -> {:+}",
            game + 1,
            record.player_id,
            record.opponent_id,
            record.change.outcome,
            record.change.delta
        );
    }

    // Final ladder, best rating first
    let mut entries: Vec<_> = storage.get_all_ratings()?.into_values().collect();
    entries.sort_by(|a, b| b.rating.cmp(&a.rating));

    println!("{:<12} {:>8} {:>8}  {}", "Player", "Rating", "Games", "Category");
    for entry in entries {
        println!(
            "{:<12} {:>8} {:>8}  {}",
            entry.player_id,
            entry.rating,
            entry.games_played,
            entry.category()
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_logging(&config.service.log_level)?;
    info!(version = podium::VERSION, "rating-tester starting");

    let calculator = EloRatingCalculator::new(EloConfig::from(&config.rating))?;

    match cli.command {
        Commands::Match {
            player,
            opponent,
            outcome,
        } => {
            let outcome = parse_outcome(&outcome)?;
            let change = calculator.calculate_rating_change(player, opponent, outcome)?;
            println!("{}", serde_json::to_string_pretty(&change)?);
        }
        Commands::Scenarios { player, opponent } => {
            let scenarios = calculator.scenarios(player, opponent);
            println!("{}", serde_json::to_string_pretty(&scenarios)?);
        }
        Commands::Classify { rating } => {
            println!("{}", classify_rating(rating));
        }
        Commands::Validate { value } => {
            if is_valid_rating(value) {
                println!("{} is a valid rating", value);
            } else {
                println!("{} is not a valid rating", value);
                std::process::exit(1);
            }
        }
        Commands::Simulate { players, games } => {
            if players < 2 {
                return Err(anyhow!("Simulation needs at least 2 players"));
            }
            run_simulation(&calculator, players, games)?;
        }
    }

    Ok(())
}
