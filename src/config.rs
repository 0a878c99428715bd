use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::difficulty::{Difficulty, TickTiming, DEFAULT_HORIZONTAL_RATIO};
use crate::state::ScoringPolicy;

const APP_DIR: &str = "termsnake";
const SCORES_FILE: &str = "scores.yaml";
const LOG_FILE: &str = "termsnake.log";

#[derive(Parser, Debug)]
#[command(name = "termsnake", version, about = "Classic snake in your terminal")]
pub struct Args {
    /// Skip the menu and start on this difficulty
    #[arg(long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Where high scores are kept
    #[arg(long)]
    pub scores_file: Option<PathBuf>,

    /// Keep scores in memory only
    #[arg(long, conflicts_with = "scores_file")]
    pub no_scores: bool,

    /// Award 10 + (level - 1) * 2 points per food instead of a flat 10
    #[arg(long)]
    pub level_bonus: bool,

    /// Override the difficulty's base tick, in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Tick length of horizontal moves relative to vertical ones
    #[arg(long, default_value_t = DEFAULT_HORIZONTAL_RATIO)]
    pub horizontal_ratio: f64,

    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    pub debug: bool,
}

/// Resolved, read-only settings for the whole run.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub start_difficulty: Option<Difficulty>,
    pub scores_file: Option<PathBuf>,
    pub scoring: ScoringPolicy,
    pub tick_override: Option<Duration>,
    pub horizontal_ratio: f64,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Settings {
    pub fn from_args(args: Args) -> Self {
        let scores_file = if args.no_scores {
            None
        } else {
            Some(args.scores_file.unwrap_or_else(default_scores_file))
        };

        let scoring = if args.level_bonus {
            ScoringPolicy::LevelBonus
        } else {
            ScoringPolicy::Flat
        };

        Settings {
            start_difficulty: args.difficulty,
            scores_file,
            scoring,
            tick_override: args.tick_ms.map(Duration::from_millis),
            horizontal_ratio: args.horizontal_ratio,
            log_file: args.log_file.unwrap_or_else(|| env::temp_dir().join(LOG_FILE)),
            debug: args.debug,
        }
    }

    pub fn timing(&self, difficulty: Difficulty) -> TickTiming {
        let base = self.tick_override.unwrap_or_else(|| difficulty.base_tick());
        TickTiming::new(base, self.horizontal_ratio)
    }
}

fn default_scores_file() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join(APP_DIR).join(SCORES_FILE),
        None => PathBuf::from(SCORES_FILE),
    }
}
