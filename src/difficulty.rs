use std::fmt;
use std::time::Duration;

use clap::ValueEnum;

use crate::board::{Board, MIN_HEIGHT, MIN_WIDTH};
use crate::snake::Direction;

// Room left around the board for borders and the HUD
const VIEWPORT_MARGIN_COLS: i32 = 10;
const VIEWPORT_MARGIN_ROWS: i32 = 15;

pub const DEFAULT_HORIZONTAL_RATIO: f64 = 0.7;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Preferred board as (height, width).
    pub fn base_size(self) -> (i32, i32) {
        match self {
            Difficulty::Easy => (15, 30),
            Difficulty::Medium => (20, 40),
            Difficulty::Hard => (25, 50),
        }
    }

    pub fn base_tick(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(150),
            Difficulty::Medium => Duration::from_millis(100),
            Difficulty::Hard => Duration::from_millis(50),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn speed_label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Slow",
            Difficulty::Medium => "Normal",
            Difficulty::Hard => "Fast",
        }
    }

    /// Shrinks the preferred board to fit a `cols` x `rows` terminal, never
    /// below the minimum board size.
    pub fn board_for_viewport(self, cols: u16, rows: u16) -> Board {
        let (base_h, base_w) = self.base_size();
        let width = (cols as i32 - VIEWPORT_MARGIN_COLS).min(base_w).max(MIN_WIDTH);
        let height = (rows as i32 - VIEWPORT_MARGIN_ROWS).min(base_h).max(MIN_HEIGHT);
        Board::new(height, width)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sleep between ticks. Horizontal moves are shortened because terminal
/// cells are taller than they are wide.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickTiming {
    base: Duration,
    horizontal_ratio: f64,
}

impl TickTiming {
    pub fn new(base: Duration, horizontal_ratio: f64) -> Self {
        TickTiming { base, horizontal_ratio: horizontal_ratio.clamp(0.1, 1.0) }
    }

    pub fn interval(&self, direction: Direction) -> Duration {
        if direction.is_horizontal() {
            let micros = self.base.as_micros() as f64 * self.horizontal_ratio;
            Duration::from_micros(micros.round() as u64)
        } else {
            self.base
        }
    }
}
