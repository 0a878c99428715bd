use std::ops::Range;

use crate::board::Board;
use crate::error::TermError;
use crate::game::SessionReport;
use crate::scores::ScoreEntry;
use crate::snake::{Position, Snake};

pub const HEAD_CHAR: char = '@';
pub const BODY_CHAR: char = 'o';
pub const FOOD_CHAR: char = '*';
pub const WALL_CHAR: char = '#';
pub const CORNER_CHAR: char = '+';

const BOX_WIDTH: usize = 50;
const HUD_LINES: usize = 2;

const RAINBOW_FOOD_LEVEL: u32 = 3;
const HIGHLIGHT_HEAD_LEVEL: u32 = 5;
const BRIGHT_SEGMENTS: usize = 3;
pub const RAINBOW_LEN: usize = 6;

/// How a board cell is drawn. The terminal maps these to colours.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tint {
    Plain,
    Corner,
    Wall,
    Head { highlighted: bool },
    /// `bright` for the segments right behind the head.
    Body { bright: bool },
    Food,
    /// Food past the rainbow level; the index walks the palette as food is eaten.
    Rainbow(usize),
}

impl Tint {
    pub fn glyph(self) -> char {
        match self {
            Tint::Plain => ' ',
            Tint::Corner => CORNER_CHAR,
            Tint::Wall => WALL_CHAR,
            Tint::Head { .. } => HEAD_CHAR,
            Tint::Body { .. } => BODY_CHAR,
            Tint::Food | Tint::Rainbow(_) => FOOD_CHAR,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub length: usize,
    pub foods_eaten: u32,
}

/// Everything needed to draw one tick.
pub struct Frame<'a> {
    pub board: &'a Board,
    pub snake: &'a Snake,
    pub food: Position,
    pub hud: Hud,
    pub paused: bool,
}

/// Full-frame sink. Every call clears and redraws.
pub trait Renderer {
    fn render_frame(&mut self, frame: &Frame<'_>) -> Result<(), TermError>;

    /// Shows free-form text such as menus and the game-over box.
    fn show_screen(&mut self, lines: &[String]) -> Result<(), TermError>;

    /// Drawable area as (columns, rows).
    fn viewport(&self) -> (u16, u16);
}

impl<'a> Frame<'a> {
    /// Text rows of the frame: two HUD lines, the board, a tip line.
    pub fn compose(&self) -> Vec<String> {
        let hud = &self.hud;
        let mut lines = Vec::with_capacity(self.board.height() as usize + HUD_LINES + 1);

        lines.push(format!(
            "| Score: {} | Level: {} | Foods: {} |",
            hud.score, hud.level, hud.foods_eaten
        ));
        lines.push(format!("| Length: {} | Q: Quit | P: Pause |", hud.length));

        for row in 0..self.board.height() {
            let line: String = (0..self.board.width())
                .map(|col| self.tint_at(Position::new(row, col)).glyph())
                .collect();
            lines.push(line);
        }

        lines.push(self.tip().to_string());
        lines
    }

    /// Indices into [`Frame::compose`] that hold board rows. Everything else is text.
    pub fn grid_rows(&self) -> Range<usize> {
        HUD_LINES..HUD_LINES + self.board.height() as usize
    }

    pub fn tint_at(&self, pos: Position) -> Tint {
        let (h, w) = (self.board.height(), self.board.width());
        let corner = (pos.row == 0 || pos.row == h - 1) && (pos.col == 0 || pos.col == w - 1);
        let level = self.hud.level;

        if corner {
            return Tint::Corner;
        }
        if self.board.is_wall(pos) {
            return Tint::Wall;
        }

        match self.snake.index_of(&pos) {
            Some(0) => Tint::Head { highlighted: level >= HIGHLIGHT_HEAD_LEVEL },
            Some(i) => Tint::Body { bright: i < BRIGHT_SEGMENTS },
            None if pos == self.food && level >= RAINBOW_FOOD_LEVEL => {
                Tint::Rainbow(self.hud.foods_eaten as usize % RAINBOW_LEN)
            }
            None if pos == self.food => Tint::Food,
            None => Tint::Plain,
        }
    }

    fn tip(&self) -> &'static str {
        let hud = &self.hud;
        if self.paused {
            "PAUSED - press P or Esc to resume"
        } else if hud.level == 1 && hud.foods_eaten == 0 {
            "TIP: Eat food (*) to grow and score points!"
        } else if hud.level >= 3 {
            "AWESOME: Rainbow food unlocked, keep it up!"
        } else if hud.length > 10 {
            "CAREFUL: Don't hit your own tail!"
        } else {
            "Arrow keys / WASD: Move | Q: Quit"
        }
    }
}

pub fn performance_rating(score: u32) -> &'static str {
    match score {
        200.. => "INCREDIBLE SCORE!",
        100..=199 => "Great job!",
        50..=99 => "Not bad!",
        _ => "Keep practicing!",
    }
}

/// Wraps `lines` in an ASCII box, centering each one. Overlong lines are cut.
pub fn boxed(title: &str, lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len() + 4);
    out.push(format!("+{}+", "=".repeat(BOX_WIDTH)));
    out.push(format!("|{:^width$}|", clip(title), width = BOX_WIDTH));
    out.push(format!("+{}+", "-".repeat(BOX_WIDTH)));
    for line in lines {
        out.push(format!("|{:^width$}|", clip(line), width = BOX_WIDTH));
    }
    out.push(format!("+{}+", "=".repeat(BOX_WIDTH)));
    out
}

fn clip(line: &str) -> String {
    if line.chars().count() <= BOX_WIDTH {
        return line.to_string();
    }

    let mut cut: String = line.chars().take(BOX_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}

pub fn game_over_screen(
    report: &SessionReport,
    top: &[ScoreEntry],
    new_high: bool,
    warning: Option<&str>,
) -> Vec<String> {
    let mut lines = vec![
        report.reason.describe().to_string(),
        String::new(),
        format!("Final Score: {} points", report.score),
        format!("Level Reached: {}", report.level),
        format!("Foods Eaten: {}", report.foods_eaten),
        format!("Snake Length: {}", report.length),
        String::new(),
        performance_rating(report.score).to_string(),
    ];

    if new_high {
        lines.push("NEW HIGH SCORE!".to_string());
    }

    if !top.is_empty() {
        lines.push(String::new());
        lines.push("High Scores".to_string());
        for (i, entry) in top.iter().enumerate() {
            lines.push(format!(
                "{}. {:>5}  {:<6}  {}",
                i + 1,
                entry.score,
                entry.label,
                entry.timestamp
            ));
        }
    }

    if let Some(warning) = warning {
        lines.push(String::new());
        lines.push(format!("Warning: {}", warning));
    }

    lines.push(String::new());
    lines.push("Play again? (y/n)".to_string());

    boxed("GAME OVER!", &lines)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::snake::Direction;
    use crate::state::EndReason;

    /// Keeps every frame as composed text.
    #[derive(Default)]
    pub(crate) struct RecordingRenderer {
        pub(crate) frames: Vec<Vec<String>>,
        pub(crate) screens: Vec<Vec<String>>,
    }

    impl Renderer for RecordingRenderer {
        fn render_frame(&mut self, frame: &Frame<'_>) -> Result<(), TermError> {
            self.frames.push(frame.compose());
            Ok(())
        }

        fn show_screen(&mut self, lines: &[String]) -> Result<(), TermError> {
            self.screens.push(lines.to_vec());
            Ok(())
        }

        fn viewport(&self) -> (u16, u16) {
            (200, 80)
        }
    }

    fn hud() -> Hud {
        Hud { score: 0, level: 1, length: 3, foods_eaten: 0 }
    }

    #[test]
    fn frame_draws_walls_snake_and_food() {
        let board = Board::new(10, 20);
        let snake = Snake::new(Position::new(5, 10), 3, Direction::Right);
        let frame = Frame { board: &board, snake: &snake, food: Position::new(2, 3), hud: hud(), paused: false };
        let lines = frame.compose();

        assert_eq!(lines.len(), 2 + 10 + 1);
        let grid = &lines[2..12];
        assert_eq!(grid[0], format!("+{}+", "#".repeat(18)));
        assert_eq!(grid[5].chars().nth(10), Some(HEAD_CHAR));
        assert_eq!(grid[5].chars().nth(9), Some(BODY_CHAR));
        assert_eq!(grid[5].chars().nth(8), Some(BODY_CHAR));
        assert_eq!(grid[2].chars().nth(3), Some(FOOD_CHAR));
        assert!(grid.iter().all(|row| row.chars().count() == 20));
        assert!(lines[0].contains("Score: 0"));
    }

    #[test]
    fn paused_frame_shows_banner() {
        let board = Board::new(10, 20);
        let snake = Snake::new(Position::new(5, 10), 3, Direction::Right);
        let frame = Frame { board: &board, snake: &snake, food: Position::new(2, 3), hud: hud(), paused: true };
        assert!(frame.compose().last().unwrap().starts_with("PAUSED"));
    }

    #[test]
    fn only_board_rows_are_grid() {
        let board = Board::new(10, 20);
        let snake = Snake::new(Position::new(5, 10), 3, Direction::Right);
        let frame = Frame { board: &board, snake: &snake, food: Position::new(2, 3), hud: hud(), paused: false };
        let lines = frame.compose();

        assert_eq!(frame.grid_rows(), 2..12);
        // HUD and tip text contain glyph characters but sit outside the grid
        assert!(lines[0].contains(BODY_CHAR));
        assert!(lines[12].contains(FOOD_CHAR));
        assert!(!frame.grid_rows().contains(&0));
        assert!(!frame.grid_rows().contains(&1));
        assert!(!frame.grid_rows().contains(&(lines.len() - 1)));
    }

    #[test]
    fn tints_follow_level() {
        let board = Board::new(10, 20);
        let mut snake = Snake::new(Position::new(5, 10), 4, Direction::Right);
        snake.push_head(Position::new(5, 11));
        let food = Position::new(2, 3);

        let low = Frame { board: &board, snake: &snake, food, hud: hud(), paused: false };
        assert_eq!(low.tint_at(Position::new(0, 0)), Tint::Corner);
        assert_eq!(low.tint_at(Position::new(0, 5)), Tint::Wall);
        assert_eq!(low.tint_at(Position::new(5, 11)), Tint::Head { highlighted: false });
        assert_eq!(low.tint_at(Position::new(5, 10)), Tint::Body { bright: true });
        assert_eq!(low.tint_at(Position::new(5, 9)), Tint::Body { bright: true });
        assert_eq!(low.tint_at(Position::new(5, 8)), Tint::Body { bright: false });
        assert_eq!(low.tint_at(food), Tint::Food);
        assert_eq!(low.tint_at(Position::new(3, 3)), Tint::Plain);

        let rainbow = Frame { hud: Hud { level: 3, foods_eaten: 13, ..hud() }, ..low };
        assert_eq!(rainbow.tint_at(food), Tint::Rainbow(1));
        assert_eq!(rainbow.tint_at(Position::new(5, 11)), Tint::Head { highlighted: false });

        let top = Frame { hud: Hud { level: 5, foods_eaten: 20, ..hud() }, ..low };
        assert_eq!(top.tint_at(Position::new(5, 11)), Tint::Head { highlighted: true });
        assert_eq!(top.tint_at(food).glyph(), FOOD_CHAR);
    }

    #[test]
    fn long_warning_keeps_box_aligned() {
        let report = SessionReport { reason: EndReason::SelfHit, score: 10, level: 1, foods_eaten: 1, length: 4 };
        let warning = "failed to access score file: Permission denied (os error 13)";
        let screen = game_over_screen(&report, &[], false, Some(warning));

        assert!(screen.iter().all(|l| l.chars().count() == BOX_WIDTH + 2));
        assert!(screen.iter().any(|l| l.contains("Warning: failed to access score file") && l.contains("...")));
    }

    #[test]
    fn ratings_follow_thresholds() {
        assert_eq!(performance_rating(0), "Keep practicing!");
        assert_eq!(performance_rating(50), "Not bad!");
        assert_eq!(performance_rating(150), "Great job!");
        assert_eq!(performance_rating(200), "INCREDIBLE SCORE!");
    }

    #[test]
    fn game_over_lists_scores_and_warning() {
        let report = SessionReport { reason: EndReason::WallHit, score: 120, level: 3, foods_eaten: 12, length: 15 };
        let top = vec![ScoreEntry { score: 120, label: "Hard".into(), timestamp: "2026-01-01 10:00:00".into() }];
        let screen = game_over_screen(&report, &top, true, Some("could not save"));

        let text = screen.join("\n");
        assert!(text.contains("You hit the wall!"));
        assert!(text.contains("Final Score: 120 points"));
        assert!(text.contains("Great job!"));
        assert!(text.contains("NEW HIGH SCORE!"));
        assert!(text.contains("1.   120  Hard"));
        assert!(text.contains("Warning: could not save"));
        assert!(screen.iter().all(|l| l.chars().count() == BOX_WIDTH + 2));
    }
}
