use anyhow::{Context, Result};

use crate::config::Settings;
use crate::difficulty::Difficulty;
use crate::game::{GameLoop, SessionReport};
use crate::input::InputSource;
use crate::menu::{replay_choice, DifficultyMenu, MenuEvent, ReplayChoice};
use crate::render::{game_over_screen, Renderer};
use crate::scores::ScoreStore;
use crate::state::{EndReason, GameState};

const SHOWN_SCORES: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum AppState {
    Selecting,
    Running(Difficulty),
    GameOver(Difficulty, SessionReport),
    Exit,
}

/// Menu, sessions and the game-over prompt, in a loop until the player leaves.
pub struct App<'a, I, D> {
    input: &'a mut I,
    renderer: &'a mut D,
    settings: &'a Settings,
    scores: ScoreStore,
    last_difficulty: Difficulty,
}

impl<'a, I: InputSource, D: Renderer> App<'a, I, D> {
    pub fn new(input: &'a mut I, renderer: &'a mut D, settings: &'a Settings, scores: ScoreStore) -> Self {
        App {
            input,
            renderer,
            settings,
            scores,
            last_difficulty: settings.start_difficulty.unwrap_or(Difficulty::Medium),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut state = match self.settings.start_difficulty {
            Some(difficulty) => AppState::Running(difficulty),
            None => AppState::Selecting,
        };

        loop {
            state = match state {
                AppState::Selecting => self.select_difficulty()?,
                AppState::Running(difficulty) => self.play(difficulty)?,
                AppState::GameOver(difficulty, report) => self.game_over(difficulty, &report)?,
                AppState::Exit => return Ok(()),
            };
        }
    }

    #[cfg(test)]
    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    fn select_difficulty(&mut self) -> Result<AppState> {
        let mut menu = DifficultyMenu::new(self.last_difficulty);

        loop {
            self.renderer.show_screen(&menu.screen()).context("drawing menu")?;

            match menu.handle(self.input.wait_for_any_key()) {
                MenuEvent::Pending => continue,
                MenuEvent::Chosen(difficulty) => return Ok(AppState::Running(difficulty)),
                MenuEvent::Quit => return Ok(AppState::Exit),
            }
        }
    }

    fn play(&mut self, difficulty: Difficulty) -> Result<AppState> {
        let (cols, rows) = self.renderer.viewport();
        let board = difficulty.board_for_viewport(cols, rows);
        log::info!("Starting {} game on {}x{} board", difficulty, board.height(), board.width());

        self.last_difficulty = difficulty;
        let mut state = GameState::new(board, self.settings.scoring);
        let report = GameLoop::new(&mut *self.input, &mut *self.renderer, self.settings.timing(difficulty))
            .run(&mut state)
            .context("running game")?;

        Ok(AppState::GameOver(difficulty, report))
    }

    fn game_over(&mut self, difficulty: Difficulty, report: &SessionReport) -> Result<AppState> {
        let new_high = self.scores.is_new_high(report.score);
        self.scores.record(report.score, difficulty.label());

        if report.reason == EndReason::Interrupted {
            return Ok(AppState::Exit);
        }

        let screen = game_over_screen(report, self.scores.top_n(SHOWN_SCORES), new_high, self.scores.warning());
        self.renderer.show_screen(&screen).context("drawing game over")?;

        loop {
            match replay_choice(self.input.wait_for_any_key()) {
                Some(ReplayChoice::Restart) => return Ok(AppState::Selecting),
                Some(ReplayChoice::Exit) => return Ok(AppState::Exit),
                None => continue,
            }
        }
    }
}
