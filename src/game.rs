use std::thread::sleep;

use rand::Rng;

use crate::difficulty::TickTiming;
use crate::error::TermError;
use crate::input::{Command, InputSource};
use crate::render::{Frame, Hud, Renderer};
use crate::state::{EndReason, GameState, Step};

/// Final figures of a finished session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionReport {
    pub reason: EndReason,
    pub score: u32,
    pub level: u32,
    pub foods_eaten: u32,
    pub length: usize,
}

impl SessionReport {
    fn from_state<R>(state: &GameState<R>, reason: EndReason) -> Self {
        SessionReport {
            reason,
            score: state.score(),
            level: state.level(),
            foods_eaten: state.foods_eaten(),
            length: state.snake().len(),
        }
    }
}

/// Drives one session: poll, apply, step, render, sleep.
pub struct GameLoop<'a, I, D> {
    input: &'a mut I,
    renderer: &'a mut D,
    timing: TickTiming,
    paused: bool,
}

impl<'a, I: InputSource, D: Renderer> GameLoop<'a, I, D> {
    pub fn new(input: &'a mut I, renderer: &'a mut D, timing: TickTiming) -> Self {
        GameLoop { input, renderer, timing, paused: false }
    }

    /// Runs ticks until the session ends.
    pub fn run<R: Rng>(&mut self, state: &mut GameState<R>) -> Result<SessionReport, TermError> {
        self.render(state)?;

        loop {
            if let Some(reason) = self.tick(state)? {
                log::info!(
                    "Session ended: {:?}, score {}, length {}",
                    reason,
                    state.score(),
                    state.snake().len()
                );
                return Ok(SessionReport::from_state(state, reason));
            }

            sleep(self.timing.interval(state.direction()));
        }
    }

    /// One tick. Returns the end reason once the session is over.
    fn tick<R: Rng>(&mut self, state: &mut GameState<R>) -> Result<Option<EndReason>, TermError> {
        // At most one key per tick; the rest wait for later ticks
        if let Some(cmd) = self.input.poll_key().and_then(Command::from_key) {
            match cmd {
                Command::Turn(dir) if !self.paused => state.apply_direction(dir),
                Command::Turn(_) => {}
                Command::TogglePause => {
                    self.paused = !self.paused;
                    self.render(state)?;
                }
                Command::Quit => state.quit(EndReason::UserQuit),
                Command::Interrupt => state.quit(EndReason::Interrupted),
            }
        }

        if let Some(reason) = state.end_reason() {
            return Ok(Some(reason));
        }

        if self.paused {
            return Ok(None);
        }

        let step = state.step();
        self.render(state)?;

        match step {
            Step::Ended(reason) => Ok(Some(reason)),
            Step::Moved | Step::Ate => Ok(None),
        }
    }

    fn render<R>(&mut self, state: &GameState<R>) -> Result<(), TermError> {
        let frame = Frame {
            board: state.board(),
            snake: state.snake(),
            food: state.food(),
            hud: Hud {
                score: state.score(),
                level: state.level(),
                length: state.snake().len(),
                foods_eaten: state.foods_eaten(),
            },
            paused: self.paused,
        };

        self.renderer.render_frame(&frame)
    }
}
