use rand::rngs::ThreadRng;
use rand::Rng;

use crate::board::Board;
use crate::snake::{Direction, Position, Snake, INITIAL_SNAKE_LENGTH};

const BASE_FOOD_POINTS: u32 = 10;
const LEVEL_BONUS_POINTS: u32 = 2;
const FOODS_PER_LEVEL: u32 = 5;

/// How many points a food is worth.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ScoringPolicy {
    /// 10 points per food.
    #[default]
    Flat,
    /// `10 + (level - 1) * 2` points per food.
    LevelBonus,
}

impl ScoringPolicy {
    pub fn points(self, level: u32) -> u32 {
        match self {
            ScoringPolicy::Flat => BASE_FOOD_POINTS,
            ScoringPolicy::LevelBonus => BASE_FOOD_POINTS + level.saturating_sub(1) * LEVEL_BONUS_POINTS,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndReason {
    WallHit,
    SelfHit,
    UserQuit,
    Interrupted,
    /// No free cell left for food.
    BoardFull,
}

impl EndReason {
    pub fn describe(self) -> &'static str {
        match self {
            EndReason::WallHit => "You hit the wall!",
            EndReason::SelfHit => "You bit your own tail!",
            EndReason::UserQuit => "You quit.",
            EndReason::Interrupted => "Interrupted.",
            EndReason::BoardFull => "You filled the board. You won!",
        }
    }
}

/// Result of a single [`GameState::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Moved,
    Ate,
    Ended(EndReason),
}

/// One game session's worth of state.
#[derive(Clone, Debug)]
pub struct GameState<R = ThreadRng> {
    board: Board,
    snake: Snake,
    food: Position,
    direction: Direction,
    next_direction: Direction,
    score: u32,
    running: bool,
    level: u32,
    foods_eaten: u32,
    scoring: ScoringPolicy,
    end_reason: Option<EndReason>,
    rng: R,
}

impl GameState<ThreadRng> {
    pub fn new(board: Board, scoring: ScoringPolicy) -> Self {
        GameState::new_with_rng(board, scoring, rand::thread_rng())
    }
}

impl<R: Rng> GameState<R> {
    /// Fresh session: a 3-segment snake centred on the board, heading right.
    pub fn new_with_rng(board: Board, scoring: ScoringPolicy, rng: R) -> Self {
        let snake = Snake::new(board.center(), INITIAL_SNAKE_LENGTH, Direction::Right);
        GameState::with_snake(board, snake, Direction::Right, scoring, rng)
    }

    /// Session starting from an arbitrary snake. Food is placed immediately.
    pub fn with_snake(board: Board, snake: Snake, direction: Direction, scoring: ScoringPolicy, mut rng: R) -> Self {
        let food = board.place_food(&snake, &mut rng);
        let mut state = GameState {
            board,
            snake,
            food: food.unwrap_or_else(|| board.center()),
            direction,
            next_direction: direction,
            score: 0,
            running: true,
            level: 1,
            foods_eaten: 0,
            scoring,
            end_reason: None,
            rng,
        };

        if food.is_none() {
            state.finish(EndReason::BoardFull);
        }

        state
    }

    /// Queues `requested` for the next step unless it reverses the current heading.
    pub fn apply_direction(&mut self, requested: Direction) {
        if requested != self.direction.opposite() {
            self.next_direction = requested;
        }
    }

    /// Advances the snake by one cell.
    pub fn step(&mut self) -> Step {
        if !self.running {
            return Step::Ended(self.end_reason.unwrap_or(EndReason::UserQuit));
        }

        self.direction = self.next_direction;
        let new_head = self.snake.head().offset(self.direction);

        if self.board.is_wall(new_head) {
            return self.finish(EndReason::WallHit);
        }

        // The tail has not moved yet, so running into it counts
        if self.snake.contains(&new_head) {
            return self.finish(EndReason::SelfHit);
        }

        self.snake.push_head(new_head);

        if new_head != self.food {
            self.snake.pop_tail();
            return Step::Moved;
        }

        self.score += self.scoring.points(self.level);
        self.foods_eaten += 1;
        if self.foods_eaten % FOODS_PER_LEVEL == 0 {
            self.level += 1;
        }

        match self.board.place_food(&self.snake, &mut self.rng) {
            Some(food) => {
                self.food = food;
                Step::Ate
            }
            None => self.finish(EndReason::BoardFull),
        }
    }

    /// Ends the session without a collision.
    pub fn quit(&mut self, reason: EndReason) {
        if self.running {
            self.finish(reason);
        }
    }

    fn finish(&mut self, reason: EndReason) -> Step {
        self.running = false;
        self.end_reason = Some(reason);
        Step::Ended(reason)
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Position) {
        self.food = food;
    }
}

impl<R> GameState<R> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn foods_eaten(&self) -> u32 {
        self.foods_eaten
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }
}
