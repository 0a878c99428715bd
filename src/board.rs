use rand::seq::SliceRandom;
use rand::Rng;

use crate::snake::{Position, Snake};

pub const MIN_HEIGHT: i32 = 10;
pub const MIN_WIDTH: i32 = 20;

const FOOD_ATTEMPTS: usize = 100;
const SAFE_ZONE_MARGIN: i32 = 2;
const MIN_FOOD_DISTANCE: i32 = 3;

/// Playing field. The outer ring of cells is wall.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    height: i32,
    width: i32,
}

impl Board {
    pub fn new(height: i32, width: i32) -> Self {
        Board { height, width }
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn center(&self) -> Position {
        Position::new(self.height / 2, self.width / 2)
    }

    /// True for the outer ring and anything beyond it.
    pub fn is_wall(&self, pos: Position) -> bool {
        pos.row <= 0 || pos.row >= self.height - 1 || pos.col <= 0 || pos.col >= self.width - 1
    }

    pub fn interior_cells(&self) -> usize {
        ((self.height - 2).max(0) * (self.width - 2).max(0)) as usize
    }

    /// Picks a food cell not covered by `snake`.
    ///
    /// Random attempts come first: the first half inside the safe zone, the
    /// second half anywhere in the interior, each accepted only when at least
    /// [`MIN_FOOD_DISTANCE`] away from the head. When all attempts miss, a
    /// free interior cell is chosen uniformly. Returns `None` only when the
    /// snake covers the whole interior.
    pub fn place_food<R: Rng + ?Sized>(&self, snake: &Snake, rng: &mut R) -> Option<Position> {
        let head = snake.head();
        let safe = (
            SAFE_ZONE_MARGIN,
            self.height - SAFE_ZONE_MARGIN - 1,
            SAFE_ZONE_MARGIN,
            self.width - SAFE_ZONE_MARGIN - 1,
        );
        let interior = (1, self.height - 2, 1, self.width - 2);

        for attempt in 0..FOOD_ATTEMPTS {
            let safe_usable = safe.0 <= safe.1 && safe.2 <= safe.3;
            let (top, bottom, left, right) = if attempt < FOOD_ATTEMPTS / 2 && safe_usable {
                safe
            } else {
                interior
            };

            if top > bottom || left > right {
                break;
            }

            let pos = Position::new(rng.gen_range(top..=bottom), rng.gen_range(left..=right));
            if !snake.contains(&pos) && pos.manhattan(head) >= MIN_FOOD_DISTANCE {
                return Some(pos);
            }
        }

        log::debug!("food placement fell back to free-cell scan");
        self.free_cells(snake).choose(rng).copied()
    }

    fn free_cells(&self, snake: &Snake) -> Vec<Position> {
        let mut cells = Vec::with_capacity(self.interior_cells());

        for row in 1..self.height - 1 {
            for col in 1..self.width - 1 {
                let pos = Position::new(row, col);
                if !snake.contains(&pos) {
                    cells.push(pos);
                }
            }
        }

        cells
    }
}
