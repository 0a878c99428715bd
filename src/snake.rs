use std::collections::VecDeque;

use Direction::*;

/// Grid cell as (row, column). Row grows downwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    pub fn offset(self, dir: Direction) -> Self {
        let (dy, dx) = dir.delta();
        Position::new(self.row + dy, self.col + dx)
    }

    pub fn manhattan(self, other: Position) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step as (dy, dx).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }
}

/// Snake body, head first. Segments never overlap.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
}

pub const INITIAL_SNAKE_LENGTH: usize = 3;

impl Snake {
    /// Straight snake whose head sits at `head`, trailing away from `direction`.
    pub fn new(head: Position, size: usize, direction: Direction) -> Self {
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(size);
        let mut pos = head;

        for _ in 0..size {
            body.push_back(pos);
            pos = pos.offset(back);
        }

        Snake { body }
    }

    /// Builds a snake from explicit segments, head first.
    #[cfg(test)]
    pub fn from_segments<I: IntoIterator<Item = Position>>(segments: I) -> Self {
        Snake { body: segments.into_iter().collect() }
    }

    pub fn head(&self) -> Position {
        // Constructors never yield an empty body
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[cfg(test)]
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.body.contains(pos)
    }

    /// Segment index of `pos`, 0 being the head.
    pub fn index_of(&self, pos: &Position) -> Option<usize> {
        self.body.iter().position(|p| p == pos)
    }

    pub fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    pub fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }
}
