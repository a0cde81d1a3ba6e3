use std::collections::VecDeque;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub fn new(x: i16, y: i16) -> Self {
        Position { x, y }
    }

    /// The neighbouring cell one step in `direction`.
    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector for this direction, y grows downwards.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Maps a DOM `KeyboardEvent.key` identifier to a direction.
    /// Anything other than the four arrow keys yields `None`.
    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Snake body, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VecDeque<Position>", into = "VecDeque<Position>")]
pub struct Snake {
    body: VecDeque<Position>,
}

impl TryFrom<VecDeque<Position>> for Snake {
    type Error = &'static str;

    fn try_from(body: VecDeque<Position>) -> Result<Self, Self::Error> {
        Snake::from_segments(body).ok_or("snake body must not be empty")
    }
}

impl From<Snake> for VecDeque<Position> {
    fn from(snake: Snake) -> Self {
        snake.body
    }
}

impl Snake {
    pub fn new(start: Position) -> Self {
        Snake { body: VecDeque::from([start]) }
    }

    /// Builds a snake from explicit segments, head first.
    /// Returns `None` for an empty body.
    pub fn from_segments(segments: impl IntoIterator<Item = Position>) -> Option<Self> {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Snake { body })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Segment right behind the head, if the snake is longer than one cell.
    pub fn neck(&self) -> Option<Position> {
        self.body.get(1).copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains_point(&self, point: &Position) -> bool {
        self.body.contains(point)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub(crate) fn push_head(&mut self, head: Position) {
        self.body.push_front(head);
    }

    pub(crate) fn drop_tail(&mut self) -> Option<Position> {
        // keep at least the head
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }
}
