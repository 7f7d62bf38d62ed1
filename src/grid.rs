use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width and height of the square board, in cells.
pub const BOARD_SIZE: u16 = 20;

/// A cell on the board. Both coordinates are always in `0..BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub const fn new(x: u16, y: u16) -> Self {
        Position { x, y }
    }

    /// The neighbouring cell in `direction`, re-entering from the opposite
    /// edge when the move leaves the board.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Position {
            x: wrap(self.x, dx),
            y: wrap(self.y, dy),
        }
    }

    /// A uniformly random cell of the board.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Position {
            x: rng.gen_range(0..BOARD_SIZE),
            y: rng.gen_range(0..BOARD_SIZE),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit vector `(dx, dy)`; `y` grows downward like terminal rows.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDirectionError {
    #[error("empty direction")]
    Empty,
    #[error("unknown direction `{0}`, expected up, down, left or right")]
    Unknown(String),
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseDirectionError::Empty);
        }
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError::Unknown(s.to_string())),
        }
    }
}

/// Moves `coord` by `delta` on the torus, always landing in `0..BOARD_SIZE`.
pub fn wrap(coord: u16, delta: i32) -> u16 {
    // rem_euclid is a floor modulo, so negative sums come back positive
    (i32::from(coord) + delta).rem_euclid(i32::from(BOARD_SIZE)) as u16
}

pub fn occupied_by<'a, I>(position: Position, segments: I) -> bool
where
    I: IntoIterator<Item = &'a Position>,
{
    segments.into_iter().any(|segment| *segment == position)
}
