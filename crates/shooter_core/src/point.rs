//! Grid coordinates and movement directions.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Integer grid coordinate, relative to the map center.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Point {
    /// Column offset from the center.
    pub x: i32,
    /// Row offset from the center (down is positive).
    pub y: i32,
}

impl Point {
    /// The map center.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step along `direction`.
    ///
    /// [`Direction::None`] returns the point unchanged. Coordinates saturate
    /// at the `i32` range, so a step off the edge stays put.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::None => self,
            Direction::Up => Self::new(self.x, self.y.saturating_sub(1)),
            Direction::Down => Self::new(self.x, self.y.saturating_add(1)),
            Direction::Left => Self::new(self.x.saturating_sub(1), self.y),
            Direction::Right => Self::new(self.x.saturating_add(1), self.y),
        }
    }
}

/// One of the four grid directions, or no movement at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Stay in place.
    #[default]
    None,
    /// Towards negative y.
    Up,
    /// Towards positive y.
    Down,
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

impl Direction {
    /// Every direction, including [`Direction::None`].
    pub const ALL: [Self; 5] = [Self::None, Self::Up, Self::Down, Self::Left, Self::Right];

    /// The four directions that actually move.
    pub const HEADINGS: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Uniform draw over all five outcomes, "stay" included.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Whether stepping in this direction changes position.
    #[must_use]
    pub const fn is_moving(self) -> bool {
        !matches!(self, Self::None)
    }
}
