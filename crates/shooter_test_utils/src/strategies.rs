//! Proptest strategies.
//!
//! These strategies generate random but reproducible inputs for
//! property-based testing of movement and collisions.

use proptest::prelude::*;
use shooter_core::point::{Direction, Point};

/// Any direction, "stay" included.
pub fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::None),
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

/// A sequence of directions for scripted movement.
pub fn arb_direction_sequence(max_len: usize) -> impl Strategy<Value = Vec<Direction>> {
    proptest::collection::vec(arb_direction(), 0..max_len)
}

/// A point within `radius` cells of the origin on both axes.
pub fn arb_point(radius: i32) -> impl Strategy<Value = Point> {
    (-radius..=radius, -radius..=radius).prop_map(|(x, y)| Point::new(x, y))
}
