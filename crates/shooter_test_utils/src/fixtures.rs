//! Test fixtures and helpers.
//!
//! Pre-built maps and engine configurations for consistent testing.

use shooter_core::config::{EngineConfig, Timings};
use shooter_core::entities::{Actor, EntityId};
use shooter_core::map::GameMap;
use shooter_core::point::Point;
use shooter_core::strategy::BotStrategy;

/// ID of the actor created by [`player`] and the single-player configs.
pub const PLAYER_ID: EntityId = 1;

/// 8x8 arena with two spawn points and a few interior walls.
///
/// Spawn points sit at `(-1, -1)` and `(2, 2)`; `(0, 1)` is a wall.
pub const ARENA_ROWS: [&str; 8] = [
    "████████",
    "█      █",
    "█    █ █",
    "█  S   █",
    "██     █",
    "█   █  █",
    "█     S█",
    "████████",
];

/// 8x8 bordered room with a single spawn point at `(2, -2)`.
///
/// The open interior spans `-3..=2` on both axes.
pub const ROOM_ROWS: [&str; 8] = [
    "████████",
    "█      █",
    "█     S█",
    "█      █",
    "█      █",
    "█      █",
    "█      █",
    "████████",
];

/// 8x5 map with a single spawn point at `(-1, 1)`.
pub const RECTANGLE_ROWS: [&str; 5] = [
    "████████",
    "█      █",
    "█    █ █",
    "█  S   █",
    "████████",
];

/// Build a map from fixture rows.
///
/// # Panics
///
/// Panics if the rows are ragged; fixtures never are.
#[must_use]
pub fn map(rows: &[&str]) -> GameMap {
    GameMap::from_rows(rows).expect("fixture maps are rectangular")
}

/// The two-spawn arena.
#[must_use]
pub fn arena() -> GameMap {
    map(&ARENA_ROWS)
}

/// The single-spawn bordered room.
#[must_use]
pub fn room() -> GameMap {
    map(&ROOM_ROWS)
}

/// A bordered `width` x `height` map with spawn points at the given grid
/// cells (column, row; origin at the top-left corner).
#[must_use]
pub fn bordered(width: usize, height: usize, spawns: &[(usize, usize)]) -> GameMap {
    let rows: Vec<String> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    if spawns.contains(&(x, y)) {
                        'S'
                    } else if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                        '█'
                    } else {
                        ' '
                    }
                })
                .collect()
        })
        .collect();
    map(&rows.iter().map(String::as_str).collect::<Vec<_>>())
}

/// The default player at `position`.
#[must_use]
pub fn player(position: Point) -> Actor {
    Actor::new(PLAYER_ID, "TestActor", position)
}

/// Single player at the origin plus the given strategies on `map`.
#[must_use]
pub fn config(map: GameMap, strategies: Vec<BotStrategy>) -> EngineConfig {
    EngineConfig::new(map)
        .with_actors(vec![player(Point::ORIGIN)])
        .with_bots(strategies)
        .with_seed(7)
}

/// Arena with two idle bots.
#[must_use]
pub fn idle_arena() -> EngineConfig {
    config(arena(), vec![BotStrategy::Idle; 2])
}

/// Timings scaled down so tests need less simulated time.
#[must_use]
pub fn fast_timings() -> Timings {
    Timings {
        patrol_ms: 20,
        fire_ms: 30,
        combined_patrol_ms: 20,
        combined_fire_ms: 90,
        projectile_tick_ms: 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shooter_core::map::MapElement;

    #[test]
    fn test_bordered_map_layout() {
        let m = bordered(5, 4, &[(2, 1)]);
        assert_eq!(m.dimensions(), (5, 4));
        assert_eq!(m.spawn_points(), vec![Point::new(0, -1)]);
        let elements = m.elements_by_kind();
        assert_eq!(elements.count(MapElement::Wall), 14);
        assert_eq!(elements.count(MapElement::None), 5);
    }

    #[test]
    fn test_fixture_spawns() {
        assert_eq!(
            arena().spawn_points(),
            vec![Point::new(-1, -1), Point::new(2, 2)]
        );
        assert_eq!(room().spawn_points(), vec![Point::new(2, -2)]);
        assert_eq!(map(&RECTANGLE_ROWS).spawn_points(), vec![Point::new(-1, 1)]);
    }
}
