//! Engine construction options.
//!
//! An [`EngineConfig`] can be built in code or loaded from RON:
//!
//! ```ron
//! (
//!     map: [
//!         "█████",
//!         "█ S █",
//!         "█   █",
//!         "█████",
//!     ],
//!     actors: [(id: 1, name: "Ramon", position: (x: 0, y: 0), life: 3)],
//!     bots: [PatrolAndFire],
//!     seed: Some(42),
//! )
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::ACTION_QUEUE_CAPACITY;
use crate::entities::Actor;
use crate::error::{Result, ShooterError};
use crate::map::GameMap;
use crate::strategy::BotStrategy;

/// Timer periods for background tasks, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Movement period for [`BotStrategy::Patrol`].
    pub patrol_ms: u64,
    /// Fire period for [`BotStrategy::Fire`].
    pub fire_ms: u64,
    /// Movement period for [`BotStrategy::PatrolAndFire`].
    pub combined_patrol_ms: u64,
    /// Fire period for [`BotStrategy::PatrolAndFire`].
    pub combined_fire_ms: u64,
    /// Time for a projectile to travel one cell.
    pub projectile_tick_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            patrol_ms: 200,
            fire_ms: 300,
            combined_patrol_ms: 200,
            combined_fire_ms: 900,
            projectile_tick_ms: 16,
        }
    }
}

/// Longest accepted timer period: one day.
pub const MAX_PERIOD_MS: u64 = 86_400_000;

impl Timings {
    /// Reject periods the task timers cannot run with.
    ///
    /// Every period must be at least 1 ms and at most [`MAX_PERIOD_MS`].
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("patrol_ms", self.patrol_ms),
            ("fire_ms", self.fire_ms),
            ("combined_patrol_ms", self.combined_patrol_ms),
            ("combined_fire_ms", self.combined_fire_ms),
            ("projectile_tick_ms", self.projectile_tick_ms),
        ];
        match periods
            .into_iter()
            .find(|(_, ms)| *ms == 0 || *ms > MAX_PERIOD_MS)
        {
            Some((name, value_ms)) => Err(ShooterError::InvalidTiming { name, value_ms }),
            None => Ok(()),
        }
    }

    /// Movement period for patrolling bots.
    #[must_use]
    pub const fn patrol(&self) -> Duration {
        Duration::from_millis(self.patrol_ms)
    }

    /// Fire period for firing bots.
    #[must_use]
    pub const fn fire(&self) -> Duration {
        Duration::from_millis(self.fire_ms)
    }

    /// Movement period for patrol-and-fire bots.
    #[must_use]
    pub const fn combined_patrol(&self) -> Duration {
        Duration::from_millis(self.combined_patrol_ms)
    }

    /// Fire period for patrol-and-fire bots.
    #[must_use]
    pub const fn combined_fire(&self) -> Duration {
        Duration::from_millis(self.combined_fire_ms)
    }

    /// Projectile step period.
    #[must_use]
    pub const fn projectile_tick(&self) -> Duration {
        Duration::from_millis(self.projectile_tick_ms)
    }
}

fn default_queue_capacity() -> usize {
    ACTION_QUEUE_CAPACITY
}

/// Everything needed to build an [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Playing grid.
    #[serde(default)]
    pub map: GameMap,
    /// Initial actor table.
    #[serde(default)]
    pub actors: Vec<Actor>,
    /// One strategy per map spawn point, in row-major spawn order.
    #[serde(default)]
    pub bots: Vec<BotStrategy>,
    /// Task timer periods.
    #[serde(default)]
    pub timings: Timings,
    /// Seed for bot randomness. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Action queue capacity.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            map: GameMap::default(),
            actors: Vec::new(),
            bots: Vec::new(),
            timings: Timings::default(),
            seed: None,
            queue_capacity: ACTION_QUEUE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Start a configuration for `map`.
    #[must_use]
    pub fn new(map: GameMap) -> Self {
        Self {
            map,
            ..Self::default()
        }
    }

    /// Replace the playing grid.
    #[must_use]
    pub fn with_map(mut self, map: GameMap) -> Self {
        self.map = map;
        self
    }

    /// Seed the actor table.
    #[must_use]
    pub fn with_actors(mut self, actors: Vec<Actor>) -> Self {
        self.actors = actors;
        self
    }

    /// Set the per-spawn-point strategies.
    #[must_use]
    pub fn with_bots(mut self, bots: Vec<BotStrategy>) -> Self {
        self.bots = bots;
        self
    }

    /// Override task timer periods.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Make bot behaviour reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the action queue capacity.
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Parse a configuration from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        Ok(ron::from_str(ron)?)
    }

    /// Load a configuration from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    const CONFIG: &str = r#"(
        map: [
            "█████",
            "█ S █",
            "█   █",
            "█████",
        ],
        actors: [(id: 1, name: "Ramon", position: (x: 0, y: 0), life: 5)],
        bots: [PatrolAndFire],
        timings: (fire_ms: 50),
        seed: Some(42),
    )"#;

    #[test]
    fn test_parse_full_config() {
        let config = EngineConfig::from_ron_str(CONFIG).unwrap();
        assert_eq!(config.map.dimensions(), (5, 4));
        assert_eq!(config.actors[0].name, "Ramon");
        assert_eq!(config.actors[0].life, 5);
        assert_eq!(config.actors[0].position, Point::ORIGIN);
        assert_eq!(config.bots, vec![BotStrategy::PatrolAndFire]);
        assert_eq!(config.timings.fire_ms, 50);
        // Unset timings keep their defaults.
        assert_eq!(config.timings.patrol_ms, 200);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.queue_capacity, ACTION_QUEUE_CAPACITY);
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_ron_str("()").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.map.is_empty());

        let timings = Timings::default();
        assert_eq!(timings.patrol(), Duration::from_millis(200));
        assert_eq!(timings.fire(), Duration::from_millis(300));
        assert_eq!(timings.combined_patrol(), Duration::from_millis(200));
        assert_eq!(timings.combined_fire(), Duration::from_millis(900));
        assert_eq!(timings.projectile_tick(), Duration::from_millis(16));
    }

    #[test]
    fn test_ragged_map_is_parse_error() {
        let err = EngineConfig::from_ron_str(r#"(map: ["███", "█"])"#).unwrap_err();
        assert!(matches!(err, ShooterError::ConfigParse(_)));
        assert!(err.to_string().contains("map row 1"));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EngineConfig::load("/definitely/not/here.ron"),
            Err(ShooterError::Io(_))
        ));
    }

    #[test]
    fn test_timings_validation() {
        assert!(Timings::default().validate().is_ok());

        let zero_tick = Timings {
            projectile_tick_ms: 0,
            ..Timings::default()
        };
        assert!(matches!(
            zero_tick.validate(),
            Err(ShooterError::InvalidTiming {
                name: "projectile_tick_ms",
                value_ms: 0
            })
        ));

        let huge_patrol = Timings {
            patrol_ms: u64::MAX,
            ..Timings::default()
        };
        let err = huge_patrol.validate().unwrap_err();
        assert!(err.to_string().contains("patrol_ms"));

        let longest = Timings {
            fire_ms: MAX_PERIOD_MS,
            ..Timings::default()
        };
        assert!(longest.validate().is_ok());
    }
}
