//! Entity records: actors, bots and projectiles.
//!
//! Entities are plain values addressed by [`EntityId`]. The engine keeps them
//! in ID-keyed tables and hands out copies to readers.

use serde::{Deserialize, Serialize};

use crate::point::{Direction, Point};
use crate::strategy::BotStrategy;

/// Unique identifier for entities.
pub type EntityId = u64;

/// Starting life for a player actor unless configured otherwise.
pub const DEFAULT_ACTOR_LIFE: i32 = 3;

/// Starting life for every bot.
pub const BOT_LIFE: i32 = 4;

/// A human-controlled player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier, supplied by the caller.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Current position.
    pub position: Point,
    /// Remaining life. The match is lost once this reaches zero.
    #[serde(default = "default_actor_life")]
    pub life: i32,
}

fn default_actor_life() -> i32 {
    DEFAULT_ACTOR_LIFE
}

impl Actor {
    /// Create an actor with [`DEFAULT_ACTOR_LIFE`].
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>, position: Point) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            life: DEFAULT_ACTOR_LIFE,
        }
    }

    /// Override the starting life.
    #[must_use]
    pub fn with_life(mut self, life: i32) -> Self {
        self.life = life;
        self
    }

    /// Whether the actor still has life left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// An AI-controlled enemy with a fixed strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    /// Unique identifier, allocated by the engine.
    pub id: EntityId,
    /// Remaining life. The bot is removed at zero.
    pub life: i32,
    /// Current position.
    pub position: Point,
    /// Behaviour policy, fixed at spawn.
    pub strategy: BotStrategy,
}

impl Bot {
    /// Create a bot with [`BOT_LIFE`].
    #[must_use]
    pub const fn new(id: EntityId, position: Point, strategy: BotStrategy) -> Self {
        Self {
            id,
            life: BOT_LIFE,
            position,
            strategy,
        }
    }

    /// Whether the bot still has life left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// Who fired a projectile. Projectiles only hurt the opposing side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Origin not known; collides with walls only.
    #[default]
    Unknown,
    /// Fired by a player actor; hits bots.
    Player,
    /// Fired by a bot; hits actors.
    Bot,
}

/// A projectile in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    /// Unique identifier, allocated by the engine.
    pub id: EntityId,
    /// Current position.
    pub position: Point,
    /// Fixed travel direction.
    pub direction: Direction,
    /// Side that fired it.
    pub origin: Origin,
}
