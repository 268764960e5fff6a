//! # Shooter Core
//!
//! Real-time simulation core for a terminal spaceship shooter.
//!
//! The engine owns the authoritative game state and is driven entirely by
//! background tasks:
//! - one consumer task applying queued [`actions::Action`]s in order,
//! - one or two behaviour tasks per bot,
//! - one travel task per projectile in flight.
//!
//! Rendering and keyboard input are external: they read engine state through
//! the read surface on [`engine::Engine`] and write actions into its queue.
//!
//! ## Crate Structure
//!
//! - [`map`] - Playing grid and cell classification
//! - [`entities`] - Actor, bot and projectile records
//! - [`actions`] - Queued commands and projectile travel
//! - [`strategy`] - Bot behaviour loops
//! - [`collision`] - Hit resolution and scoring
//! - [`engine`] - Engine core and scheduler
//! - [`config`] - Construction options

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod actions;
pub mod collision;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod map;
pub mod point;
pub mod strategy;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::actions::Action;
    pub use crate::config::{EngineConfig, Timings};
    pub use crate::engine::{Engine, EngineState, MatchState, Snapshot};
    pub use crate::entities::{Actor, Bot, EntityId, Origin, Projectile};
    pub use crate::error::{Result, ShooterError};
    pub use crate::map::{GameMap, MapElement, MapElements};
    pub use crate::point::{Direction, Point};
    pub use crate::strategy::BotStrategy;
}
