//! Error types for the shooter engine.

use thiserror::Error;

use crate::entities::EntityId;

/// Result type alias using [`ShooterError`].
pub type Result<T> = std::result::Result<T, ShooterError>;

/// Top-level error type for engine construction and action ingestion.
///
/// Gameplay edge cases (acting on an entity that was removed concurrently)
/// are not errors; they are applied as silent no-ops.
#[derive(Debug, Error)]
pub enum ShooterError {
    /// The number of bot strategies does not match the map's spawn points.
    #[error("expected {expected} bots but received {received}")]
    BotCountMismatch {
        /// Number of spawn points on the map.
        expected: usize,
        /// Number of strategies supplied.
        received: usize,
    },

    /// A map row has a different length than the first row.
    #[error("map row {row} has {found} cells, expected {expected}")]
    RaggedMap {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },

    /// A timer period is zero or too large to schedule.
    #[error("timer period {name} = {value_ms} ms is out of range")]
    InvalidTiming {
        /// Name of the offending `Timings` field.
        name: &'static str,
        /// Configured value in milliseconds.
        value_ms: u64,
    },

    /// Two actors were configured with the same identifier.
    #[error("duplicate actor ID: {0}")]
    DuplicateActor(EntityId),

    /// `Engine::start` was called more than once.
    #[error("engine already started")]
    AlreadyStarted,

    /// The action queue is at capacity.
    #[error("action queue is full")]
    QueueFull,

    /// The action queue consumer is gone.
    #[error("action queue is closed")]
    QueueClosed,

    /// Failed to parse a RON configuration.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// Failed to read a configuration file.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_count_mismatch_names_both_counts() {
        let err = ShooterError::BotCountMismatch {
            expected: 2,
            received: 1,
        };
        assert_eq!(err.to_string(), "expected 2 bots but received 1");
    }
}
