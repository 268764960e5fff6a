//! Match runner.

use std::time::Duration;

use serde::Serialize;
use shooter_core::prelude::*;
use thiserror::Error;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::autopilot::Autopilot;

/// Built-in match: the 40x40 arena with eight bots and one player.
pub const DEFAULT_MATCH: &str = include_str!("../assets/arena.ron");

/// Error type for headless runs.
#[derive(Error, Debug)]
pub enum RunError {
    /// Engine construction or queue failure.
    #[error("Engine error: {0}")]
    Shooter(#[from] ShooterError),
    /// The autopilot was pointed at an actor that is not in the match.
    #[error("Autopilot actor {0} is not in the match")]
    MissingActor(EntityId),
    /// Failed to encode the report.
    #[error("Failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
    /// Runtime or output failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for one headless run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Time limit for the match.
    pub duration: Duration,
    /// Actor driven by the autopilot, if any.
    pub autopilot: Option<EntityId>,
    /// How often the runner checks the match and the autopilot acts.
    pub turn: Duration,
    /// Seed for the autopilot.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(10),
            autopilot: None,
            turn: Duration::from_millis(100),
            seed: None,
        }
    }
}

/// Result of a headless run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// How the match stood when the run ended.
    pub outcome: MatchState,
    /// Time the run took, in milliseconds.
    pub elapsed_ms: u64,
    /// Actions queued by the autopilot.
    pub autopilot_actions: u64,
    /// Final engine state.
    pub snapshot: Snapshot,
}

/// Run one match until it is decided or `run.duration` elapses.
///
/// A completed level is scored with [`Engine::award_points`] before the
/// final snapshot is taken.
pub async fn run_match(config: EngineConfig, run: &RunConfig) -> std::result::Result<RunReport, RunError> {
    let engine = Engine::new(config)?;

    let mut pilot = match run.autopilot {
        Some(id) if engine.actor(id).is_none() => return Err(RunError::MissingActor(id)),
        Some(id) => Some(Autopilot::new(id, run.seed)),
        None => None,
    };

    engine.start()?;
    tracing::info!(
        duration_ms = run.duration.as_millis() as u64,
        autopilot = ?run.autopilot,
        "Match started"
    );

    let started = Instant::now();
    let deadline = started + run.duration;
    let mut ticker = time::interval(run.turn.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut autopilot_actions = 0u64;

    loop {
        ticker.tick().await;

        if engine.match_state() != MatchState::Running || Instant::now() >= deadline {
            break;
        }

        if let Some(action) = pilot.as_mut().and_then(|p| p.plan(&engine)) {
            engine.enqueue(action).await?;
            autopilot_actions += 1;
        }
    }

    let outcome = engine.match_state();
    if outcome == MatchState::LevelComplete {
        engine.award_points();
    }

    let elapsed_ms = started.elapsed().as_millis() as u64;
    tracing::info!(?outcome, elapsed_ms, autopilot_actions, "Match finished");

    Ok(RunReport {
        outcome,
        elapsed_ms,
        autopilot_actions,
        snapshot: engine.snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shooter_test_utils::fixtures::{self, PLAYER_ID};

    #[test]
    fn test_default_match_builds() {
        let config = EngineConfig::from_ron_str(DEFAULT_MATCH).unwrap();
        assert_eq!(config.map.dimensions(), (40, 40));
        assert!(!config.map.is_wall(Point::ORIGIN));

        let engine = Engine::new(config).unwrap();
        assert_eq!(engine.bot_count(), 8);
        assert_eq!(engine.actor(1).unwrap().name, "Ramon");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_at_time_limit() {
        let run = RunConfig {
            duration: Duration::from_secs(2),
            ..RunConfig::default()
        };
        let report = run_match(fixtures::idle_arena(), &run).await.unwrap();

        assert_eq!(report.outcome, MatchState::Running);
        assert!(report.elapsed_ms >= 2000);
        assert_eq!(report.autopilot_actions, 0);
        assert_eq!(report.snapshot.bots.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_autopilot_clears_aligned_bot() {
        // Idle bot at (2, -2), player three cells below it.
        let config = EngineConfig::new(fixtures::room())
            .with_actors(vec![fixtures::player(Point::new(2, 1))])
            .with_bots(vec![BotStrategy::Idle]);
        let run = RunConfig {
            duration: Duration::from_secs(30),
            autopilot: Some(PLAYER_ID),
            seed: Some(5),
            ..RunConfig::default()
        };

        let report = run_match(config, &run).await.unwrap();

        assert_eq!(report.outcome, MatchState::LevelComplete);
        assert!(report.autopilot_actions >= 4);
        assert!(report.snapshot.bots.is_empty());
        assert_eq!(report.snapshot.round_winner, Some(PLAYER_ID));
        assert_eq!(report.snapshot.scores[&PLAYER_ID], 10);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "LevelComplete");
    }

    #[tokio::test]
    async fn test_unknown_autopilot_actor() {
        let run = RunConfig {
            autopilot: Some(42),
            ..RunConfig::default()
        };
        let err = run_match(fixtures::idle_arena(), &run).await.unwrap_err();
        assert!(matches!(err, RunError::MissingActor(42)));
    }

    #[tokio::test]
    async fn test_engine_errors_propagate() {
        let config = fixtures::config(fixtures::arena(), vec![]);
        let err = run_match(config, &RunConfig::default()).await.unwrap_err();
        assert!(matches!(
            err,
            RunError::Shooter(ShooterError::BotCountMismatch { .. })
        ));
    }
}
