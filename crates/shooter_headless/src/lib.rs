//! Headless match runner.
//!
//! Runs a spaceship shooter match without a terminal front end, for CI
//! smoke runs and playtesting bot configurations. The runner:
//!
//! - loads a match configuration (RON) or uses the built-in arena,
//! - starts the engine and lets its bots play,
//! - optionally drives one actor with a scripted [`Autopilot`],
//! - stops at the time limit or when the match is decided,
//! - reports the final [`Snapshot`](shooter_core::engine::Snapshot) as JSON.
//!
//! # Output
//!
//! - **stdout**: the JSON [`RunReport`]
//! - **stderr**: logs (human-readable)

pub mod autopilot;
pub mod runner;

pub use autopilot::Autopilot;
pub use runner::{run_match, RunConfig, RunError, RunReport, DEFAULT_MATCH};
