//! # Shooter Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Map and actor fixtures
//! - Engine configuration helpers
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
