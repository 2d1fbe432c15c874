//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Intent`]s and keeps track
//! of which keys are held so the engine receives a full [`IntentSet`] every
//! frame. Works in terminals without key-release events by expiring keys that
//! have not been seen for a while.
//!
//! [`IntentSet`]: crate::types::IntentSet

pub mod map;
pub mod tracker;

pub use blockfall_types as types;

pub use map::{map_key, should_quit};
pub use tracker::{KeyTracker, DEFAULT_HOLD_TIMEOUT_MS};
