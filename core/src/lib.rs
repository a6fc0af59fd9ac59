//! playtime-core — youth-sports equal-playing-time tracker.
//!
//! A coach runs a live game against a 1 Hz clock; each second is credited
//! to every player's playing or sitting ledger, percentages and
//! end-of-game projections recompute, and the whole session is
//! snapshotted so a crash or reload resumes mid-game.

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod live;
pub mod roster;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod types;
