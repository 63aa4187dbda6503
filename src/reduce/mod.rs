//! Reducer Module
//!
//! Pure list transformations applied to materialized query results before
//! they are rendered. None of them mutate their input.

mod dedupe;
mod leaderboard;
mod normalize;


pub use dedupe::{dedupe, dedupe_raw, identity};
pub use leaderboard::{best_per_actor, leaderboard, rank, today_window, within_window};
pub use normalize::normalize;

/// Number of leaderboard rows shown by default
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 20;
