//! Leaderboard Reduction
//!
//! Picks each actor's best attempt and ranks the survivors. Ties on score
//! go to whoever reached it first.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::models::ScoreEntry;

/// Orders entries best first: higher score, then earlier `occurred_at`.
fn ranking_order(a: &ScoreEntry, b: &ScoreEntry) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.occurred_at.cmp(&b.occurred_at))
}

// == Best Per Actor ==
/// Keeps one entry per `actor_id`: the highest score, and on equal scores
/// the earliest. Output follows the order in which actors first appear.
pub fn best_per_actor(entries: &[ScoreEntry]) -> Vec<ScoreEntry> {
    let mut slot_of: HashMap<&str, usize> = HashMap::new();
    let mut best: Vec<ScoreEntry> = Vec::new();

    for entry in entries {
        match slot_of.get(entry.actor_id.as_str()) {
            Some(&slot) => {
                if ranking_order(entry, &best[slot]) == Ordering::Less {
                    best[slot] = entry.clone();
                }
            }
            None => {
                slot_of.insert(entry.actor_id.as_str(), best.len());
                best.push(entry.clone());
            }
        }
    }

    debug!(input = entries.len(), actors = best.len(), "reduced to best per actor");
    best
}

// == Rank ==
/// Sorts by score descending, then `occurred_at` ascending. The full list is
/// returned; callers slice off the rows they show.
pub fn rank(mut entries: Vec<ScoreEntry>) -> Vec<ScoreEntry> {
    entries.sort_by(ranking_order);
    entries
}

/// `rank(best_per_actor(entries))`
pub fn leaderboard(entries: &[ScoreEntry]) -> Vec<ScoreEntry> {
    rank(best_per_actor(entries))
}

// == Windows ==
/// Keeps entries with `start <= occurred_at < end`.
pub fn within_window(
    entries: &[ScoreEntry],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<ScoreEntry> {
    entries
        .iter()
        .filter(|e| e.occurred_at >= start && e.occurred_at < end)
        .cloned()
        .collect()
}

/// The UTC day containing `now`, as a half-open `[start, end)` range.
pub fn today_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now);
    (start, start + Duration::days(1))
}
