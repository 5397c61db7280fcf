//! Challenge leaderboard
//!
//! Ranked by score (high first), ties broken by earlier timestamp, top 20 kept.
//! Persisted as a JSON array through a [`Storage`] backend.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistenceError, Storage};

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 20;
/// Maximum player name length (characters)
pub const MAX_NAME_LEN: usize = 20;
/// Name used when the player leaves the prompt empty
pub const DEFAULT_NAME: &str = "Anonymous";

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    /// Unix timestamp (ms) when recorded
    #[serde(rename = "ts")]
    pub timestamp: u64,
}

/// Ranked challenge results
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

/// Trim, cap at 20 characters, fall back to "Anonymous"
pub fn sanitize_name(name: &str) -> String {
    let trimmed: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

impl Leaderboard {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "bb_leaderboard_v1";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Get the rank a score would achieve now (1-indexed, None if it would
    /// fall off the list). Equal scores rank after existing ones.
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        let rank = self.entries.iter().take_while(|e| e.score >= score).count() + 1;
        (rank <= MAX_ENTRIES).then_some(rank)
    }

    /// Insert a result, re-rank and truncate. Returns the rank achieved
    /// (1-indexed) or None if it didn't make the cut.
    pub fn add_score(&mut self, name: &str, score: u32, timestamp: u64) -> Option<usize> {
        let entry = LeaderboardEntry {
            name: sanitize_name(name),
            score,
            timestamp,
        };
        self.entries.push(entry.clone());
        self.sort();
        self.entries.truncate(MAX_ENTRIES);
        self.entries.iter().position(|e| *e == entry).map(|i| i + 1)
    }

    fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.timestamp.cmp(&b.timestamp)));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from storage. Missing or corrupt data yields an empty board.
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json::<Vec<LeaderboardEntry>>(storage, Self::STORAGE_KEY) {
            Ok(Some(entries)) => {
                let mut board = Self { entries };
                board.sort();
                board.entries.truncate(MAX_ENTRIES);
                log::info!("Loaded {} leaderboard entries", board.entries.len());
                board
            }
            Ok(None) => {
                log::info!("No leaderboard found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Leaderboard unreadable ({}), starting fresh", e);
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), PersistenceError> {
        persistence::save_json(storage, Self::STORAGE_KEY, &self.entries)?;
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Load, insert, save; returns the updated ranked list.
    ///
    /// Save failures are logged; the returned list still includes the entry.
    pub fn record(storage: &mut dyn Storage, name: &str, score: u32, timestamp: u64) -> Vec<LeaderboardEntry> {
        let mut board = Self::load(storage);
        board.add_score(name, score, timestamp);
        if let Err(e) = board.save(storage) {
            log::warn!("Leaderboard not saved: {}", e);
        }
        board.entries
    }
}

/// Format a timestamp relative to `now_ms`
pub fn format_date(timestamp: u64, now_ms: u64) -> String {
    let diff_secs = now_ms.saturating_sub(timestamp) / 1000;
    let mins = diff_secs / 60;
    let hours = mins / 60;
    let days = hours / 24;

    if days >= 1 {
        if days == 1 {
            "Yesterday".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else if hours >= 1 {
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if mins >= 1 {
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use proptest::prelude::*;

    #[test]
    fn test_order_score_then_time() {
        let mut board = Leaderboard::new();
        board.add_score("a", 50, 1);
        board.add_score("b", 90, 2);
        board.add_score("c", 90, 3);
        board.add_score("d", 30, 4);

        let order: Vec<_> = board.entries.iter().map(|e| (e.score, e.timestamp)).collect();
        assert_eq!(order, vec![(90, 2), (90, 3), (50, 1), (30, 4)]);
    }

    #[test]
    fn test_truncates_to_twenty() {
        let mut board = Leaderboard::new();
        for i in 0..25u32 {
            board.add_score("p", i, i as u64);
        }
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert_eq!(board.top_score(), Some(24));
        assert_eq!(board.entries.last().map(|e| e.score), Some(5));
        // A zero can't make it anymore
        assert_eq!(board.add_score("late", 0, 100), None);
        assert_eq!(board.potential_rank(0), None);
        assert_eq!(board.potential_rank(100), Some(1));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("   "), "Anonymous");
        assert_eq!(sanitize_name("  Jo "), "Jo");
        assert_eq!(sanitize_name("abcdefghijklmnopqrstuvwxyz").chars().count(), 20);
    }

    #[test]
    fn test_corrupt_storage_is_empty() {
        let mut storage = MemoryStorage::default();
        storage.set_item(Leaderboard::STORAGE_KEY, "not json").unwrap();
        assert!(Leaderboard::load(&storage).is_empty());
    }

    #[test]
    fn test_record_persists() {
        let mut storage = MemoryStorage::default();
        Leaderboard::record(&mut storage, "first", 10, 1);
        let list = Leaderboard::record(&mut storage, "second", 20, 2);
        assert_eq!(list[0].name, "second");
        assert_eq!(Leaderboard::load(&storage).entries, list);
    }

    #[test]
    fn test_stored_format() {
        let mut storage = MemoryStorage::default();
        Leaderboard::record(&mut storage, "Ann", 12, 5);
        let json = storage.get_item(Leaderboard::STORAGE_KEY).unwrap().unwrap();
        assert_eq!(json, r#"[{"name":"Ann","score":12,"ts":5}]"#);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0, 30_000), "Just now");
        assert_eq!(format_date(0, 61_000), "1 min ago");
        assert_eq!(format_date(0, 3 * 3_600_000), "3 hours ago");
        assert_eq!(format_date(0, 24 * 3_600_000), "Yesterday");
    }

    proptest! {
        #[test]
        fn prop_sorted_and_bounded(scores in proptest::collection::vec(0u32..200, 0..60)) {
            let mut board = Leaderboard::new();
            for (i, s) in scores.iter().enumerate() {
                board.add_score("p", *s, i as u64);
            }
            prop_assert!(board.entries.len() <= MAX_ENTRIES);
            for pair in board.entries.windows(2) {
                let ordered = pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].timestamp <= pair[1].timestamp);
                prop_assert!(ordered);
            }
        }
    }
}
