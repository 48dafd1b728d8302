//! Persisted high score
//!
//! Stored as a decimal integer under a single key. Loading never fails:
//! a missing, unreadable or corrupt value counts as zero.

use serde::{Deserialize, Serialize};

use crate::platform::ScoreStore;

/// Best score seen by this engine; never decreases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "sky_strike_high_score";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Offer a score. Returns true if it became the new best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Parse a stored value (surrounding whitespace allowed)
    pub fn parse(raw: &str) -> Option<u64> {
        raw.trim().parse().ok()
    }

    /// Load from storage, falling back to zero
    pub fn load<S: ScoreStore + ?Sized>(store: &S) -> Self {
        match store.load(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match Self::parse(&raw) {
                Some(best) => {
                    log::info!("Loaded high score {}", best);
                    Self::new(best)
                }
                None => {
                    log::warn!("Ignoring corrupt high score value {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load high score: {}", e);
                Self::default()
            }
        }
    }

    /// Write to storage. Failures are logged and skipped.
    pub fn save<S: ScoreStore + ?Sized>(&self, store: &mut S) -> bool {
        match store.save(Self::STORAGE_KEY, &self.best.to_string()) {
            Ok(()) => {
                log::debug!("High score saved ({})", self.best);
                true
            }
            Err(e) => {
                log::warn!("Failed to save high score: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_submit_is_monotonic() {
        let mut hs = HighScore::new(100);
        assert!(!hs.submit(50));
        assert!(!hs.submit(100));
        assert!(hs.submit(101));
        assert_eq!(hs.best(), 101);
    }

    #[test]
    fn test_load_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best(), 0);
    }

    #[test]
    fn test_load_corrupt_is_zero() {
        let mut store = MemoryStore::new();
        for raw in ["abc", "-5", "", "12.5"] {
            store.insert(HighScore::STORAGE_KEY, raw);
            assert_eq!(HighScore::load(&store).best(), 0, "raw {:?}", raw);
        }
    }

    #[test]
    fn test_load_failure_is_zero() {
        let mut store = MemoryStore::new();
        store.insert(HighScore::STORAGE_KEY, "900");
        store.set_failing(true);
        assert_eq!(HighScore::load(&store).best(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        assert!(HighScore::new(420).save(&mut store));
        assert_eq!(store.get(HighScore::STORAGE_KEY), Some("420"));
        assert_eq!(HighScore::load(&store).best(), 420);
    }

    #[test]
    fn test_save_failure_is_reported_not_fatal() {
        let mut store = MemoryStore::new();
        store.set_failing(true);
        assert!(!HighScore::new(10).save(&mut store));
        assert_eq!(store.writes(), 0);
    }
}
