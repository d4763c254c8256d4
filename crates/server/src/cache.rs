//! Process-wide advice cache keyed by normalized hex.
//!
//! Entries are never evicted. Lookup and insert take the lock separately, so
//! two concurrent misses for one color both generate text and the last
//! insert wins.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct AdviceCache {
    enabled: bool,
    entries: Mutex<HashMap<String, String>>,
}

impl AdviceCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A panic mid-insert cannot leave the map half-written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, hex: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }
        self.lock().get(hex).cloned()
    }

    pub fn insert(&self, hex: String, advice: String) {
        if self.enabled {
            self.lock().insert(hex, advice);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }
}
