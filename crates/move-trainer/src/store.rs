//! Progress persistence collaborator: a string key-value store owned by
//! the embedding application.

use std::collections::HashMap;

pub trait ProgressStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_values() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("puzzle_solved_001"), None);
        store.set("puzzle_solved_001", "true");
        assert_eq!(store.get("puzzle_solved_001").as_deref(), Some("true"));
    }
}
