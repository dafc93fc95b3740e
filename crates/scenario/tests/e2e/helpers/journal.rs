//! Ordered record of every collaborator call.

use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

#[allow(dead_code)]
impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().expect("journal lock").push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("journal lock").clone()
    }

    /// Entries with the given prefix, prefix stripped.
    pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries()
            .iter()
            .filter_map(|e| e.strip_prefix(prefix).map(str::to_owned))
            .collect()
    }

    /// Index of the first entry equal to `entry`.
    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.position(entry).is_some()
    }
}
