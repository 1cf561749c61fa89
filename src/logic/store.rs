//! Result Store
//!
//! Row index → prediction, filled as individual requests complete.
//! Entries are never evicted or replaced within a session.

use std::collections::BTreeMap;

use super::classifier::PredictionResult;

#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    entries: BTreeMap<usize, PredictionResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one entry. Returns `false` (and keeps the first result) if the
    /// index is already resolved.
    pub fn set(&mut self, index: usize, result: PredictionResult) -> bool {
        if self.entries.contains_key(&index) {
            tracing::debug!("Row {} already resolved, keeping first result", index);
            return false;
        }
        self.entries.insert(index, result);
        true
    }

    pub fn get(&self, index: usize) -> Option<&PredictionResult> {
        self.entries.get(&index)
    }

    pub fn get_all(&self) -> &BTreeMap<usize, PredictionResult> {
        &self.entries
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
