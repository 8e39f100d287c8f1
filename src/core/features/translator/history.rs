use std::collections::VecDeque;

use crate::shared::error::{AppError, AppResult};
use crate::shared::types::TranslationResult;

/// Default number of translations kept
pub const MAX_HISTORY_SIZE: usize = 3;

/// Recent translations, most recent first. Lives for the process only.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    items: VecDeque<TranslationResult>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert at the front, evicting the oldest once over capacity
    pub fn record(&mut self, result: TranslationResult) {
        self.items.push_front(result);
        while self.items.len() > self.capacity {
            if let Some(evicted) = self.items.pop_back() {
                log::debug!("[History] Evicted {}", evicted.direction_label());
            }
        }
    }

    /// Get a specific item by index (0 = most recent)
    pub fn get(&self, index: usize) -> AppResult<&TranslationResult> {
        self.items.get(index).ok_or_else(|| {
            AppError::Validation(format!(
                "History index {} out of range ({} entries)",
                index,
                self.items.len()
            ))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationResult> {
        self.items.iter()
    }

    pub fn snapshot(&self) -> Vec<TranslationResult> {
        self.items.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(MAX_HISTORY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::TranslationRequest;

    fn result(original: &str) -> TranslationResult {
        let request = TranslationRequest::new(original, "es", "en");
        TranslationResult::from_request(&request, format!("{} (en)", original))
    }

    #[test]
    fn test_most_recent_first() {
        let mut history = HistoryStore::default();
        history.record(result("uno"));
        history.record(result("dos"));

        assert_eq!(history.get(0).unwrap().original, "dos");
        assert_eq!(history.get(1).unwrap().original, "uno");
    }

    #[test]
    fn test_evicts_exactly_the_oldest() {
        let mut history = HistoryStore::new(3);
        for original in ["uno", "dos", "tres", "cuatro"] {
            history.record(result(original));
        }

        let originals: Vec<_> = history.iter().map(|r| r.original.as_str()).collect();
        assert_eq!(originals, vec!["cuatro", "tres", "dos"]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_out_of_range_is_error() {
        let mut history = HistoryStore::default();
        history.record(result("uno"));

        assert!(history.get(1).is_err());
        assert!(matches!(history.get(7), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = HistoryStore::new(0);
        history.record(result("uno"));
        history.record(result("dos"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.capacity(), 1);
    }
}
