use crate::shared::types::{char_count, ClipboardSnapshot};
use super::filter::is_noise;

/// Why a clipboard observation did not reach the translation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Paused,
    Empty,
    Unchanged,
    /// Longer than the configured maximum
    InputTooLarge,
    /// Matched the system/error output denylist
    NoiseMatch,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WatchDecision {
    Translate(ClipboardSnapshot),
    Skip(SkipReason),
}

/// Decides which clipboard contents are routed to translation.
///
/// Owns the last seen text. Every observation records the text as seen,
/// whether or not it qualifies.
#[derive(Debug)]
pub struct ClipboardWatcher {
    last_seen: String,
    max_length: usize,
}

impl ClipboardWatcher {
    pub fn new(max_length: usize) -> Self {
        Self {
            last_seen: String::new(),
            max_length,
        }
    }

    /// Classify the text read on one poll tick
    pub fn observe(&mut self, text: &str, paused: bool) -> WatchDecision {
        let unchanged = text == self.last_seen;
        if !unchanged {
            self.last_seen = text.to_string();
        }

        let reason = if paused {
            Some(SkipReason::Paused)
        } else if text.is_empty() {
            Some(SkipReason::Empty)
        } else if unchanged {
            Some(SkipReason::Unchanged)
        } else if char_count(text) > self.max_length {
            Some(SkipReason::InputTooLarge)
        } else if is_noise(text) {
            Some(SkipReason::NoiseMatch)
        } else {
            None
        };

        match reason {
            Some(reason) => WatchDecision::Skip(reason),
            None => WatchDecision::Translate(ClipboardSnapshot::new(text)),
        }
    }

    /// Record text as seen without evaluating it
    pub fn mark_seen(&mut self, text: &str) {
        self.last_seen = text.to_string();
    }

    /// Forget the last seen text so the current clipboard qualifies again
    pub fn reset(&mut self) {
        self.last_seen.clear();
    }

    pub fn last_seen(&self) -> &str {
        &self.last_seen
    }

    pub fn fits(&self, text: &str) -> bool {
        char_count(text) <= self.max_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_text_is_translated() {
        let mut watcher = ClipboardWatcher::new(4000);
        match watcher.observe("Bonjour le monde", false) {
            WatchDecision::Translate(snapshot) => assert_eq!(snapshot.text, "Bonjour le monde"),
            other => panic!("unexpected decision: {:?}", other),
        }
        assert_eq!(watcher.last_seen(), "Bonjour le monde");
    }

    #[test]
    fn test_repeat_is_ignored() {
        let mut watcher = ClipboardWatcher::new(4000);
        watcher.observe("hola", false);
        assert_eq!(watcher.observe("hola", false), WatchDecision::Skip(SkipReason::Unchanged));
        assert_eq!(watcher.observe("hola", false), WatchDecision::Skip(SkipReason::Unchanged));
    }

    #[test]
    fn test_too_long_is_skipped_but_seen() {
        let mut watcher = ClipboardWatcher::new(10);
        let long = "a".repeat(11);

        assert_eq!(watcher.observe(&long, false), WatchDecision::Skip(SkipReason::InputTooLarge));
        assert_eq!(watcher.last_seen(), long);
    }

    #[test]
    fn test_limit_counts_graphemes() {
        let mut watcher = ClipboardWatcher::new(3);
        assert!(matches!(watcher.observe("ééé", false), WatchDecision::Translate(_)));
    }

    #[test]
    fn test_noise_is_skipped_but_seen() {
        let mut watcher = ClipboardWatcher::new(4000);
        assert_eq!(
            watcher.observe("FATAL ERROR: out of memory", false),
            WatchDecision::Skip(SkipReason::NoiseMatch)
        );
        assert_eq!(watcher.last_seen(), "FATAL ERROR: out of memory");
    }

    #[test]
    fn test_paused_records_without_translating() {
        let mut watcher = ClipboardWatcher::new(4000);
        assert_eq!(watcher.observe("hola", true), WatchDecision::Skip(SkipReason::Paused));
        assert_eq!(watcher.last_seen(), "hola");
        assert_eq!(watcher.observe("hola", false), WatchDecision::Skip(SkipReason::Unchanged));
    }

    #[test]
    fn test_empty_is_skipped() {
        let mut watcher = ClipboardWatcher::new(4000);
        assert_eq!(watcher.observe("", false), WatchDecision::Skip(SkipReason::Empty));
    }

    #[test]
    fn test_reset_allows_same_text_again() {
        let mut watcher = ClipboardWatcher::new(4000);
        watcher.observe("hola", false);
        watcher.reset();
        assert!(matches!(watcher.observe("hola", false), WatchDecision::Translate(_)));
    }

    #[test]
    fn test_mark_seen_suppresses_own_output() {
        let mut watcher = ClipboardWatcher::new(4000);
        watcher.observe("Bonjour", false);
        watcher.mark_seen("Hello");
        assert_eq!(watcher.observe("Hello", false), WatchDecision::Skip(SkipReason::Unchanged));
    }
}
