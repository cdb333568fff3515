//! Snapshot-based undo/redo with debounced recording.
//!
//! The tracker is clock-driven: callers pass the `Instant` of each edit, so
//! debouncing is deterministic. Restored values are handed back to the
//! caller and never pass through [`UndoRedo::record`], which keeps undo and
//! redo from recording themselves as edits.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_MAX_HISTORY: usize = 50;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct UndoRedo<T: Clone> {
    past: VecDeque<T>,
    future: VecDeque<T>,
    pending: Option<Pending<T>>,
    max_history: usize,
    debounce: Duration,
}

impl<T: Clone> UndoRedo<T> {
    /// Starts tracking with `initial` as the only past entry.
    pub fn new(initial: T) -> Self {
        Self::with_options(initial, DEFAULT_MAX_HISTORY, DEFAULT_DEBOUNCE)
    }

    pub fn with_options(initial: T, max_history: usize, debounce: Duration) -> Self {
        let mut past = VecDeque::with_capacity(max_history.min(64));
        past.push_back(initial);
        Self {
            past,
            future: VecDeque::new(),
            pending: None,
            max_history: max_history.max(1),
            debounce,
        }
    }

    /// Schedules a snapshot of `value`.
    ///
    /// An edit arriving before the previous pending one is due replaces it
    /// and restarts the window.
    pub fn record(&mut self, value: &T, now: Instant) {
        self.tick(now);
        self.pending = Some(Pending {
            value: value.clone(),
            due: now + self.debounce,
        });
    }

    /// Commits the pending snapshot if its window has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.due)
        {
            self.flush();
        }
    }

    /// Commits the pending snapshot immediately.
    pub fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.commit(pending.value);
        }
    }

    /// Commits `value` immediately, dropping any pending edit.
    pub fn snapshot(&mut self, value: &T) {
        self.pending = None;
        self.commit(value.clone());
    }

    fn commit(&mut self, value: T) {
        self.future.clear();
        self.past.push_back(value);
        while self.past.len() > self.max_history {
            self.past.pop_front();
        }
    }

    /// Steps back one snapshot and returns the value to restore.
    pub fn undo(&mut self) -> Option<T> {
        self.flush();
        if self.past.len() <= 1 {
            return None;
        }
        let current = self.past.pop_back()?;
        self.future.push_front(current);
        self.past.back().cloned()
    }

    /// Re-applies the most recently undone snapshot.
    pub fn redo(&mut self) -> Option<T> {
        self.flush();
        let next = self.future.pop_front()?;
        self.past.push_back(next.clone());
        Some(next)
    }

    /// Forgets all history; `value` becomes the only past entry.
    pub fn clear(&mut self, value: &T) {
        self.pending = None;
        self.future.clear();
        self.past.clear();
        self.past.push_back(value.clone());
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() > 1 || (self.pending.is_some() && !self.past.is_empty())
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty() && self.pending.is_none()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The latest committed snapshot.
    pub fn current(&self) -> Option<&T> {
        self.past.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> (UndoRedo<String>, Instant) {
        (UndoRedo::new("a".to_string()), Instant::now())
    }

    #[test]
    fn test_undo_then_redo() {
        let (mut history, start) = tracker();
        for (step, value) in ["b", "c", "d"].iter().enumerate() {
            history.record(&value.to_string(), start + Duration::from_secs(step as u64));
        }
        history.flush();
        assert_eq!(history.past_len(), 4);

        assert_eq!(history.undo().as_deref(), Some("c"));
        assert_eq!(history.redo().as_deref(), Some("d"));
        assert_eq!(history.current().map(String::as_str), Some("d"));
    }

    #[test]
    fn test_rapid_edits_collapse_into_one_snapshot() {
        let (mut history, start) = tracker();
        history.record(&"ab".to_string(), start);
        history.record(&"abc".to_string(), start + Duration::from_millis(100));
        history.record(&"abcd".to_string(), start + Duration::from_millis(250));
        history.tick(start + Duration::from_millis(400));
        assert!(history.has_pending());

        history.tick(start + Duration::from_millis(550));
        assert!(!history.has_pending());
        assert_eq!(history.past_len(), 2);
        assert_eq!(history.current().map(String::as_str), Some("abcd"));
    }

    #[test]
    fn test_undo_flushes_pending_edit() {
        let (mut history, start) = tracker();
        history.record(&"b".to_string(), start);
        assert_eq!(history.undo().as_deref(), Some("a"));
        assert_eq!(history.redo().as_deref(), Some("b"));
    }

    #[test]
    fn test_undo_with_single_entry_is_noop() {
        let (mut history, _) = tracker();
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert_eq!(history.past_len(), 1);
    }

    #[test]
    fn test_new_edit_clears_future() {
        let (mut history, _) = tracker();
        history.snapshot(&"b".to_string());
        history.snapshot(&"c".to_string());
        history.undo();
        assert_eq!(history.future_len(), 1);

        history.snapshot(&"x".to_string());
        assert_eq!(history.future_len(), 0);
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_oldest_snapshot_is_evicted() {
        let mut history = UndoRedo::with_options(0u32, 3, Duration::ZERO);
        for value in 1..=5 {
            history.snapshot(&value);
        }
        assert_eq!(history.past_len(), 3);
        assert_eq!(history.undo(), Some(4));
        assert_eq!(history.undo(), Some(3));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_clear_resets_to_single_entry() {
        let (mut history, start) = tracker();
        history.snapshot(&"b".to_string());
        history.record(&"c".to_string(), start);
        history.clear(&"z".to_string());
        assert_eq!(history.past_len(), 1);
        assert!(!history.has_pending());
        assert!(!history.can_undo());
        assert_eq!(history.current().map(String::as_str), Some("z"));
    }
}
