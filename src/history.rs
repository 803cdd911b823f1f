//! Bounded log of raw input lines, backing the `history` builtin.

use std::fmt;
use std::slice;

/// Holds the most recent input lines, oldest first.
///
/// Lines are stored exactly as read, trailing newline included. Once the
/// buffer holds `capacity` lines, recording another one evicts the oldest.
#[derive(Debug, Clone)]
pub struct HistoryState {
    entries: Vec<String>,
    capacity: usize,
}

impl HistoryState {
    pub fn with_capacity(capacity: usize) -> HistoryState {
        HistoryState {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `line`, evicting the oldest entry when the buffer is full.
    pub fn record(&mut self, line: &str) {
        if self.capacity == 0 {
            return;
        }

        if self.entries.len() == self.capacity {
            // shifts the remaining entries left
            self.entries.remove(0);
        }
        self.entries.push(line.to_owned());
    }

    /// Iterates over the stored lines, oldest first.
    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<'a> IntoIterator for &'a HistoryState {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for HistoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.entries {
            write!(f, "{}", line)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alloc_history_state(capacity: usize, full: usize) -> HistoryState {
        let mut state = HistoryState::with_capacity(capacity);
        for i in 0..full {
            state.record(&format!("cmd{}\n", i));
        }
        state
    }

    #[test]
    fn init_with_capacity() {
        let capacity = 10;
        let state = HistoryState::with_capacity(capacity);
        assert_eq!(state.capacity(), capacity);
        assert!(state.is_empty());
    }

    #[test]
    fn record_below_capacity_keeps_everything() {
        let state = alloc_history_state(10, 4);
        let lines: Vec<&String> = state.iter().collect();
        assert_eq!(lines, vec!["cmd0\n", "cmd1\n", "cmd2\n", "cmd3\n"]);
    }

    #[test]
    fn record_at_capacity_evicts_oldest() {
        let state = alloc_history_state(3, 7);
        assert_eq!(state.len(), 3);
        let lines: Vec<&String> = state.iter().collect();
        assert_eq!(lines, vec!["cmd4\n", "cmd5\n", "cmd6\n"]);
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let state = alloc_history_state(0, 5);
        assert!(state.is_empty());
    }

    #[test]
    fn display_is_verbatim() {
        let mut state = HistoryState::with_capacity(5);
        state.record("echo hello world\n");
        state.record("\n");
        state.record("ls -l");
        assert_eq!(state.to_string(), "echo hello world\n\nls -l");
    }
}
