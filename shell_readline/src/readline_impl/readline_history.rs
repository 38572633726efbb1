// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use crate::HISTORY_SIZE_DEFAULT;

/// Bounded list of accepted lines, oldest first, with a navigation cursor in
/// `0..=entries.len()`. A cursor equal to `entries.len()` means "past the newest entry".
#[derive(Debug)]
pub struct History {
    pub entries: VecDeque<String>,
    pub max_size: usize,
    current_position: usize,
}

impl Default for History {
    fn default() -> Self { Self::new(HISTORY_SIZE_DEFAULT) }
}

impl History {
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size),
            max_size,
            current_position: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn current_position(&self) -> usize { self.current_position }

    /// Change the capacity. Oldest entries are evicted if there are too many.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.rewind();
    }
}

impl History {
    /// Add an accepted line. Blank lines, and lines equal to the newest entry, are
    /// ignored.
    pub fn push(&mut self, entry: &str) {
        if entry.trim().is_empty() {
            return;
        }
        if self.entries.back().is_some_and(|newest| newest == entry) {
            return;
        }

        self.entries.push_back(entry.to_string());

        // Evict oldest entries.
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }

        self.rewind();
    }

    /// Move one entry towards the oldest one and return it. Saturates at the oldest
    /// entry. Returns [None] only when there are no entries.
    pub fn get_previous(&mut self) -> Option<&str> {
        self.current_position = self.current_position.saturating_sub(1);
        self.entries.get(self.current_position).map(String::as_str)
    }

    /// Move one entry towards the newest one and return it. Returns [None] once the
    /// cursor moves past the newest entry.
    pub fn get_next(&mut self) -> Option<&str> {
        self.current_position = usize::min(self.entries.len(), self.current_position + 1);
        self.entries.get(self.current_position).map(String::as_str)
    }

    /// Reset the cursor to "past the newest entry", so the next [`Self::get_previous`]
    /// returns the newest entry.
    pub fn rewind(&mut self) { self.current_position = self.entries.len(); }
}
