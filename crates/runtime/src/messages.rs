//! Bounded message log fed by the engine's [`MessageSink`].
use std::collections::VecDeque;
use std::fmt;

use delve_core::MessageSink;

/// Snapshot of a single message entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    pub text: String,
    /// How many times in a row the same text arrived.
    pub count: u32,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            count: 1,
        }
    }
}

impl fmt::Display for MessageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count > 1 {
            write!(f, "{} (x{})", self.text, self.count)
        } else {
            f.write_str(&self.text)
        }
    }
}

/// Circular buffer of messages displayed to the player.
///
/// A message identical to the newest entry bumps that entry's count instead
/// of taking a new line.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn push_text(&mut self, message: impl Into<String>) {
        let text = message.into();
        if let Some(last) = self.entries.back_mut().filter(|last| last.text == text) {
            last.count += 1;
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(MessageEntry::new(text));
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
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

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(64)
    }
}

impl MessageSink for MessageLog {
    fn add_message(&mut self, text: &str) {
        tracing::trace!(text, "message");
        self.push_text(text);
    }
}
