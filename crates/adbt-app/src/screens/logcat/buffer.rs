//! Bounded log line storage

use std::collections::VecDeque;

use adbt_bridge::parse_priority;
use adbt_core::LogPriority;

use crate::config::MAX_LOG_BUFFER;
use crate::overlay::SearchInput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub text: String,
    /// `None` when the line carries no recognisable priority
    pub priority: Option<LogPriority>,
}

impl LogLine {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            priority: parse_priority(&text),
            text,
        }
    }

    /// Lines without a priority pass every threshold
    pub fn passes(&self, min_level: Option<LogPriority>) -> bool {
        match (min_level, self.priority) {
            (Some(min), Some(priority)) => priority >= min,
            _ => true,
        }
    }
}

/// FIFO of the most recent lines; the oldest line is evicted at capacity
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: VecDeque<LogLine>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(MAX_LOG_BUFFER)
    }
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_LOG_BUFFER);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, text: impl Into<String>) {
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(LogLine::new(text));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    /// Read-only projection through the level threshold and search query
    pub fn filtered<'a>(
        &'a self,
        min_level: Option<LogPriority>,
        search: &'a SearchInput,
    ) -> impl Iterator<Item = &'a LogLine> + 'a {
        self.lines
            .iter()
            .filter(move |line| line.passes(min_level) && search.matches(&line.text))
    }
}

impl<S: Into<String>> Extend<S> for LogBuffer {
    fn extend<I: IntoIterator<Item = S>>(&mut self, lines: I) {
        for line in lines {
            self.push(line);
        }
    }
}
