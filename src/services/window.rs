//! Fixed-capacity bar buffer.

use std::collections::VecDeque;
use tracing::warn;

use crate::types::Bar;

/// Ordered window of the most recent bars.
///
/// Appending past capacity evicts the oldest bar. Bars are expected in
/// non-decreasing timestamp order; callers must serialize appends.
#[derive(Debug, Clone)]
pub struct BarWindow {
    bars: VecDeque<Bar>,
    capacity: usize,
}

impl BarWindow {
    /// Create an empty window. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            bars: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a bar, evicting the oldest one when full.
    pub fn append(&mut self, bar: Bar) {
        if let Some(last) = self.bars.back() {
            if bar.timestamp < last.timestamp {
                warn!(
                    "Out-of-order bar appended: {} < {}",
                    bar.timestamp, last.timestamp
                );
            }
        }

        self.bars.push_back(bar);

        while self.bars.len() > self.capacity {
            self.bars.pop_front();
        }
    }

    /// Owned copy of the window, oldest first.
    pub fn snapshot(&self) -> Vec<Bar> {
        self.bars.iter().copied().collect()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.back()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
