//! Splitting the input into contiguous per-thread ranges.

use std::ops::Range;

/// Half-open index range `[start, end)` over the input words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub end: usize,
}

impl Partition {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "partition start past end");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split `len` items into `thread_count` contiguous partitions.
///
/// Every partition gets `len / thread_count` items and the first
/// `len % thread_count` partitions get one more. When `thread_count`
/// exceeds `len` the trailing partitions are empty.
///
/// `thread_count` must be at least 1; the scheduler checks this first.
pub fn split_evenly(len: usize, thread_count: usize) -> Vec<Partition> {
    debug_assert!(thread_count > 0);
    let base = len / thread_count;
    let mut extra = len % thread_count;

    let mut partitions = Vec::with_capacity(thread_count);
    let mut offset = 0;
    for _ in 0..thread_count {
        let mut size = base;
        if extra > 0 {
            size += 1;
            extra -= 1;
        }
        partitions.push(Partition::new(offset, offset + size));
        offset += size;
    }

    partitions
}
