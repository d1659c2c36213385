//! Partition sort task: insertion-sorts one contiguous slice of the input.

use crate::buffer::OrderedInsertionBuffer;
use crate::error::SortResult;
use crate::partition::Partition;
use crate::task::{CompletionTask, TaskId, TaskKind, WorkerHandle};
use std::sync::Arc;

/// Sorts the words in one partition on its own worker thread.
///
/// The input is shared read-only; the worker copies the words of its range,
/// in range order, into a private [`OrderedInsertionBuffer`].
#[derive(Debug)]
pub struct PartitionSortTask {
    partition: Partition,
    handle: WorkerHandle,
}

impl PartitionSortTask {
    /// Start sorting `partition` of `words`
    pub fn spawn(id: TaskId, words: Arc<[String]>, partition: Partition) -> SortResult<Self> {
        let range = partition.range();
        let handle = WorkerHandle::spawn(id, TaskKind::Sort, move || {
            let mut buffer = OrderedInsertionBuffer::with_capacity(range.len());
            for word in &words[range] {
                buffer.insert(word.clone());
            }
            buffer.into_sorted()
        })?;

        Ok(Self { partition, handle })
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }
}

impl CompletionTask for PartitionSortTask {
    fn id(&self) -> TaskId {
        self.handle.id()
    }

    fn kind(&self) -> TaskKind {
        TaskKind::Sort
    }

    fn wait(&mut self) -> SortResult<()> {
        self.handle.wait()
    }

    fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    fn into_words(self: Box<Self>) -> SortResult<Vec<String>> {
        self.handle.into_words()
    }
}
