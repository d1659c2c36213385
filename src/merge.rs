//! Two-way merge of sorted word sequences, and the task that runs it.

use crate::error::SortResult;
use crate::task::{CompletionTask, TaskId, TaskKind, WorkerHandle};

/// Merge two ascending sequences into one.
///
/// Both inputs must already be sorted; this is not checked. Every element
/// of both sides appears in the output exactly as often as in the inputs.
pub fn merge_sorted(left: Vec<String>, right: Vec<String>) -> Vec<String> {
    if left.is_empty() {
        return right;
    }
    if right.is_empty() {
        return left;
    }

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l <= r,
            _ => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    merged
}

/// Merges the results of two finished tasks on its own worker thread
#[derive(Debug)]
pub struct MergeTask {
    inputs: (TaskId, TaskId),
    handle: WorkerHandle,
}

impl MergeTask {
    /// Start merging `left` and `right`, produced by tasks `inputs.0` and `inputs.1`
    pub fn spawn(
        id: TaskId,
        inputs: (TaskId, TaskId),
        left: Vec<String>,
        right: Vec<String>,
    ) -> SortResult<Self> {
        let handle = WorkerHandle::spawn(id, TaskKind::Merge, move || merge_sorted(left, right))?;
        Ok(Self { inputs, handle })
    }

    /// Ids of the two tasks whose results this merge combines
    pub fn inputs(&self) -> (TaskId, TaskId) {
        self.inputs
    }
}

impl CompletionTask for MergeTask {
    fn id(&self) -> TaskId {
        self.handle.id()
    }

    fn kind(&self) -> TaskKind {
        TaskKind::Merge
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
