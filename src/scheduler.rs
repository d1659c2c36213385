//! Scheduling loop: partition, sort concurrently, then reduce by FIFO pairing.
//!
//! All partition sorts start at once and are queued in partition order. The
//! reduction drains that queue front to back, waiting on each task in turn.
//! A finished task is parked in a single `held` slot until the next finished
//! task arrives; the pair is then handed to a new merge task which goes to the
//! back of the queue. Pairing therefore follows queue position, never the
//! order in which workers happen to finish, and `T` sorts always produce
//! exactly `T - 1` merges.

use crate::error::{SortError, SortResult};
use crate::merge::MergeTask;
use crate::partition::{split_evenly, Partition};
use crate::partition_sort::PartitionSortTask;
use crate::task::{CompletionTask, TaskId};
use std::collections::VecDeque;
use std::sync::Arc;

/// One merge created during reduction: `left` and `right` combined into `output`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRecord {
    pub left: TaskId,
    pub right: TaskId,
    pub output: TaskId,
}

/// Sorted words plus the bookkeeping of how they were produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortReport {
    pub words: Vec<String>,
    pub partitions: Vec<Partition>,
    pub sort_tasks: usize,
    pub merge_tasks: usize,
    /// Merges in creation order
    pub merges: Vec<MergeRecord>,
}

/// Stateless entry point holding only the degree of parallelism
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSorter {
    thread_count: usize,
}

impl WordSorter {
    /// Create a sorter that splits its input across `thread_count` workers
    pub fn new(thread_count: usize) -> SortResult<Self> {
        if thread_count == 0 {
            return Err(SortError::InvalidThreadCount {
                count: thread_count,
            });
        }
        Ok(Self { thread_count })
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    /// Sort `words` in ascending byte order
    pub fn sort(&self, words: Vec<String>) -> SortResult<Vec<String>> {
        self.sort_with_report(words).map(|report| report.words)
    }

    pub fn sort_with_report(&self, words: Vec<String>) -> SortResult<SortReport> {
        let expected = words.len();
        let words: Arc<[String]> = words.into();
        let partitions = split_evenly(expected, self.thread_count);

        tracing::debug!(
            words = expected,
            threads = self.thread_count,
            "partitioned input"
        );

        let mut reduction = Reduction::new(partitions.len());
        for partition in &partitions {
            let id = reduction.next_id();
            let task = PartitionSortTask::spawn(id, Arc::clone(&words), *partition)?;
            reduction.enqueue(Box::new(task));
        }
        let sort_tasks = reduction.created;
        drop(words);

        let sorted = reduction.run()?;
        if sorted.len() != expected {
            return Err(SortError::length_mismatch(expected, sorted.len()));
        }

        Ok(SortReport {
            words: sorted,
            partitions,
            sort_tasks,
            merge_tasks: reduction.merges.len(),
            merges: reduction.merges,
        })
    }
}

/// Sort `words` using `thread_count` concurrent workers
pub fn sort_words(words: Vec<String>, thread_count: usize) -> SortResult<Vec<String>> {
    WordSorter::new(thread_count)?.sort(words)
}

/// The pending queue and the pairing state that drains it
struct Reduction {
    pending: VecDeque<Box<dyn CompletionTask>>,
    created: usize,
    merges: Vec<MergeRecord>,
}

impl Reduction {
    fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            created: 0,
            merges: Vec::with_capacity(capacity.saturating_sub(1)),
        }
    }

    fn next_id(&mut self) -> TaskId {
        let id = self.created;
        self.created += 1;
        id
    }

    fn enqueue(&mut self, task: Box<dyn CompletionTask>) {
        self.pending.push_back(task);
    }

    /// Drain the queue until a single sequence remains.
    ///
    /// The first failed wait aborts the reduction; tasks still queued are
    /// dropped and their workers finish unobserved.
    fn run(&mut self) -> SortResult<Vec<String>> {
        let mut held: Option<Box<dyn CompletionTask>> = None;

        while let Some(front) = self.pending.front_mut() {
            front.wait()?;

            let Some(finished) = self.pending.pop_front() else {
                break;
            };

            match held.take() {
                None if self.pending.is_empty() => {
                    tracing::debug!(
                        task = finished.id(),
                        merges = self.merges.len(),
                        "reduction complete"
                    );
                    return finished.into_words();
                }
                None => held = Some(finished),
                Some(partner) => {
                    let record = MergeRecord {
                        left: partner.id(),
                        right: finished.id(),
                        output: self.next_id(),
                    };
                    let left = partner.into_words()?;
                    let right = finished.into_words()?;
                    tracing::trace!(
                        left = record.left,
                        right = record.right,
                        output = record.output,
                        words = left.len() + right.len(),
                        "pairing finished tasks"
                    );

                    let merge = MergeTask::spawn(
                        record.output,
                        (record.left, record.right),
                        left,
                        right,
                    )?;
                    self.merges.push(record);
                    self.enqueue(Box::new(merge));
                }
            }
        }

        // Unreachable with at least one partition: the queue never empties
        // while a task is held.
        match held {
            Some(task) => task.into_words(),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskKind, WorkerHandle};

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_thread() {
        let sorted = sort_words(words(&["banana", "apple", "cherry"]), 1).expect("sort");
        assert_eq!(sorted, words(&["apple", "banana", "cherry"]));
    }

    #[test]
    fn test_one_word_per_partition() {
        let sorted = sort_words(words(&["b", "a", "d", "c"]), 4).expect("sort");
        assert_eq!(sorted, words(&["a", "b", "c", "d"]));
    }

    #[test]
    fn test_duplicates_survive() {
        let sorted = sort_words(words(&["x", "y", "x"]), 2).expect("sort");
        assert_eq!(sorted, words(&["x", "x", "y"]));
    }

    #[test]
    fn test_empty_input() {
        for threads in [1, 2, 7] {
            let report = WordSorter::new(threads)
                .expect("valid thread count")
                .sort_with_report(Vec::new())
                .expect("sort");
            assert!(report.words.is_empty());
            assert_eq!(report.sort_tasks, threads);
            assert_eq!(report.merge_tasks, threads - 1);
        }
    }

    #[test]
    fn test_more_threads_than_words() {
        let report = WordSorter::new(5)
            .expect("valid thread count")
            .sort_with_report(words(&["b", "a"]))
            .expect("sort");
        assert_eq!(report.words, words(&["a", "b"]));
        assert_eq!(report.partitions.iter().filter(|p| p.is_empty()).count(), 3);
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(matches!(
            WordSorter::new(0),
            Err(SortError::InvalidThreadCount { count: 0 })
        ));
        assert!(sort_words(words(&["a"]), 0).is_err());
    }

    #[test]
    fn test_pairing_is_positional() {
        let report = WordSorter::new(3)
            .expect("valid thread count")
            .sort_with_report(words(&["c", "b", "a", "f", "e", "d"]))
            .expect("sort");

        assert_eq!(report.words, words(&["a", "b", "c", "d", "e", "f"]));
        assert_eq!(
            report.merges,
            vec![
                MergeRecord { left: 0, right: 1, output: 3 },
                MergeRecord { left: 2, right: 3, output: 4 },
            ]
        );
    }

    #[test]
    fn test_pairing_with_four_partitions() {
        let report = WordSorter::new(4)
            .expect("valid thread count")
            .sort_with_report(words(&["d", "c", "b", "a"]))
            .expect("sort");

        assert_eq!(
            report.merges,
            vec![
                MergeRecord { left: 0, right: 1, output: 4 },
                MergeRecord { left: 2, right: 3, output: 5 },
                MergeRecord { left: 4, right: 5, output: 6 },
            ]
        );
    }

    #[test]
    fn test_task_counts_form_binary_reduction() {
        let input: Vec<String> = (0..50).rev().map(|i| format!("w{i:03}")).collect();
        for threads in 1..=17 {
            let report = WordSorter::new(threads)
                .expect("valid thread count")
                .sort_with_report(input.clone())
                .expect("sort");
            assert_eq!(report.sort_tasks, threads);
            assert_eq!(report.merge_tasks, threads - 1);
            assert_eq!(report.words.len(), input.len());
        }
    }

    /// Stand-in task whose worker dies before producing anything
    struct FailingTask(WorkerHandle);

    impl CompletionTask for FailingTask {
        fn id(&self) -> TaskId {
            self.0.id()
        }

        fn kind(&self) -> TaskKind {
            self.0.kind()
        }

        fn wait(&mut self) -> SortResult<()> {
            self.0.wait()
        }

        fn is_finished(&self) -> bool {
            self.0.is_finished()
        }

        fn into_words(self: Box<Self>) -> SortResult<Vec<String>> {
            self.0.into_words()
        }
    }

    #[test]
    fn test_worker_failure_aborts_reduction() {
        let mut reduction = Reduction::new(3);
        let shared: Arc<[String]> = words(&["b", "a"]).into();

        let id = reduction.next_id();
        let ok = PartitionSortTask::spawn(id, Arc::clone(&shared), Partition::new(0, 2))
            .expect("spawn sort task");
        reduction.enqueue(Box::new(ok));

        let id = reduction.next_id();
        let failing = WorkerHandle::spawn(id, TaskKind::Sort, || -> Vec<String> {
            panic!("simulated interruption")
        })
        .expect("spawn failing task");
        reduction.enqueue(Box::new(FailingTask(failing)));

        match reduction.run() {
            Err(SortError::WorkerInterrupted { task }) => assert_eq!(task, "sort#1"),
            other => panic!("expected interruption, got {other:?}"),
        }
        assert!(reduction.merges.is_empty());
    }
}
