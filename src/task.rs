//! Completion tasks: units of work the scheduler can wait on.
//!
//! A task starts working the moment it is created. Its worker runs on a
//! dedicated OS thread and hands the finished word sequence back over a
//! one-shot channel; waiting is a blocking receive on that channel. A worker
//! that dies before sending drops its end of the channel, which the waiting
//! side reports as [`SortError::WorkerInterrupted`].

use crate::error::{SortError, SortResult};
use crossbeam_channel::{bounded, Receiver};
use std::fmt;
use std::thread;

/// Identifier of a task within one sort invocation, in creation order
pub type TaskId = usize;

/// Which kind of work a task performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Sort,
    Merge,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Sort => "sort",
            TaskKind::Merge => "merge",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work that may be waited upon and, once finished, yields a sorted sequence.
pub trait CompletionTask: Send {
    fn id(&self) -> TaskId;

    fn kind(&self) -> TaskKind;

    /// Block until the task has finished. Returns immediately if it already has.
    fn wait(&mut self) -> SortResult<()>;

    fn is_finished(&self) -> bool;

    /// Take the sorted result, waiting first if the task is still running
    fn into_words(self: Box<Self>) -> SortResult<Vec<String>>;
}

enum WorkerState {
    Running(Receiver<Vec<String>>),
    Finished(Vec<String>),
    Failed,
}

/// Handle to a worker thread producing one word sequence.
///
/// Shared by every concrete task; the task types only decide what the
/// worker computes.
pub struct WorkerHandle {
    id: TaskId,
    kind: TaskKind,
    state: WorkerState,
}

impl WorkerHandle {
    /// Spawn `work` on its own thread and return a handle to it
    pub fn spawn<F>(id: TaskId, kind: TaskKind, work: F) -> SortResult<Self>
    where
        F: FnOnce() -> Vec<String> + Send + 'static,
    {
        let (sender, receiver) = bounded(1);
        let name = format!("{kind}#{id}");

        thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let words = work();
                // The scheduler may have given up on this task already
                let _ = sender.send(words);
            })
            .map_err(|source| SortError::ThreadSpawn { task: name, source })?;

        tracing::trace!(task = id, kind = kind.as_str(), "task.spawn");

        Ok(Self {
            id,
            kind,
            state: WorkerState::Running(receiver),
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn wait(&mut self) -> SortResult<()> {
        let outcome = match &self.state {
            WorkerState::Running(receiver) => receiver.recv().ok(),
            WorkerState::Finished(_) => return Ok(()),
            WorkerState::Failed => None,
        };

        match outcome {
            Some(words) => {
                tracing::trace!(
                    task = self.id,
                    kind = self.kind.as_str(),
                    words = words.len(),
                    "task.finished"
                );
                self.state = WorkerState::Finished(words);
                Ok(())
            }
            None => {
                tracing::warn!(task = self.id, kind = self.kind.as_str(), "task.interrupted");
                self.state = WorkerState::Failed;
                Err(SortError::worker_interrupted(&self.to_string()))
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, WorkerState::Finished(_))
    }

    pub fn into_words(mut self) -> SortResult<Vec<String>> {
        self.wait()?;
        match self.state {
            WorkerState::Finished(words) => Ok(words),
            _ => Err(SortError::worker_interrupted(&format!(
                "{}#{}",
                self.kind, self.id
            ))),
        }
    }
}

impl fmt::Display for WorkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

impl fmt::Debug for WorkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            WorkerState::Running(_) => "running",
            WorkerState::Finished(_) => "finished",
            WorkerState::Failed => "failed",
        };
        f.debug_struct("WorkerHandle")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_wait_blocks_until_finished() {
        let mut handle = WorkerHandle::spawn(0, TaskKind::Sort, || {
            thread::sleep(Duration::from_millis(20));
            vec!["done".to_string()]
        })
        .expect("spawn worker");

        handle.wait().expect("worker finishes");
        assert!(handle.is_finished());
        // Second wait returns immediately
        handle.wait().expect("already finished");
        assert_eq!(handle.into_words().expect("result"), vec!["done"]);
    }

    #[test]
    fn test_panicking_worker_reports_interrupted() {
        let mut handle = WorkerHandle::spawn(7, TaskKind::Merge, || -> Vec<String> {
            panic!("worker blew up")
        })
        .expect("spawn worker");

        match handle.wait() {
            Err(SortError::WorkerInterrupted { task }) => assert_eq!(task, "merge#7"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!handle.is_finished());
        assert!(handle.into_words().is_err());
    }

    #[test]
    fn test_display_names_task() {
        let handle = WorkerHandle::spawn(3, TaskKind::Sort, Vec::new).expect("spawn worker");
        assert_eq!(handle.to_string(), "sort#3");
        assert_eq!(handle.id(), 3);
        assert_eq!(handle.kind(), TaskKind::Sort);
    }
}
