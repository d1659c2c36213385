//! Concurrent word sorting
//!
//! The input is split into one contiguous partition per worker. Every
//! partition is insertion-sorted on its own thread, and the sorted runs are
//! then combined pairwise, in queue order, by merge tasks that also run on
//! their own threads until a single sorted sequence remains.
//!
//! ```rust
//! use word_sort::sort_words;
//!
//! let words = vec!["banana".to_string(), "apple".to_string(), "cherry".to_string()];
//! let sorted = sort_words(words, 2).unwrap();
//! assert_eq!(sorted, vec!["apple", "banana", "cherry"]);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;

// Sort engine
pub mod buffer;
pub mod partition;
pub mod task;
pub mod partition_sort;
pub mod merge;
pub mod scheduler;

pub mod check;
pub mod word_file;

// Re-export commonly used types
pub use error::{SortError, SortResult};
pub use config::{SortConfig, SortConfigBuilder, ThreadSetting};
pub use scheduler::{sort_words, MergeRecord, SortReport, WordSorter};
pub use task::{CompletionTask, TaskId, TaskKind};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for failures reading or writing files
pub const IO_FAILURE: i32 = 2;
