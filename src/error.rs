//! Error handling for the word sorter

use std::io;
use thiserror::Error;

/// Custom error type for sort operations
#[derive(Error, Debug)]
pub enum SortError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Permission denied: {file}")]
    PermissionDenied { file: String },

    #[error("No such file or directory: {file}")]
    FileNotFound { file: String },

    #[error("Input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Missing word count on the first line")]
    MissingWordCount,

    #[error("Invalid word count: {value}")]
    InvalidWordCount { value: String },

    #[error("Invalid thread count: {count} (at least 1 thread is required)")]
    InvalidThreadCount { count: usize },

    #[error("Failed to start worker for {task}: {source}")]
    ThreadSpawn {
        task: String,
        #[source]
        source: io::Error,
    },

    #[error("Worker for {task} was interrupted before finishing")]
    WorkerInterrupted { task: String },

    #[error("Expected {expected} words but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Output is not sorted at line {line}")]
    NotSorted { line: usize },

    #[error("Parse error: {message}")]
    ParseError { message: String },
}

impl SortError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SortError::PermissionDenied { .. }
            | SortError::FileNotFound { .. }
            | SortError::Io(_) => crate::IO_FAILURE,

            _ => crate::EXIT_FAILURE,
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(file: &str) -> Self {
        SortError::PermissionDenied {
            file: file.to_string(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(file: &str) -> Self {
        SortError::FileNotFound {
            file: file.to_string(),
        }
    }

    pub fn invalid_word_count(value: &str) -> Self {
        SortError::InvalidWordCount {
            value: value.to_string(),
        }
    }

    pub fn worker_interrupted(task: &str) -> Self {
        SortError::WorkerInterrupted {
            task: task.to_string(),
        }
    }

    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        SortError::LengthMismatch { expected, actual }
    }

    /// Create a parse error
    pub fn parse_error(message: &str) -> Self {
        SortError::ParseError {
            message: message.to_string(),
        }
    }

    /// True for failures raised by a worker rather than by input or I/O
    pub fn is_worker_failure(&self) -> bool {
        matches!(
            self,
            SortError::WorkerInterrupted { .. } | SortError::ThreadSpawn { .. }
        )
    }
}

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;

/// Context trait for adding file names to I/O errors
pub trait SortContext<T> {
    fn with_file_context(self, filename: &str) -> SortResult<T>;
}

impl<T> SortContext<T> for SortResult<T> {
    fn with_file_context(self, filename: &str) -> SortResult<T> {
        self.map_err(|err| match err {
            SortError::Io(io_err) => io_error_for_file(io_err, filename),
            other => other,
        })
    }
}

impl<T> SortContext<T> for Result<T, io::Error> {
    fn with_file_context(self, filename: &str) -> SortResult<T> {
        self.map_err(|io_err| io_error_for_file(io_err, filename))
    }
}

fn io_error_for_file(io_err: io::Error, filename: &str) -> SortError {
    match io_err.kind() {
        io::ErrorKind::PermissionDenied => SortError::permission_denied(filename),
        io::ErrorKind::NotFound => SortError::file_not_found(filename),
        _ => SortError::Io(io::Error::new(
            io_err.kind(),
            format!("{}: {}", filename, io_err),
        )),
    }
}
