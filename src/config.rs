//! Configuration for a word sorting run

use crate::error::{SortError, SortResult};
use std::str::FromStr;

/// Main configuration structure for a sorting run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortConfig {
    /// Number of workers; `None` means one per CPU
    pub threads: Option<usize>,
    /// Word list to read
    pub input_file: Option<String>,
    /// Destination for the sorted words
    pub output_file: Option<String>,
    /// Re-check the ordering of the result before writing it
    pub verify: bool,
    /// Emit debug diagnostics
    pub debug: bool,
    /// Suppress the timing summary
    pub quiet: bool,
}

/// Requested worker count as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadSetting {
    Auto,
    Fixed(usize),
}

impl ThreadSetting {
    pub fn into_option(self) -> Option<usize> {
        match self {
            ThreadSetting::Auto => None,
            ThreadSetting::Fixed(count) => Some(count),
        }
    }
}

impl FromStr for ThreadSetting {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(ThreadSetting::Auto);
        }
        s.parse::<usize>().map(ThreadSetting::Fixed).map_err(|_| {
            SortError::parse_error(&format!(
                "{s} should be a number representing the amount of threads to use for sorting"
            ))
        })
    }
}

impl SortConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker count
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Set input file
    pub fn with_input_file(mut self, input_file: Option<String>) -> Self {
        self.input_file = input_file;
        self
    }

    /// Set output file
    pub fn with_output_file(mut self, output_file: Option<String>) -> Self {
        self.output_file = output_file;
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        if let Some(threads) = self.threads {
            if threads == 0 {
                return Err(SortError::InvalidThreadCount { count: threads });
            }
        }

        if self.input_file.is_none() {
            return Err(SortError::parse_error("missing input file"));
        }
        if self.output_file.is_none() {
            return Err(SortError::parse_error("missing output file"));
        }

        if self.debug && self.quiet {
            return Err(SortError::parse_error(
                "--debug and --quiet cannot be used together",
            ));
        }

        Ok(())
    }

    /// Get effective thread count
    pub fn effective_thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }

    /// Default `tracing` filter directive for this run
    pub fn log_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Builder pattern for SortConfig
#[derive(Debug, Default)]
pub struct SortConfigBuilder {
    config: SortConfig,
}

impl SortConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threads(mut self, setting: ThreadSetting) -> Self {
        self.config.threads = setting.into_option();
        self
    }

    pub fn input_file(mut self, file: String) -> Self {
        self.config.input_file = Some(file);
        self
    }

    pub fn output_file(mut self, file: String) -> Self {
        self.config.output_file = Some(file);
        self
    }

    pub fn verify(mut self) -> Self {
        self.config.verify = true;
        self
    }

    pub fn debug(mut self) -> Self {
        self.config.debug = true;
        self
    }

    pub fn quiet(mut self) -> Self {
        self.config.quiet = true;
        self
    }

    pub fn build(self) -> SortResult<SortConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
