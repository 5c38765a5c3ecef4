//! Harness error types

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which lifecycle hook failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    /// The hook run before each test body
    BeforeEach,
    /// The hook run after each test has been reported
    AfterEach,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookPhase::BeforeEach => f.write_str("beforeEach"),
            HookPhase::AfterEach => f.write_str("afterEach"),
        }
    }
}

/// Errors that abort a test run.
///
/// Failures inside a test body never surface here; they are recorded on the
/// test case. Only harness misconfiguration propagates.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A lifecycle hook returned an error
    #[error("{phase} hook failed for test #{position}: {source}")]
    Hook {
        /// The failing hook
        phase: HookPhase,
        /// 1-based position of the test the hook ran for
        position: usize,
        /// The hook's error
        #[source]
        source: anyhow::Error,
    },

    /// No test is registered at this position
    #[error("no test registered at position {0}")]
    UnknownTest(usize),

    /// The reporter could not write its output
    #[error("reporter failed: {0}")]
    Report(#[from] std::io::Error),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config '{}': {source}", .path.display())]
    Read {
        /// Path of the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("Failed to parse config '{}': {source}", .path.display())]
    Parse {
        /// Path of the config file
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// TOML text given without a file is not valid for this schema
    #[error("Failed to parse config: {0}")]
    Syntax(#[source] toml::de::Error),

    /// A value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result alias for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;
