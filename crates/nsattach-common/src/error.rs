//! Unified error types for the nsattach workspace.
//!
//! Every failure class a caller can react to differently gets its own
//! variant; anything else collapses into `Io`. No variant is retried
//! internally — a failed attach attempt aborts, cleans up, and surfaces
//! the error to the caller.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum AttachError {
    /// The target's namespace identity could not be determined.
    ///
    /// Raised when `/proc/<pid>/status` is unreadable, the outer PID is not
    /// a positive integer, or the `NSpid` field is present but unparsable.
    /// A *missing* `NSpid` field is not an error (pre-4.1 kernels do not
    /// report it); that case falls back to the outer PID instead.
    #[error("cannot resolve namespace identity of pid {pid}: {message}")]
    IdentityResolution {
        /// Outer PID whose identity was being resolved.
        pid: i32,
        /// Description of what went wrong.
        message: String,
    },

    /// The target process no longer exists.
    #[error("no such process: {pid}")]
    NoSuchProcess {
        /// Outer PID of the vanished target.
        pid: i32,
    },

    /// Trigger-file creation failed for a reason other than "already exists".
    #[error("cannot arm trigger at {path}: {source}")]
    Trigger {
        /// Path of the trigger file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The rendezvous socket never appeared within the total timeout.
    #[error("target {pid} did not respond within {waited:?}")]
    AttachTimeout {
        /// Outer PID of the unresponsive target.
        pid: i32,
        /// Wall-clock time spent waiting.
        waited: Duration,
    },

    /// An I/O operation outside the classes above failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid or could not be loaded.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// The operation is not available on this platform.
    #[error("unsupported on this platform: {message}")]
    Unsupported {
        /// Description of the missing platform capability.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, AttachError>;
