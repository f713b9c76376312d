//! Error types for texmend operations.
//!
//! This module defines [`TexmendError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `TexmendError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `TexmendError::Other`) for unexpected errors
//! - Components return errors; only `main` turns them into an exit code
//! - All errors should provide actionable messages for users

use thiserror::Error;

/// Core error type for texmend operations.
#[derive(Debug, Error)]
pub enum TexmendError {
    /// No TeX compiler from the preference list is on PATH.
    #[error("none of the following latex compilers available: [{candidates}]")]
    NoCompiler { candidates: String },

    /// A child process could not be launched at all.
    #[error("failed to launch '{command}': {message}")]
    Launch { command: String, message: String },

    /// The compile failed and no recoverable cause was recognized.
    #[error("build failed with an unrecoverable error (see compiler output above)")]
    UnrecoverableBuild,

    /// A missing resource was diagnosed but the process lacks root.
    #[error("'{resource}' is missing and must be installed; re-run with sudo")]
    NotRoot { resource: String },

    /// The `id -u` privilege probe could not be executed or parsed.
    #[error("privilege probe failed: {message}")]
    PrivilegeProbe { message: String },

    /// No supported package-manager backend is on PATH.
    #[error("no TeX installer found on PATH (looked for dnf, tlmgr); install one and retry")]
    NoInstaller,

    /// The selected installer backend exited non-zero.
    #[error("{backend} failed to install '{package}' (exit code {code:?})")]
    InstallFailed {
        backend: String,
        package: String,
        code: Option<i32>,
    },

    /// The install/retry loop stopped making progress.
    #[error("giving up: '{resource}' was still missing after a successful install")]
    StuckResource { resource: String },

    /// The hard cap on compile attempts was reached.
    #[error("giving up after {attempts} compile attempts")]
    RetryLimit { attempts: usize },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for texmend operations.
pub type Result<T> = std::result::Result<T, TexmendError>;
