//! # Error Handling
//!
//! Centralized error type for the `popular-repos` generator, built with
//! `thiserror`. The taxonomy is deliberately small: the run either fully
//! succeeds or aborts on the first failure, so every variant here is fatal.
//!
//! - **`Error::ConfigParse`** — the registry file could not be understood.
//! - **`Error::Query`** — the external `bazel query` invocation failed
//!   (could not be spawned, or exited non-zero).
//! - **`Error::InvalidExcludes`** — a descriptor declares an exclusion that
//!   does not correspond to any discovered test target.
//! - **`Error::Io`** — a filesystem failure while reading the registry or
//!   writing an output file.
//!
//! There are no retries and no partial-success mode. An `InvalidExcludes`
//! error can leave the aggregation file partially written; that is accepted
//! behavior, the output files are disposable and regenerated in full on the
//! next successful run.

use thiserror::Error;

/// Main error type for popular-repos operations
#[derive(Error, Debug)]
pub enum Error {
    /// The registry configuration file could not be parsed.
    ///
    /// Includes the specific parsing issue and optionally a hint about how
    /// to fix it.
    #[error("Registry parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the registry issue
        hint: Option<String>,
    },

    /// The external build-graph query failed for a repository.
    ///
    /// Carries the repository name, the command that was run, and whatever
    /// the process left on stderr (or the spawn error).
    #[error("Query failed for {repo}: {command} - {stderr}")]
    Query {
        repo: String,
        command: String,
        stderr: String,
    },

    /// A declared exclusion does not name any discovered test target.
    ///
    /// Every entry in `excludes` (and the platform-suffixed lists) must,
    /// once namespaced as `@<name>//<suffix>`, appear in the query result.
    #[error("Invalid excludes found for {repo}: [{}]", entries.join(", "))]
    InvalidExcludes { repo: String, entries: Vec<String> },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
