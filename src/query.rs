//! # Build-Graph Discovery
//!
//! Queries the external build tool for the test targets of one vendored
//! repository. The query is a blocking child process per repository; there
//! is no retry and no caching. A failed query (spawn error or non-zero
//! exit) aborts the whole generation run.
//!
//! The `TargetDiscovery` trait is the seam between the generator pipeline
//! and the real `bazel` binary, so the emitters can be exercised in tests
//! with canned target lists.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};

/// Source of discovered test targets for a repository.
pub trait TargetDiscovery {
    /// Return every test-kind target under `@<repo_name>//...`, one label
    /// per entry, in whatever order the backend reports them.
    fn test_targets(&self, repo_name: &str) -> Result<Vec<String>>;
}

/// Discovery backed by `bazel query`.
///
/// This uses the system `bazel` command (or whatever binary the `--bazel`
/// flag points at), which inherits the workspace context of the current
/// working directory.
#[derive(Debug, Clone)]
pub struct BazelQuery {
    program: PathBuf,
}

impl BazelQuery {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The query expression for one repository: all `go_test` rules under
    /// the repository root.
    fn expression(repo_name: &str) -> String {
        format!("kind(go_test, \"@{}//...\")", repo_name)
    }
}

impl TargetDiscovery for BazelQuery {
    fn test_targets(&self, repo_name: &str) -> Result<Vec<String>> {
        let expr = Self::expression(repo_name);
        let rendered = format!("{} query {}", self.program.display(), expr);
        log::debug!("running {}", rendered);

        let output = Command::new(&self.program)
            .arg("query")
            .arg(&expr)
            .output()
            .map_err(|e| Error::Query {
                repo: repo_name.to_string(),
                command: rendered.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::Query {
                repo: repo_name.to_string(),
                command: rendered,
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let targets: Vec<String> = stdout.lines().map(str::to_string).collect();
        log::info!("discovered {} test targets in @{}//...", targets.len(), repo_name);
        Ok(targets)
    }
}
