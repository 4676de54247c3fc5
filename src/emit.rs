//! # Output Writers
//!
//! The three generated artifacts, written in a fixed order:
//!
//! 1. `popular_repos.bzl` — one `go_repository` declaration per registry
//!    entry, wrapped in a `popular_repos()` macro with an idempotent
//!    `_maybe` guard.
//! 2. `BUILD.bazel` — one `test_suite` per entry listing the included test
//!    targets, with exclusion validation.
//! 3. `README.rst` — per entry, the same included targets as a documented,
//!    hyperlinked list.
//!
//! The documentation writer consumes the `Suite` values produced by the
//! suites writer, so it always lists exactly the targets the suite emitted,
//! in the same order. The declarations writer has no data dependency on the
//! other two but runs first so output diffs stay stable.
//!
//! Every file is a whole-file rewrite with no locking and no atomic rename.
//! The suites writer emits one suite at a time; an exclusion-validation
//! failure aborts the run with earlier suites already on disk. The files
//! are disposable and carry a "Generated file, do not edit!" banner.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::RepoSpec;
use crate::error::Result;
use crate::query::TargetDiscovery;
use crate::suites;

/// Dependency-declaration output file name.
pub const REPOSITORIES_FILE: &str = "popular_repos.bzl";
/// Test-aggregation output file name.
pub const SUITES_FILE: &str = "BUILD.bazel";
/// Documentation output file name.
pub const DOCS_FILE: &str = "README.rst";

const COPYRIGHT_HEADER: &str = r#"# Copyright 2017 The Bazel Authors. All rights reserved.
#
# Licensed under the Apache License, Version 2.0 (the "License");
# you may not use this file except in compliance with the License.
# You may obtain a copy of the License at
#
#    http://www.apache.org/licenses/LICENSE-2.0
#
# Unless required by applicable law or agreed to in writing, software
# distributed under the License is distributed on an "AS IS" BASIS,
# WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
# See the License for the specific language governing permissions and
# limitations under the License.

##############################
# Generated file, do not edit!
##############################"#;

const BZL_PRELUDE: &str = r#"

load("@io_bazel_rules_go//go/private:go_repository.bzl", "go_repository")

def _maybe(repo_rule, name, **kwargs):
  if name not in native.existing_rules():
    repo_rule(name=name, **kwargs)

def popular_repos():
"#;

const DOCS_HEADER: &str = r#"Popular repository tests
========================

These tests are designed to check that gazelle and rules_go together can cope
with a list of popular repositories people depend on.

It helps catch changes that might break a large number of users.

.. contents::

"#;

/// One computed aggregation: a descriptor and its included targets, in
/// emission order.
#[derive(Debug)]
pub struct Suite<'a> {
    pub spec: &'a RepoSpec,
    pub targets: Vec<String>,
}

/// Per-suite counts reported back to the CLI after a full run.
#[derive(Debug)]
pub struct SuiteStats {
    pub name: String,
    pub included: usize,
    pub excluded: usize,
}

/// Write the dependency-declaration file.
///
/// Purely a serialization pass: one `_maybe(go_repository, ...)` per
/// descriptor, in registry order, emitting whichever optional fields are
/// present. No validation.
pub fn write_repositories(registry: &[RepoSpec], path: &Path) -> Result<()> {
    let mut f = File::create(path)?;
    write!(f, "{}{}", COPYRIGHT_HEADER, BZL_PRELUDE)?;
    for spec in registry {
        writeln!(f, "  _maybe(")?;
        writeln!(f, "    go_repository,")?;
        writeln!(f, "    name=\"{}\",", spec.name)?;
        writeln!(f, "    importpath=\"{}\",", spec.importpath)?;
        if let Some(commit) = &spec.commit {
            writeln!(f, "    commit=\"{}\",", commit)?;
        }
        if let Some(strip_prefix) = &spec.strip_prefix {
            writeln!(f, "    strip_prefix=\"{}\",", strip_prefix)?;
        }
        if let Some(archive_type) = &spec.archive_type {
            writeln!(f, "    type=\"{}\",", archive_type)?;
        }
        if let Some(mode) = &spec.build_file_proto_mode {
            writeln!(f, "    build_file_proto_mode=\"{}\",", mode)?;
        }
        if !spec.urls.is_empty() {
            let urls: Vec<String> = spec.urls.iter().map(|u| format!("\"{}\"", u)).collect();
            writeln!(f, "    urls=[{}],", urls.join(", "))?;
        }
        writeln!(f, "  )")?;
    }
    Ok(())
}

/// Write the test-aggregation file and return the computed suites.
///
/// For each descriptor in registry order: query the build graph, validate
/// the exclusions, and emit a `test_suite` with the filtered, ordered
/// member list. Discovery or validation failure aborts immediately;
/// already-emitted suites stay in the file.
pub fn write_suites<'a>(
    registry: &'a [RepoSpec],
    discovery: &dyn TargetDiscovery,
    path: &Path,
) -> Result<Vec<Suite<'a>>> {
    let mut f = File::create(path)?;
    write!(f, "{}", COPYRIGHT_HEADER)?;
    let mut computed = Vec::with_capacity(registry.len());
    for spec in registry {
        let discovered = discovery.test_targets(&spec.name)?;
        let targets = suites::included_targets(spec, &discovered)?;
        writeln!(f, "\ntest_suite(")?;
        writeln!(f, "    name = \"{}\",", spec.name)?;
        writeln!(f, "    tests = [")?;
        for target in &targets {
            writeln!(f, "        \"{}\",", target)?;
        }
        writeln!(f, "    ],")?;
        writeln!(f, ")")?;
        computed.push(Suite { spec, targets });
    }
    Ok(computed)
}

/// Write the documentation file from the computed suites.
///
/// One section per descriptor: the name underlined, a link to the
/// importpath, and the suite's member targets as a bulleted list in suite
/// order.
pub fn write_readme(computed: &[Suite<'_>], path: &Path) -> Result<()> {
    let mut f = File::create(path)?;
    write!(f, "{}", DOCS_HEADER)?;
    for suite in computed {
        let name = &suite.spec.name;
        writeln!(f, "{}", name)?;
        writeln!(f, "{}", "_".repeat(name.len()))?;
        writeln!(f)?;
        writeln!(
            f,
            "This runs tests from the repository `{0} <https://{0}>`_",
            suite.spec.importpath
        )?;
        writeln!(f)?;
        for target in &suite.targets {
            writeln!(f, "* {}", target)?;
        }
        writeln!(f)?;
        writeln!(f)?;
    }
    Ok(())
}

/// Run the full generation: declarations, then suites, then documentation.
///
/// Returns per-suite counts for reporting. Any failure propagates and may
/// leave the file being written truncated; earlier files are complete.
pub fn generate(
    registry: &[RepoSpec],
    discovery: &dyn TargetDiscovery,
    out_dir: &Path,
) -> Result<Vec<SuiteStats>> {
    let repositories_path = out_dir.join(REPOSITORIES_FILE);
    write_repositories(registry, &repositories_path)?;
    log::info!("wrote {}", repositories_path.display());

    let suites_path = out_dir.join(SUITES_FILE);
    let computed = write_suites(registry, discovery, &suites_path)?;
    log::info!("wrote {}", suites_path.display());

    let docs_path = out_dir.join(DOCS_FILE);
    write_readme(&computed, &docs_path)?;
    log::info!("wrote {}", docs_path.display());

    Ok(computed
        .iter()
        .map(|suite| SuiteStats {
            name: suite.spec.name.clone(),
            included: suite.targets.len(),
            excluded: suites::effective_excludes(suite.spec).len(),
        })
        .collect())
}
