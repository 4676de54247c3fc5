//! # Suite Computation
//!
//! Pure logic for turning a repository's discovered test targets into the
//! member list of its aggregated `test_suite`:
//!
//! 1. Build the effective exclusion set: the base `excludes` list plus
//!    every platform-suffixed list (`*_excludes`, `*_tests`), each entry
//!    namespaced as `@<name>//<suffix>`.
//! 2. Validate that every exclusion names a discovered target. A stale
//!    exclusion is fatal: it usually means the vendored repository moved or
//!    renamed the target and the registry entry needs updating.
//! 3. Sort the discovered targets by the target string with `:` replaced by
//!    `!`, then drop empty strings and excluded targets.
//!
//! The sort key keeps a package's bare target (`@r//pkg`) adjacent to its
//! colon-qualified targets (`@r//pkg:test`) in a stable order: `!` sorts
//! before `/`, so `@r//a:t` comes before `@r//a/b:t`, which plain lexical
//! ordering of labels would reverse.
//!
//! Platform-suffixed lists are merged into every run's exclusion set
//! regardless of the platform the generator runs on. That is established
//! behavior (generated output must stay stable across host platforms) and
//! is kept as-is.

use crate::config::RepoSpec;
use crate::error::{Error, Result};

/// Sort key for suite members: colon-to-bang substitution.
fn sort_key(target: &str) -> String {
    target.replace(':', "!")
}

/// Build the effective exclusion set for a descriptor, fully namespaced.
///
/// Order: the base `excludes` list first, then the platform-suffixed lists
/// in key order. The order only matters for error reporting.
pub fn effective_excludes(spec: &RepoSpec) -> Vec<String> {
    let mut excludes: Vec<String> = spec.excludes.iter().map(|s| spec.label(s)).collect();
    for (key, list) in &spec.platform_lists {
        if key.ends_with("_excludes") || key.ends_with("_tests") {
            excludes.extend(list.iter().map(|s| spec.label(s)));
        }
    }
    excludes
}

/// Compute the included (suite member) targets for a descriptor.
///
/// `discovered` is the raw target list reported by the build-graph query,
/// one label per entry, possibly containing empty strings. Returns the
/// filtered, deterministically ordered member list, or
/// `Error::InvalidExcludes` if any declared exclusion does not match a
/// discovered target.
pub fn included_targets(spec: &RepoSpec, discovered: &[String]) -> Result<Vec<String>> {
    let excludes = effective_excludes(spec);

    let invalid: Vec<String> = excludes
        .iter()
        .filter(|e| !discovered.contains(e))
        .cloned()
        .collect();
    if !invalid.is_empty() {
        return Err(Error::InvalidExcludes {
            repo: spec.name.clone(),
            entries: invalid,
        });
    }

    let mut targets = discovered.to_vec();
    targets.sort_by_cached_key(|t| sort_key(t));
    targets.retain(|t| !t.is_empty() && !excludes.contains(t));
    Ok(targets)
}
