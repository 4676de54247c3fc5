//! # Registry Schema and Parsing
//!
//! This module defines the data structures for the vendored-repository
//! registry file (`registry.yaml` by default) and the logic for parsing it.
//! The registry is an ordered sequence of repository descriptors; the order
//! in the file is the order in which declarations and suites are emitted.
//!
//! ## Key Components
//!
//! - **`Registry`**: A type alias for `Vec<RepoSpec>`, the whole registry.
//!
//! - **`RepoSpec`**: One vendored repository: its rule name, Go importpath,
//!   source reference (a `commit`, or an explicit `urls`/`strip_prefix`/
//!   `type` archive triple), and its test-exclusion policy.
//!
//! ## Platform-suffixed lists
//!
//! Besides the base `excludes` list, a descriptor may carry arbitrary keys
//! ending in `_excludes` or `_tests` (e.g. `darwin_tests`). These are
//! captured through `#[serde(flatten)]` into an open map and merged into
//! the effective exclusion set unconditionally, matching the established
//! generator behavior. See `suites::effective_excludes`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One vendored repository descriptor.
///
/// Descriptors are authored by hand and never mutated at runtime. `name`
/// doubles as the generated `go_repository` rule name and the `test_suite`
/// name, so it must be unique across the registry; uniqueness is checked by
/// the `validate` subcommand, not during generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSpec {
    /// Unique rule/suite name (e.g. `org_golang_x_net`).
    pub name: String,
    /// Canonical Go import path (e.g. `golang.org/x/net`).
    pub importpath: String,
    /// Pinned commit hash, for repositories fetched with the default
    /// archive naming scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Explicit archive URLs, for repositories that need a non-standard
    /// fetch. Mutually exclusive with `commit` in well-formed registries
    /// (not enforced here).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    /// Directory prefix stripped from the extracted archive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_prefix: Option<String>,
    /// Archive type (e.g. `zip`) when it cannot be inferred from the URL.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub archive_type: Option<String>,
    /// Passthrough for the `go_repository` proto-generation mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_file_proto_mode: Option<String>,
    /// Target suffixes excluded from the aggregated test suite, e.g.
    /// `ssh:go_default_test`. Namespaced as `@<name>//<suffix>` before
    /// matching.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
    /// Open map capturing platform-suffixed lists (`<platform>_excludes`,
    /// `<platform>_tests`). Keys not matching those suffixes are ignored by
    /// the suite computation.
    #[serde(flatten)]
    pub platform_lists: BTreeMap<String, Vec<String>>,
}

impl RepoSpec {
    /// Namespace a target suffix into a fully-qualified label for this
    /// repository: `a:t` becomes `@<name>//a:t`.
    pub fn label(&self, suffix: &str) -> String {
        format!("@{}//{}", self.name, suffix)
    }
}

/// The whole registry: an insertion-ordered sequence of descriptors.
pub type Registry = Vec<RepoSpec>;

/// Parses a YAML string into a `Registry`.
pub fn parse(yaml_content: &str) -> Result<Registry> {
    serde_yaml::from_str::<Registry>(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some("the registry must be a YAML list of repository entries".to_string()),
    })
}

/// Loads and parses a registry file.
pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Registry> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commit_form() {
        let yaml = r#"
- name: org_golang_x_sys
  importpath: golang.org/x/sys
  commit: 0b25a408a50076fbbcae6b7ac0ea5fbb0b085e79
  excludes:
    - "unix:go_default_test"
"#;
        let registry = parse(yaml).unwrap();
        assert_eq!(registry.len(), 1);
        let spec = &registry[0];
        assert_eq!(spec.name, "org_golang_x_sys");
        assert_eq!(spec.importpath, "golang.org/x/sys");
        assert_eq!(
            spec.commit.as_deref(),
            Some("0b25a408a50076fbbcae6b7ac0ea5fbb0b085e79")
        );
        assert!(spec.urls.is_empty());
        assert_eq!(spec.excludes, vec!["unix:go_default_test"]);
        assert!(spec.platform_lists.is_empty());
    }

    #[test]
    fn test_parse_archive_form() {
        let yaml = r#"
- name: org_golang_x_crypto
  importpath: golang.org/x/crypto
  urls:
    - https://codeload.github.com/golang/crypto/zip/81e90905daefcd6fd217b62423c0908922eadb30
  strip_prefix: crypto-81e90905daefcd6fd217b62423c0908922eadb30
  type: zip
  excludes:
    - "ssh:go_default_test"
"#;
        let registry = parse(yaml).unwrap();
        let spec = &registry[0];
        assert!(spec.commit.is_none());
        assert_eq!(spec.urls.len(), 1);
        assert_eq!(
            spec.strip_prefix.as_deref(),
            Some("crypto-81e90905daefcd6fd217b62423c0908922eadb30")
        );
        assert_eq!(spec.archive_type.as_deref(), Some("zip"));
    }

    #[test]
    fn test_parse_platform_suffixed_lists() {
        let yaml = r#"
- name: org_golang_x_net
  importpath: golang.org/x/net
  commit: 57efc9c3d9f91fb3277f8da1cff370539c4d3dc5
  excludes:
    - "bpf:go_default_test"
  darwin_tests:
    - "route:go_default_test"
  windows_excludes:
    - "ipv6:go_default_test"
"#;
        let registry = parse(yaml).unwrap();
        let spec = &registry[0];
        assert_eq!(spec.platform_lists.len(), 2);
        assert_eq!(
            spec.platform_lists["darwin_tests"],
            vec!["route:go_default_test"]
        );
        assert_eq!(
            spec.platform_lists["windows_excludes"],
            vec!["ipv6:go_default_test"]
        );
    }

    #[test]
    fn test_parse_defaults() {
        let yaml = r#"
- name: com_github_mattn_go_sqlite3
  importpath: github.com/mattn/go-sqlite3
  commit: 83772a7051f5e30d8e59746a9e43dfa706b72f3b
"#;
        let registry = parse(yaml).unwrap();
        let spec = &registry[0];
        assert!(spec.excludes.is_empty());
        assert!(spec.build_file_proto_mode.is_none());
    }

    #[test]
    fn test_parse_preserves_order() {
        let yaml = r#"
- name: bbb
  importpath: example.org/bbb
  commit: aaaa
- name: aaa
  importpath: example.org/aaa
  commit: bbbb
"#;
        let registry = parse(yaml).unwrap();
        let names: Vec<&str> = registry.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["bbb", "aaa"]);
    }

    #[test]
    fn test_parse_error_not_a_list() {
        let yaml = "name: just-a-mapping\n";
        let err = parse(yaml).unwrap_err();
        let display = format!("{}", err);
        assert!(display.contains("Registry parsing error"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn test_parse_error_missing_required_field() {
        let yaml = r#"
- importpath: golang.org/x/text
  commit: a9a820217f98f7c8a207ec1e45a874e1fe12c478
"#;
        assert!(parse(yaml).is_err());
    }

    #[test]
    fn test_label_namespacing() {
        let yaml = r#"
- name: org_golang_x_text
  importpath: golang.org/x/text
  commit: a9a8202
"#;
        let registry = parse(yaml).unwrap();
        assert_eq!(
            registry[0].label("encoding/unicode:go_default_test"),
            "@org_golang_x_text//encoding/unicode:go_default_test"
        );
    }

    #[test]
    fn test_from_file_missing() {
        let err = from_file("/nonexistent/registry.yaml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
