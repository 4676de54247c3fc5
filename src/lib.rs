//! # popular-repos Library
//!
//! Core functionality for the `popular-repos` generator: given a registry
//! of externally-vendored Go repositories, it produces the Bazel build
//! artifacts that wire those repositories' test suites into the workspace.
//!
//! ## Core Concepts
//!
//! - **Registry (`config`)**: the YAML schema for repository descriptors:
//!   name, importpath, source reference, and test-exclusion policy.
//! - **Discovery (`query`)**: the `bazel query` call that reports every
//!   `go_test` target under a vendored repository, behind the
//!   `TargetDiscovery` trait so the pipeline is testable without Bazel.
//! - **Suite computation (`suites`)**: exclusion namespacing, validation,
//!   and the deterministic ordering of suite members.
//! - **Emission (`emit`)**: the three writers — `go_repository`
//!   declarations, `test_suite` aggregations, and the RST documentation —
//!   run in a fixed order.
//!
//! ## Execution Flow
//!
//! `emit::generate` is the batch entry point:
//!
//! 1. Write `popular_repos.bzl` from the registry alone.
//! 2. For each descriptor in registry order: query the build graph,
//!    validate the exclusions, and append its `test_suite` to
//!    `BUILD.bazel`, collecting the included targets.
//! 3. Write `README.rst` from the collected suites.
//!
//! The run is strictly sequential and either fully succeeds or aborts on
//! the first failure; output files may then be partially written and are
//! regenerated in full on the next run.

pub mod config;
pub mod emit;
pub mod error;
pub mod output;
pub mod query;
pub mod suites;
