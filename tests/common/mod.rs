//! Shared test utilities for the E2E tests.
//!
//! `TestFixture` sets up a temporary directory holding a registry file and,
//! when asked, a scripted stand-in for `bazel` that answers `query`
//! invocations with canned target lists. The generate tests point the
//! binary at the script through `--bazel`, so no real Bazel workspace is
//! needed.

use assert_fs::prelude::*;
use std::path::PathBuf;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::registries;
    pub use super::TestFixture;
}

/// Common registry YAML snippets for testing.
#[allow(dead_code)]
pub mod registries {
    /// Single repository, commit-pinned, one exclude.
    pub const SINGLE_WITH_EXCLUDE: &str = r#"
- name: org_demo_lib
  importpath: demo.example.org/lib
  commit: 0123456789abcdef
  excludes:
    - "a:go_default_test"
"#;

    /// Two repositories, second one first alphabetically to catch
    /// accidental sorting of the registry itself.
    pub const TWO_REPOS: &str = r#"
- name: org_demo_lib
  importpath: demo.example.org/lib
  commit: 0123456789abcdef
- name: com_example_helper
  importpath: example.com/helper
  urls:
    - https://example.com/helper/archive/deadbeef.zip
  strip_prefix: helper-deadbeef
  type: zip
"#;

    /// An exclude that no discovered target matches.
    pub const STALE_EXCLUDE: &str = r#"
- name: org_demo_lib
  importpath: demo.example.org/lib
  commit: 0123456789abcdef
  excludes:
    - "gone:go_default_test"
"#;
}

/// A temporary workspace with a registry file and an optional fake bazel.
pub struct TestFixture {
    pub temp: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp: assert_fs::TempDir::new().unwrap(),
        }
    }

    /// Write a registry file named `registry.yaml` with the given content.
    pub fn with_registry(self, content: &str) -> Self {
        self.temp.child("registry.yaml").write_str(content).unwrap();
        self
    }

    pub fn registry_path(&self) -> PathBuf {
        self.temp.child("registry.yaml").path().to_path_buf()
    }

    /// Install a fake `bazel` shell script answering `bazel query <expr>`
    /// with one canned line per target, keyed on the repository name
    /// appearing in the expression. Returns the script path.
    #[cfg(unix)]
    pub fn with_fake_bazel(&self, cases: &[(&str, &[&str])]) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let mut script = String::from("#!/bin/sh\n# fake bazel for tests\ncase \"$2\" in\n");
        for (name, targets) in cases {
            script.push_str(&format!("  *\"@{}//\"*)\n", name));
            for target in *targets {
                script.push_str(&format!("    echo '{}'\n", target));
            }
            script.push_str("    ;;\n");
        }
        script.push_str("  *)\n    echo \"unknown repository\" >&2\n    exit 1\n    ;;\nesac\n");

        let child = self.temp.child("fake-bazel");
        child.write_str(&script).unwrap();
        let path = child.path().to_path_buf();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }
}
