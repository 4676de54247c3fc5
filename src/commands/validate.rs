//! # Validate Command Implementation
//!
//! Read-only lint of the registry file. Generation deliberately performs no
//! registry validation beyond the exclusion check (its output must stay
//! reproducible for registries that have always worked), so the structural
//! checks live here instead:
//!
//! - the file parses,
//! - descriptor names are unique and non-empty,
//! - every descriptor carries a source reference (`commit` or `urls`),
//! - archive fields (`strip_prefix`, `type`) only appear alongside `urls`,
//! - exclude entries are non-empty suffixes, not full labels,
//! - importpaths form plausible `https://` URLs.
//!
//! This command never touches the build graph and never writes a file.

use anyhow::Result;
use clap::Args;
use std::collections::HashSet;
use std::path::PathBuf;

use popular_repos::config;
use popular_repos::output::{emoji, OutputConfig};

/// Validate a registry file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the registry file to validate.
    #[arg(short, long, value_name = "FILE", default_value = "registry.yaml")]
    pub config: PathBuf,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    println!(
        "{} Validating registry: {}",
        emoji(&out, "🔍", "[SCAN]"),
        args.config.display()
    );

    let registry = match config::from_file(&args.config) {
        Ok(registry) => {
            println!(
                "{} Registry file parsed successfully ({} repositories)",
                emoji(&out, "✅", "[OK]"),
                registry.len()
            );
            registry
        }
        Err(e) => {
            println!("{} Registry parsing failed: {}", emoji(&out, "❌", "[ERR]"), e);
            return Err(anyhow::anyhow!("Registry parsing failed: {}", e));
        }
    };

    let mut has_warnings = false;
    let mut has_errors = false;

    let mut seen_names: HashSet<&str> = HashSet::new();
    for spec in &registry {
        if spec.name.is_empty() {
            println!(
                "{} Entry for {} has an empty name",
                emoji(&out, "❌", "[ERR]"),
                spec.importpath
            );
            has_errors = true;
        } else if !seen_names.insert(&spec.name) {
            // Duplicate names silently collide in the generated output;
            // generation does not check this.
            println!(
                "{} Duplicate repository name: {}",
                emoji(&out, "❌", "[ERR]"),
                spec.name
            );
            has_errors = true;
        }

        if spec.commit.is_none() && spec.urls.is_empty() {
            println!(
                "{} {} has no source reference (needs commit or urls)",
                emoji(&out, "❌", "[ERR]"),
                spec.name
            );
            has_errors = true;
        }
        if spec.commit.is_some() && !spec.urls.is_empty() {
            println!(
                "{} {} has both commit and urls; urls win at fetch time",
                emoji(&out, "⚠️", "[WARN]"),
                spec.name
            );
            has_warnings = true;
        }
        if spec.urls.is_empty()
            && (spec.strip_prefix.is_some() || spec.archive_type.is_some())
        {
            println!(
                "{} {} sets strip_prefix/type without urls",
                emoji(&out, "⚠️", "[WARN]"),
                spec.name
            );
            has_warnings = true;
        }

        for exclude in spec
            .excludes
            .iter()
            .chain(spec.platform_lists.values().flatten())
        {
            if exclude.is_empty() {
                println!(
                    "{} {} has an empty exclude entry",
                    emoji(&out, "❌", "[ERR]"),
                    spec.name
                );
                has_errors = true;
            } else if exclude.starts_with('@') || exclude.starts_with("//") {
                println!(
                    "{} {} exclude '{}' looks like a full label; use a target suffix",
                    emoji(&out, "⚠️", "[WARN]"),
                    spec.name,
                    exclude
                );
                has_warnings = true;
            }
        }

        if url::Url::parse(&format!("https://{}", spec.importpath)).is_err() {
            println!(
                "{} {} importpath '{}' does not form a valid URL",
                emoji(&out, "⚠️", "[WARN]"),
                spec.name,
                spec.importpath
            );
            has_warnings = true;
        }
    }

    println!("\n{} Validation Result:", emoji(&out, "🎯", "[RESULT]"));

    if has_errors {
        println!(
            "{} Registry has errors that must be fixed",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(anyhow::anyhow!("Registry validation failed"));
    }

    if has_warnings && args.strict {
        println!(
            "{} Registry has warnings (strict mode enabled)",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(anyhow::anyhow!("Registry validation failed in strict mode"));
    }

    if has_warnings {
        println!(
            "{} Registry is valid but has warnings",
            emoji(&out, "⚠️", "[WARN]")
        );
    } else {
        println!("{} Registry is valid", emoji(&out, "✅", "[OK]"));
    }

    Ok(())
}
