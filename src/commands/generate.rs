//! # Generate Command Implementation
//!
//! Runs the full batch generation: load the registry, then write the three
//! output files in fixed order (declarations, test suites, documentation).
//! The run is all-or-nothing; the first invalid exclusion or failed
//! `bazel query` aborts with a non-zero exit, possibly leaving the file
//! being written truncated. Output files are disposable, so the remedy is
//! always to fix the registry and rerun.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use popular_repos::config;
use popular_repos::emit;
use popular_repos::output::{emoji, OutputConfig};
use popular_repos::query::BazelQuery;

/// Generate Bazel artifacts from the repository registry
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the registry file.
    #[arg(short, long, value_name = "FILE", default_value = "registry.yaml")]
    pub config: PathBuf,

    /// Directory the output files are written into.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Bazel binary used for target discovery.
    ///
    /// Can also be set with the `BAZEL` environment variable.
    #[arg(long, value_name = "PATH", env = "BAZEL", default_value = "bazel")]
    pub bazel: PathBuf,
}

/// Execute the `generate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: GenerateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    if !args.config.exists() {
        anyhow::bail!("Registry file not found: {}", args.config.display());
    }

    println!(
        "{} Loading registry: {}",
        emoji(&out, "📋", "[LOAD]"),
        args.config.display()
    );
    let registry = config::from_file(&args.config)?;
    println!("   {} repositories", registry.len());

    let discovery = BazelQuery::new(&args.bazel);
    let stats = emit::generate(&registry, &discovery, &args.out_dir)?;

    println!(
        "{} Wrote {}, {}, {} in {}",
        emoji(&out, "✅", "[OK]"),
        emit::REPOSITORIES_FILE,
        emit::SUITES_FILE,
        emit::DOCS_FILE,
        args.out_dir.display()
    );
    for suite in &stats {
        println!(
            "   {}: {} tests included, {} excluded",
            suite.name, suite.included, suite.excluded
        );
    }

    Ok(())
}
