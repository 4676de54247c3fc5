//! # CLI Command Implementations
//!
//! One module per subcommand. Each module defines an `Args` struct derived
//! with `clap` and an `execute` function that drives the library crate.

pub mod completions;
pub mod generate;
pub mod validate;
