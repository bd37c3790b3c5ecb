//! Shared building blocks for the file repository workspace:
//! logging setup, startup environment checks, and response types
//! used by more than one crate.

pub mod types;
pub mod utils;
pub mod env;
