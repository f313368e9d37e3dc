//! CLI command implementations.

pub mod common;
pub mod emit;
pub mod run;
pub mod sweep;
pub mod table;
pub mod version;
