//! CLI command implementations.

pub mod analyze;
pub mod circuit;
pub mod common;
pub mod rates;
pub mod run;
pub mod sweep;
pub mod version;
