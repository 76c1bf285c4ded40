//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;
pub mod manifest_writer;

pub use config::BuildDescription;
pub use diagnostic::Diagnostic;
