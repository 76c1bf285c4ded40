//! Test utilities for jpi-manifest unit tests.
//!
//! Fixture builders for configurations, resolution graphs and compiled
//! output directories.
//!
//! # Example
//!
//! ```rust,ignore
//! use jpi_manifest::test_support::{plugin_classpath, OutputDirFixture};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     let classes = OutputDirFixture::new(tmp.path(), "classes")
//!         .plugin_class("org.example.HelloPlugin")
//!         .create();
//!     let config = plugin_classpath("runtimeClasspathJenkins", &[("g", "a", "1.0")]);
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
