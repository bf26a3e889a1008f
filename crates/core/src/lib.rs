//! Domain crate for the WordPress admin console.
//!
//! Dependency-light on purpose: error taxonomy, the HTML content sanitizer,
//! input/file validation rules, and small text helpers. No async, no I/O --
//! everything here is pure logic shared by the gateway and HTTP crates.

pub mod error;
pub mod sanitizer;
pub mod text;
pub mod validation;

pub use error::CoreError;
