//! Unified error types for the ODF reader.
//!
//! This module provides a single error type covering container, XML and
//! conversion failures, presenting a consistent API to callers.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
