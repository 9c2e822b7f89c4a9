//! Common types and utilities shared across the ODF reader.
//!
//! This module provides the crate-wide error type, length arithmetic used by
//! style resolution, and signature-based format detection.

// Submodule declarations
pub mod detection;
pub mod error;
pub mod unit;

// Re-exports for convenience
pub use detection::{ContainerKind, detect_container};
pub use error::{Error, Result};
pub use unit::{Length, LengthUnit};
