//! Format detection utilities.
//!
//! Detection is based on signatures (magic numbers) in the first bytes of the
//! input, reading only the minimal amount of data required for identification.
//! Two questions are answered here: is a byte stream a zipped ODF package or a
//! flat XML document, and which MIME type does an embedded image carry.

// Submodule declarations
pub mod container;
pub mod image;
pub mod types;
pub mod utils;

// Re-exports
pub use container::detect_container;
pub use image::{extension_for_mime, is_vector_mime, mime_from_extension, sniff_image_mime};
pub use types::ContainerKind;
