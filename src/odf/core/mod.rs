//! Core ODF container functionality.
//!
//! Container sniffing and part extraction, the manifest, the embedded object
//! registry and document metadata.

/// Embedded object registry
mod embedded;
/// ODF manifest parsing
mod manifest;
/// ODF metadata parsing
mod metadata;
/// ODF package handling
mod package;

pub use embedded::{EmbeddedKind, EmbeddedObject, EmbeddedObjects, normalize_path};
pub use manifest::{Manifest, ManifestEntry};
pub use metadata::{DocumentStatistics, Metadata, parse_date};
pub use package::{CONTENT, MANIFEST, META, MIMETYPE, Package, SETTINGS, STYLES};

#[cfg(test)]
pub(crate) use package::tests::zip_package;
