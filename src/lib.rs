//! Litchi ODF - OpenDocument model and style resolution
//!
//! This library reads OpenDocument files (.odt, .ods, .odp and their flat XML
//! variants) into a model that document converters can render from.
//!
//! # Features
//!
//! - **Containers**: Zip packages and flat XML, detected from the first bytes
//! - **Styles**: Property inheritance, percentage and relative font-size resolution
//! - **Lists**: List and outline styles with multi-level counters and labels
//! - **Content indices**: Headings, lists, references, captions, indices and forms
//! - **Images**: Extraction, deduplication and optional conversion
//! - **Bibliography**: Citation labels and rendered entries
//!
//! # Example - Resolving a style property
//!
//! ```no_run
//! use litchi_odf::odf::{OfficeReader, PropertyCategory, ReaderOptions, StyleFamilyKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("document.odt")?;
//! let (_document, reader) = OfficeReader::load(bytes, ReaderOptions::default())?;
//!
//! let paragraphs = reader.family(StyleFamilyKind::Paragraph);
//! let margin = paragraphs.get_absolute_property("Text_20_body", PropertyCategory::Paragraph, "fo:margin-left");
//! println!("Left margin: {:?}", margin);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Numbering list items
//!
//! ```no_run
//! use litchi_odf::odf::{OfficeReader, ReaderOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (_document, reader) = OfficeReader::load(std::fs::read("document.odt")?, ReaderOptions::default())?;
//! let mut counter = reader.list_counter("L1");
//! println!("{}", counter.step(1).label());
//! println!("{}", counter.step(2).label());
//! # Ok(())
//! # }
//! ```

/// Common types shared across the crate
///
/// Errors, container detection and measurement units.
pub mod common;

/// OpenDocument model
///
/// Container access, element trees, style families, the document reader and
/// the bibliography generator.
pub mod odf;

/// Image extraction and conversion
pub mod images;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use odf::{OdfDocument, OfficeReader, ReaderOptions};
