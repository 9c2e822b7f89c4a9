//! OpenDocument model and style resolution.
//!
//! [`OdfDocument`] opens a zip package or a flat XML document and exposes its
//! parts as element trees. [`OfficeReader`] loads the style families, list
//! styles and content indices of a document once; renderers then query it for
//! resolved properties, heading and list styles, cross references and
//! bibliography data.

/// Package container, manifest, metadata and embedded objects
pub mod core;
/// ODF XML element classes
pub mod elements;
/// Style loading and content indexing
pub mod reader;

mod bibliography;
mod document;

/// Re-export the main APIs
pub use bibliography::{
    BibliographyEntry, BibliographyGenerator, BibliographyOptions, EntrySegment,
};
pub use self::core::{Manifest, Metadata, Package};
pub use document::OdfDocument;
pub use elements::bibliography::{BibliographyConfiguration, BibliographyMark, BibliographySource};
pub use elements::counter::{ListCounter, format_number};
pub use elements::element::{Element, Node};
pub use elements::family::StyleFamily;
pub use elements::list::{ListLevel, ListStyle, NumFormat};
pub use elements::style::{PropertyCategory, PropertySet, Style, StyleFamilyKind};
pub use reader::{ContentIndex, Genre, OfficeReader, ReaderOptions, StyleSheet};

/// ODF format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdfFormat {
    /// OpenDocument Text (.odt)
    Text,
    /// OpenDocument Spreadsheet (.ods)
    Spreadsheet,
    /// OpenDocument Presentation (.odp)
    Presentation,
    /// OpenDocument Drawing (.odg)
    Drawing,
    /// OpenDocument Formula (.odf)
    Formula,
    /// OpenDocument Chart (.odc)
    Chart,
    /// OpenDocument Image (.odi)
    Image,
    /// OpenDocument Master (.odm)
    Master,
}

/// MIME types for different ODF formats
pub const ODF_MIME_TYPES: &[(&str, OdfFormat)] = &[
    ("application/vnd.oasis.opendocument.text", OdfFormat::Text),
    ("application/vnd.oasis.opendocument.spreadsheet", OdfFormat::Spreadsheet),
    ("application/vnd.oasis.opendocument.presentation", OdfFormat::Presentation),
    ("application/vnd.oasis.opendocument.graphics", OdfFormat::Drawing),
    ("application/vnd.oasis.opendocument.formula", OdfFormat::Formula),
    ("application/vnd.oasis.opendocument.chart", OdfFormat::Chart),
    ("application/vnd.oasis.opendocument.image", OdfFormat::Image),
    ("application/vnd.oasis.opendocument.text-master", OdfFormat::Master),
    // Template variants
    ("application/vnd.oasis.opendocument.text-template", OdfFormat::Text),
    ("application/vnd.oasis.opendocument.spreadsheet-template", OdfFormat::Spreadsheet),
    ("application/vnd.oasis.opendocument.presentation-template", OdfFormat::Presentation),
    ("application/vnd.oasis.opendocument.graphics-template", OdfFormat::Drawing),
    ("application/vnd.oasis.opendocument.formula-template", OdfFormat::Formula),
    ("application/vnd.oasis.opendocument.chart-template", OdfFormat::Chart),
    ("application/vnd.oasis.opendocument.image-template", OdfFormat::Image),
    // Legacy OpenOffice.org 1.x packages
    ("application/vnd.sun.xml.writer", OdfFormat::Text),
    ("application/vnd.sun.xml.calc", OdfFormat::Spreadsheet),
    ("application/vnd.sun.xml.impress", OdfFormat::Presentation),
    ("application/vnd.sun.xml.draw", OdfFormat::Drawing),
];

/// Detect ODF format from MIME type
pub fn detect_format_from_mime(mime_type: &str) -> Option<OdfFormat> {
    ODF_MIME_TYPES
        .iter()
        .find(|(mime, _)| *mime == mime_type)
        .map(|(_, format)| *format)
}
