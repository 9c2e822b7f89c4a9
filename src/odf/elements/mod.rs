//! ODF XML element classes.
//!
//! The generic [`element::Element`] tree plus the typed views the reader
//! builds from it: styles and families, list styles and counters, and the
//! declarations, indices, forms and bibliography records found in content.

/// Bibliography marks, configuration and templates
pub mod bibliography;
/// List numbering state
pub mod counter;
/// Font faces, notes configuration, master pages
pub mod declarations;
/// Image and frame helpers
pub mod draw;
/// Core element functionality
pub mod element;
/// Style families and inheritance
pub mod family;
/// Form definitions
pub mod forms;
/// Table of contents and caption index definitions
pub mod index;
/// List and outline styles
pub mod list;
/// Styles and property sets
pub mod style;
