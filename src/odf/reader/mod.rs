//! Document reader.
//!
//! [`OfficeReader`] loads the styles of a document and walks its content once,
//! producing the lookups renderers rely on: style resolution, list and
//! outline styles, the cross-reference indices and the document genre.
//!
//! # Examples
//!
//! ```no_run
//! use litchi_odf::odf::{OdfDocument, OfficeReader, ReaderOptions, StyleFamilyKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut document = OdfDocument::open("report.odt")?;
//! let reader = OfficeReader::new(&mut document, ReaderOptions::default());
//!
//! if let Some(style) = reader.heading_style(1) {
//!     let size = reader.family(StyleFamilyKind::Paragraph).get_absolute_font_size(style);
//!     println!("Heading 1 uses {} at {:?}", style, size);
//! }
//! println!("Language: {:?}", reader.major_language());
//! # Ok(())
//! # }
//! ```

mod content;
mod optimize;
mod options;
mod styles;

pub use content::{ContentIndex, ListPosition, ReferenceKind, first_sequence_name};
pub use optimize::optimize_paragraph;
pub use options::ReaderOptions;
pub use styles::{PartOrigin, StyleSheet};

use super::bibliography::{BibliographyGenerator, BibliographyOptions};
use super::core::Metadata;
use super::document::OdfDocument;
use super::elements::bibliography::{BibliographyConfiguration, BibliographyMark};
use super::elements::counter::ListCounter;
use super::elements::element::Element;
use super::elements::family::StyleFamily;
use super::elements::list::ListStyle;
use super::elements::style::StyleFamilyKind;
use crate::common::Result;
use content::ContentWalker;
use std::ops::Deref;

/// Kind of document content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    /// Word processing
    Text,
    /// Spreadsheet
    Spreadsheet,
    /// Presentation or drawing
    Presentation,
}

/// Styles and content indices of one document
#[derive(Debug, Clone)]
pub struct OfficeReader {
    options: ReaderOptions,
    styles: StyleSheet,
    index: ContentIndex,
    genre: Genre,
    oasis: bool,
    metadata: Metadata,
}

impl OfficeReader {
    /// Read a document.
    ///
    /// In destructive mode the content tree of `document` is optimized in
    /// place during the walk.
    pub fn new(document: &mut OdfDocument, options: ReaderOptions) -> Self {
        let mut styles = StyleSheet::new();
        if let Some(root) = document.styles() {
            styles.load_part(root, PartOrigin::Styles, options.soft_automatic_paragraphs);
        } else {
            log::debug!("No styles part, using content-part styles only");
        }
        styles.load_part(document.content(), PartOrigin::Content, options.soft_automatic_paragraphs);

        let metadata = document.metadata();
        let (genre, oasis) = detect_genre(document.content());

        let walker = ContentWalker::new(&styles, options.destructive);
        let index = match body_mut(document.content_mut()) {
            Some(body) => walker.walk(body),
            None => {
                log::warn!("Document has no office:body");
                ContentIndex::default()
            },
        };

        Self {
            options,
            styles,
            index,
            genre,
            oasis,
            metadata,
        }
    }

    /// Open and read a document in one step
    pub fn load(bytes: impl Into<Vec<u8>>, options: ReaderOptions) -> Result<(OdfDocument, Self)> {
        let mut document = OdfDocument::from_bytes(bytes)?;
        let reader = Self::new(&mut document, options);
        Ok((document, reader))
    }

    /// Options the document was read with
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// All style declarations
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Content indices
    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    /// A style family
    pub fn family(&self, kind: StyleFamilyKind) -> &StyleFamily {
        self.styles.family(kind)
    }

    /// Bibliography configuration, or the ODF defaults
    pub fn bibliography_configuration(&self) -> BibliographyConfiguration {
        self.styles.bibliography_configuration()
    }

    /// Bibliography marks in document order
    pub fn bibliography_marks(&self) -> &[BibliographyMark] {
        self.index.bibliography_marks()
    }

    /// Bibliography of the document's marks under its configuration
    pub fn bibliography(&self, options: BibliographyOptions) -> BibliographyGenerator {
        BibliographyGenerator::new(self.bibliography_marks(), self.bibliography_configuration(), options)
    }

    /// A list style, or the outline style when `name` is `None`
    pub fn list_style(&self, name: Option<&str>) -> Option<&ListStyle> {
        match name {
            Some(name) => self.styles.list_style(name),
            None => self.styles.outline_style(),
        }
    }

    /// Counter labelling with the named list style
    pub fn list_counter(&self, name: &str) -> ListCounter<'_> {
        ListCounter::new(self.styles.list_style(name))
    }

    /// Counter labelling with the outline style
    pub fn outline_counter(&self) -> ListCounter<'_> {
        ListCounter::new(self.styles.outline_style())
    }

    /// Document metadata
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Content genre
    pub fn genre(&self) -> Genre {
        self.genre
    }

    /// Whether the document uses the OASIS container layout
    pub fn is_oasis(&self) -> bool {
        self.oasis
    }

    /// Whether the document is a word processing document
    pub fn is_text(&self) -> bool {
        self.genre == Genre::Text
    }

    /// Whether the document is a spreadsheet
    pub fn is_spreadsheet(&self) -> bool {
        self.genre == Genre::Spreadsheet
    }

    /// Whether the document is a presentation or drawing
    pub fn is_presentation(&self) -> bool {
        self.genre == Genre::Presentation
    }

    /// Most frequent language across paragraph styles
    pub fn major_language(&self) -> Option<String> {
        self.styles.majority_text_property("fo:language")
    }

    /// Most frequent country across paragraph styles
    pub fn major_country(&self) -> Option<String> {
        self.styles.majority_text_property("fo:country")
    }
}

impl Deref for OfficeReader {
    type Target = ContentIndex;

    fn deref(&self) -> &ContentIndex {
        &self.index
    }
}

fn body_mut(root: &mut Element) -> Option<&mut Element> {
    if root.is("office:body") {
        return Some(root);
    }
    root.child_elements_mut().find(|child| child.is("office:body"))
}

/// Detect genre and container generation from the body.
///
/// OASIS documents wrap the body content in `office:text`,
/// `office:spreadsheet`, `office:presentation` or `office:drawing`. Older
/// documents put content directly below `office:body`.
pub fn detect_genre(root: &Element) -> (Genre, bool) {
    let body = if root.is("office:body") {
        Some(root)
    } else {
        root.first_child_element("office:body")
    };
    let Some(body) = body else {
        return (Genre::Text, false);
    };

    for child in body.child_elements() {
        match child.tag_name() {
            "office:text" => return (Genre::Text, true),
            "office:spreadsheet" => return (Genre::Spreadsheet, true),
            "office:presentation" | "office:drawing" => return (Genre::Presentation, true),
            _ => {},
        }
    }

    for child in body.child_elements() {
        match child.tag_name() {
            "text:p" | "text:h" | "text:list" | "text:ordered-list" | "text:unordered-list" | "text:section" => {
                return (Genre::Text, false);
            },
            "draw:page" => return (Genre::Presentation, false),
            _ => {},
        }
    }
    (Genre::Spreadsheet, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::core::{CONTENT, MIMETYPE, STYLES, zip_package};
    use crate::odf::elements::style::PropertyCategory;

    const STYLES_XML: &str = r#"<office:document-styles>
  <office:styles>
    <style:default-style style:family="paragraph">
      <style:text-properties fo:language="nb" fo:country="NO"/>
    </style:default-style>
    <style:style style:name="Default" style:family="paragraph">
      <style:text-properties fo:font-size="12pt"/>
    </style:style>
    <style:style style:name="Heading" style:family="paragraph" style:parent-style-name="Default">
      <style:text-properties fo:font-size="150%"/>
    </style:style>
    <style:style style:name="Strong" style:family="text"><style:text-properties fo:font-weight="bold"/></style:style>
    <text:outline-style style:name="Outline">
      <text:outline-level-style text:level="1" style:num-format="1" style:num-suffix="."/>
    </text:outline-style>
  </office:styles>
</office:document-styles>"#;

    const CONTENT_XML: &str = r#"<office:document-content>
  <office:automatic-styles>
    <style:style style:name="P1" style:family="paragraph" style:parent-style-name="Default"/>
    <style:style style:name="P2" style:family="paragraph" style:parent-style-name="Heading"/>
    <style:style style:name="T1" style:family="text"><style:text-properties officeooo:rsid="0001"/></style:style>
    <text:list-style style:name="L1">
      <text:list-level-style-number text:level="1" style:num-format="1" style:num-suffix="."/>
    </text:list-style>
  </office:automatic-styles>
  <office:body>
    <office:text>
      <text:h text:style-name="P2" text:outline-level="1">Title</text:h>
      <text:p text:style-name="P1"><text:span text:style-name="T1">Hel</text:span><text:span text:style-name="T1">lo</text:span></text:p>
    </office:text>
  </office:body>
</office:document-content>"#;

    fn package() -> Vec<u8> {
        zip_package(&[
            (MIMETYPE, b"application/vnd.oasis.opendocument.text"),
            (STYLES, STYLES_XML.as_bytes()),
            (CONTENT, CONTENT_XML.as_bytes()),
        ])
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_read_document() {
        init_logger();
        let (_, reader) = OfficeReader::load(package(), ReaderOptions::default()).unwrap();
        assert!(reader.is_text());
        assert!(reader.is_oasis());
        assert_eq!(reader.heading_style(1), Some("Heading"));

        let paragraphs = reader.family(StyleFamilyKind::Paragraph);
        assert_eq!(paragraphs.get_absolute_font_size("P1").as_deref(), Some("12pt"));
        assert_eq!(paragraphs.get_absolute_font_size("P2").as_deref(), Some("18pt"));
        assert_eq!(
            paragraphs.get_property("P2", PropertyCategory::Text, "fo:language", true),
            Some("nb")
        );
        assert_eq!(reader.major_language().as_deref(), Some("nb"));
        assert_eq!(reader.major_country().as_deref(), Some("NO"));

        let mut counter = reader.outline_counter();
        assert_eq!(counter.step(1).label(), "1. ");
        assert_eq!(reader.list_counter("L1").step(1).label(), "1. ");
        assert!(reader.list_style(Some("L2")).is_none());
        assert!(reader.list_style(None).is_some_and(ListStyle::is_outline));
    }

    #[test]
    fn test_destructive_mode_rewrites_content() {
        let mut document = OdfDocument::from_bytes(package()).unwrap();
        OfficeReader::new(&mut document, ReaderOptions::new().with_destructive(true));
        let paragraph = document
            .content()
            .find_descendant("text:p")
            .unwrap();
        assert_eq!(paragraph.children().len(), 1);
        assert_eq!(paragraph.children()[0].as_text(), Some("Hello"));

        let mut document = OdfDocument::from_bytes(package()).unwrap();
        OfficeReader::new(&mut document, ReaderOptions::default());
        let paragraph = document.content().find_descendant("text:p").unwrap();
        assert_eq!(paragraph.children().len(), 2);
    }

    #[test]
    fn test_genre_detection() {
        let genre = |xml: &str| detect_genre(&Element::from_bytes(xml.as_bytes()).unwrap());
        assert_eq!(
            genre("<office:document-content><office:body><office:spreadsheet/></office:body></office:document-content>"),
            (Genre::Spreadsheet, true)
        );
        assert_eq!(
            genre("<office:document><office:body><office:drawing/></office:body></office:document>"),
            (Genre::Presentation, true)
        );
        assert_eq!(
            genre("<office:document-content><office:body><text:h/></office:body></office:document-content>"),
            (Genre::Text, false)
        );
        assert_eq!(
            genre("<office:document-content><office:body><draw:page/></office:body></office:document-content>"),
            (Genre::Presentation, false)
        );
        assert_eq!(
            genre("<office:document-content><office:body><table:table/></office:body></office:document-content>"),
            (Genre::Spreadsheet, false)
        );
    }

    #[test]
    fn test_flat_document_without_styles_part() {
        let xml = r#"<office:document>
  <office:styles><style:style style:name="S" style:family="paragraph"/></office:styles>
  <office:body><office:presentation><draw:page/></office:presentation></office:body>
</office:document>"#;
        let (_, reader) = OfficeReader::load(xml.as_bytes(), ReaderOptions::default()).unwrap();
        assert!(reader.is_presentation());
        assert!(reader.family(StyleFamilyKind::Paragraph).contains("S"));
        assert!(reader.first_image().is_none());
    }

    #[test]
    fn test_bibliography_from_document() {
        init_logger();
        let xml = r#"<office:document>
  <office:styles>
    <text:bibliography-configuration text:prefix="(" text:suffix=")" text:numbered-entries="true"/>
  </office:styles>
  <office:body><office:text>
    <text:p>See <text:bibliography-mark text:identifier="Knuth84" text:bibliography-type="book" text:author="Knuth" text:title="The TeXbook" text:year="1984">[Knuth84]</text:bibliography-mark>
    and <text:bibliography-mark text:identifier="Lamport94" text:bibliography-type="book" text:author="Lamport" text:title="LaTeX" text:year="1994">[Lamport94]</text:bibliography-mark>
    and again <text:bibliography-mark text:identifier="Knuth84" text:bibliography-type="book"/>.</text:p>
  </office:text></office:body>
</office:document>"#;
        let (_, reader) = OfficeReader::load(xml.as_bytes(), ReaderOptions::default()).unwrap();
        assert_eq!(reader.bibliography_marks().len(), 3);

        let bibliography = reader.bibliography(Default::default());
        assert_eq!(bibliography.len(), 2);
        assert_eq!(bibliography.citation("Lamport94").as_deref(), Some("(2)"));
        let entries = bibliography.render(reader.bibliography_source());
        assert_eq!(entries[0].to_plain_text(), "1: Knuth, The TeXbook, 1984");
    }
}
