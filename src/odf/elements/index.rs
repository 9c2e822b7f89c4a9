//! Index definitions: table of contents, list of figures and list of tables.

use super::element::Element;
use super::list::LIST_LEVELS;

/// The source definition of a `text:table-of-content`
#[derive(Debug, Clone, PartialEq)]
pub struct TocSource {
    /// `text:name` of the index
    pub name: Option<String>,
    /// Index title
    pub title: Option<String>,
    /// Deepest outline level included
    pub outline_level: u8,
    /// Whether headings are collected by outline level
    pub use_outline_level: bool,
    /// Whether paragraphs with the styles in `index_source_styles` are collected
    pub use_index_source_styles: bool,
    /// Whether `text:toc-mark` elements are collected
    pub use_index_marks: bool,
    /// Paragraph styles collected per outline level
    pub index_source_styles: Vec<(u8, Vec<String>)>,
}

impl TocSource {
    /// Load from a `text:table-of-content` element
    pub fn from_element(node: &Element) -> Self {
        let source = node.first_child_element("text:table-of-content-source");
        let attribute = |name: &str| source.and_then(|s| s.attribute(name));
        let flag = |name: &str, default: bool| {
            source.and_then(|s| s.bool_attribute(name)).unwrap_or(default)
        };

        let index_source_styles = source
            .into_iter()
            .flat_map(|s| s.child_elements())
            .filter(|child| child.is("text:index-source-styles"))
            .filter_map(|child| {
                let level = child.int_attribute("text:outline-level").and_then(|l| u8::try_from(l).ok())?;
                let styles = child
                    .child_elements()
                    .filter(|s| s.is("text:index-source-style"))
                    .filter_map(|s| s.non_empty_attribute("text:style-name").map(str::to_string))
                    .collect();
                Some((level, styles))
            })
            .collect();

        Self {
            name: node.non_empty_attribute("text:name").map(str::to_string),
            title: index_title(source),
            outline_level: attribute("text:outline-level")
                .and_then(|l| l.parse().ok())
                .unwrap_or(LIST_LEVELS as u8),
            use_outline_level: flag("text:use-outline-level", true),
            use_index_source_styles: flag("text:use-index-source-styles", false),
            use_index_marks: flag("text:use-index-marks", true),
            index_source_styles,
        }
    }

    /// All index source style names
    pub fn source_style_names(&self) -> impl Iterator<Item = &str> {
        self.index_source_styles
            .iter()
            .flat_map(|(_, styles)| styles.iter().map(String::as_str))
    }
}

/// Which captions a caption index lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionIndexKind {
    /// `text:illustration-index`
    Figures,
    /// `text:table-index`
    Tables,
}

/// The source definition of a list of figures or list of tables
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionIndexSource {
    /// Figures or tables
    pub kind: CaptionIndexKind,
    /// Index title
    pub title: Option<String>,
    /// Sequence whose captions are listed
    pub caption_sequence_name: Option<String>,
    /// Whether captions (rather than objects) are collected
    pub use_caption: bool,
}

impl CaptionIndexSource {
    /// Load from a `text:illustration-index` or `text:table-index` element
    pub fn from_element(node: &Element) -> Option<Self> {
        let (kind, source_tag) = match node.tag_name() {
            "text:illustration-index" => (CaptionIndexKind::Figures, "text:illustration-index-source"),
            "text:table-index" => (CaptionIndexKind::Tables, "text:table-index-source"),
            _ => return None,
        };
        let source = node.first_child_element(source_tag);
        Some(Self {
            kind,
            title: index_title(source),
            caption_sequence_name: source
                .and_then(|s| s.non_empty_attribute("text:caption-sequence-name"))
                .map(str::to_string),
            use_caption: source.and_then(|s| s.bool_attribute("text:use-caption")).unwrap_or(true),
        })
    }
}

fn index_title(source: Option<&Element>) -> Option<String> {
    source?
        .first_child_element("text:index-title-template")
        .map(Element::text)
        .filter(|title| !title.is_empty())
}
