//! Declarations that accompany styles: font faces, notes configuration and
//! master pages.

use super::element::Element;
use super::list::NumFormat;
use super::style::PropertySet;

/// A `style:font-face` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    /// Name referenced by `style:font-name`
    pub name: String,
    /// `svg:font-family`, with surrounding quotes removed
    pub family: Option<String>,
    /// `style:font-family-generic` (roman, swiss, modern, …)
    pub generic_family: Option<String>,
    /// `style:font-pitch` (fixed or variable)
    pub pitch: Option<String>,
}

impl FontFace {
    /// Load from a `style:font-face` element
    pub fn from_element(node: &Element) -> Option<Self> {
        let name = node.non_empty_attribute("style:name")?;
        Some(Self {
            name: name.to_string(),
            family: node
                .attribute("svg:font-family")
                .map(|family| family.trim_matches(|c| c == '\'' || c == '"').to_string()),
            generic_family: node.attribute("style:font-family-generic").map(str::to_string),
            pitch: node.attribute("style:font-pitch").map(str::to_string),
        })
    }

    /// Whether the font has a fixed pitch
    pub fn is_monospace(&self) -> bool {
        self.pitch.as_deref() == Some("fixed") || self.generic_family.as_deref() == Some("modern")
    }
}

/// Which notes a configuration applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteClass {
    /// Footnotes
    Footnote,
    /// Endnotes
    Endnote,
}

impl NoteClass {
    /// Parse `text:note-class`
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "footnote" => Some(Self::Footnote),
            "endnote" => Some(Self::Endnote),
            _ => None,
        }
    }
}

/// A `text:notes-configuration` element
#[derive(Debug, Clone, Default)]
pub struct NotesConfiguration {
    properties: PropertySet,
}

impl NotesConfiguration {
    /// Load from a `text:notes-configuration` element
    pub fn from_element(node: &Element) -> Self {
        Self {
            properties: PropertySet::from_element(node),
        }
    }

    /// Raw attribute access
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    /// Numeral system of the citations
    pub fn num_format(&self) -> NumFormat {
        NumFormat::from_odf(self.get("style:num-format").unwrap_or("1"))
    }

    /// First note number
    pub fn start_value(&self) -> u32 {
        self.get("text:start-value")
            .and_then(|v| v.parse().ok())
            .unwrap_or(1)
    }

    /// Text before each citation number
    pub fn prefix(&self) -> &str {
        self.get("style:num-prefix").unwrap_or("")
    }

    /// Text after each citation number
    pub fn suffix(&self) -> &str {
        self.get("style:num-suffix").unwrap_or("")
    }

    /// Character style of the citation in the note body
    pub fn citation_style_name(&self) -> Option<&str> {
        self.get("text:citation-style-name")
    }

    /// Character style of the citation in the running text
    pub fn citation_body_style_name(&self) -> Option<&str> {
        self.get("text:citation-body-style-name")
    }

    /// Paragraph style of the note text
    pub fn default_style_name(&self) -> Option<&str> {
        self.get("text:default-style-name")
    }

    /// `text:start-numbering-at` (document, chapter or page)
    pub fn start_numbering_at(&self) -> &str {
        self.get("text:start-numbering-at").unwrap_or("document")
    }
}

/// A `style:master-page` element
#[derive(Debug, Clone, PartialEq)]
pub struct MasterPage {
    /// Master page name
    pub name: String,
    /// Display name
    pub display_name: Option<String>,
    /// Page layout used by the master page
    pub page_layout_name: Option<String>,
    /// Master page used for the following page
    pub next_style_name: Option<String>,
}

impl MasterPage {
    /// Load from a `style:master-page` element
    pub fn from_element(node: &Element) -> Option<Self> {
        Some(Self {
            name: node.non_empty_attribute("style:name")?.to_string(),
            display_name: node.non_empty_attribute("style:display-name").map(str::to_string),
            page_layout_name: node.non_empty_attribute("style:page-layout-name").map(str::to_string),
            next_style_name: node.non_empty_attribute("style:next-style-name").map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_face() {
        let node = Element::new("style:font-face")
            .with_attribute("style:name", "Liberation Mono")
            .with_attribute("svg:font-family", "'Liberation Mono'")
            .with_attribute("style:font-pitch", "fixed");
        let face = FontFace::from_element(&node).unwrap();
        assert_eq!(face.family.as_deref(), Some("Liberation Mono"));
        assert!(face.is_monospace());
        assert!(FontFace::from_element(&Element::new("style:font-face")).is_none());
    }

    #[test]
    fn test_notes_configuration() {
        let node = Element::new("text:notes-configuration")
            .with_attribute("text:note-class", "endnote")
            .with_attribute("style:num-format", "i")
            .with_attribute("text:start-value", "3")
            .with_attribute("text:citation-body-style-name", "Endnote_20_anchor");
        let config = NotesConfiguration::from_element(&node);
        assert_eq!(config.num_format(), NumFormat::RomanLower);
        assert_eq!(config.start_value(), 3);
        assert_eq!(config.citation_body_style_name(), Some("Endnote_20_anchor"));
        assert_eq!(config.start_numbering_at(), "document");
        assert_eq!(NoteClass::from_attribute("endnote"), Some(NoteClass::Endnote));
        assert_eq!(NotesConfiguration::default().num_format(), NumFormat::Arabic);
    }

    #[test]
    fn test_master_page() {
        let node = Element::new("style:master-page")
            .with_attribute("style:name", "Standard")
            .with_attribute("style:page-layout-name", "pm1");
        let page = MasterPage::from_element(&node).unwrap();
        assert_eq!(page.page_layout_name.as_deref(), Some("pm1"));
        assert!(page.next_style_name.is_none());
    }
}
