//! Style-part loading.
//!
//! Both the styles part and the content part carry style declarations. The
//! styles part is loaded first; a name defined in both keeps its styles-part
//! definition.

use crate::odf::elements::bibliography::BibliographyConfiguration;
use crate::odf::elements::declarations::{FontFace, MasterPage, NoteClass, NotesConfiguration};
use crate::odf::elements::element::Element;
use crate::odf::elements::family::StyleFamily;
use crate::odf::elements::list::ListStyle;
use crate::odf::elements::style::{PropertyCategory, StyleFamilyKind};
use std::collections::HashMap;

/// Where a style container was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOrigin {
    /// `styles.xml`
    Styles,
    /// `content.xml`, or a flat XML document
    Content,
}

/// Every style-like declaration of a document
#[derive(Debug, Clone)]
pub struct StyleSheet {
    families: Vec<StyleFamily>,
    list_styles: HashMap<String, ListStyle>,
    outline_style: Option<ListStyle>,
    master_pages: Vec<MasterPage>,
    font_faces: HashMap<String, FontFace>,
    footnotes: Option<NotesConfiguration>,
    endnotes: Option<NotesConfiguration>,
    bibliography_configuration: Option<BibliographyConfiguration>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            families: StyleFamilyKind::ALL.iter().map(|&kind| StyleFamily::new(kind)).collect(),
            list_styles: HashMap::new(),
            outline_style: None,
            master_pages: Vec::new(),
            font_faces: HashMap::new(),
            footnotes: None,
            endnotes: None,
            bibliography_configuration: None,
        }
    }
}

impl StyleSheet {
    /// Create an empty style sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the style containers below a part root.
    ///
    /// With `soft_automatic_paragraphs` disabled, automatic paragraph styles of
    /// the content part are stored as named styles.
    pub fn load_part(&mut self, root: &Element, origin: PartOrigin, soft_automatic_paragraphs: bool) {
        for child in root.child_elements() {
            match child.tag_name() {
                "office:font-face-decls" => self.load_font_faces(child),
                "office:styles" => self.load_styles(child, false, true),
                "office:automatic-styles" => {
                    let soft = soft_automatic_paragraphs || origin == PartOrigin::Styles;
                    self.load_styles(child, true, soft);
                },
                "office:master-styles" => self.load_master_styles(child),
                _ => {},
            }
        }
        log::debug!(
            "Loaded {:?} part: {} paragraph styles, {} text styles, {} list styles",
            origin,
            self.family(StyleFamilyKind::Paragraph).len(),
            self.family(StyleFamilyKind::Text).len(),
            self.list_styles.len()
        );
    }

    fn load_font_faces(&mut self, node: &Element) {
        for face in node
            .child_elements()
            .filter(|child| child.is("style:font-face"))
            .filter_map(FontFace::from_element)
        {
            self.font_faces.entry(face.name.clone()).or_insert(face);
        }
    }

    fn load_styles(&mut self, node: &Element, automatic: bool, soft_paragraphs: bool) {
        for child in node.child_elements() {
            match child.tag_name() {
                "style:style" => {
                    let Some(kind) = child.attribute("style:family").and_then(StyleFamilyKind::from_attribute) else {
                        log::debug!(
                            "Skipping style '{}' with unknown family",
                            child.attribute("style:name").unwrap_or("")
                        );
                        continue;
                    };
                    let automatic = automatic && (soft_paragraphs || kind != StyleFamilyKind::Paragraph);
                    self.family_mut(kind).load_style(child, automatic);
                },
                "style:default-style" => {
                    if let Some(kind) = child.attribute("style:family").and_then(StyleFamilyKind::from_attribute) {
                        self.family_mut(kind).load_default_style(child);
                    }
                },
                "style:page-layout" => {
                    self.family_mut(StyleFamilyKind::PageLayout).load_style(child, automatic);
                },
                "text:list-style" => {
                    if let Some(name) = child.non_empty_attribute("style:name") {
                        self.list_styles
                            .entry(name.to_string())
                            .or_insert_with(|| ListStyle::from_element(child, automatic));
                    }
                },
                "text:outline-style" => {
                    self.outline_style
                        .get_or_insert_with(|| ListStyle::from_element(child, automatic));
                },
                "text:notes-configuration" => {
                    let slot = match child.attribute("text:note-class").and_then(NoteClass::from_attribute) {
                        Some(NoteClass::Endnote) => &mut self.endnotes,
                        _ => &mut self.footnotes,
                    };
                    slot.get_or_insert_with(|| NotesConfiguration::from_element(child));
                },
                "text:bibliography-configuration" => {
                    self.bibliography_configuration
                        .get_or_insert_with(|| BibliographyConfiguration::from_element(child));
                },
                _ => {},
            }
        }
    }

    fn load_master_styles(&mut self, node: &Element) {
        for page in node
            .child_elements()
            .filter(|child| child.is("style:master-page"))
            .filter_map(MasterPage::from_element)
        {
            if !self.master_pages.iter().any(|p| p.name == page.name) {
                self.master_pages.push(page);
            }
        }
    }

    /// A style family
    pub fn family(&self, kind: StyleFamilyKind) -> &StyleFamily {
        &self.families[kind.index()]
    }

    fn family_mut(&mut self, kind: StyleFamilyKind) -> &mut StyleFamily {
        &mut self.families[kind.index()]
    }

    /// List style by name
    pub fn list_style(&self, name: &str) -> Option<&ListStyle> {
        self.list_styles.get(name)
    }

    /// The outline (heading numbering) style
    pub fn outline_style(&self) -> Option<&ListStyle> {
        self.outline_style.as_ref()
    }

    /// Master pages in definition order
    pub fn master_pages(&self) -> &[MasterPage] {
        &self.master_pages
    }

    /// Master page by name
    pub fn master_page(&self, name: &str) -> Option<&MasterPage> {
        self.master_pages.iter().find(|page| page.name == name)
    }

    /// Font face by name
    pub fn font_face(&self, name: &str) -> Option<&FontFace> {
        self.font_faces.get(name)
    }

    /// Footnote configuration
    pub fn footnotes_configuration(&self) -> Option<&NotesConfiguration> {
        self.footnotes.as_ref()
    }

    /// Endnote configuration
    pub fn endnotes_configuration(&self) -> Option<&NotesConfiguration> {
        self.endnotes.as_ref()
    }

    /// Bibliography configuration, or the ODF defaults
    pub fn bibliography_configuration(&self) -> BibliographyConfiguration {
        self.bibliography_configuration.clone().unwrap_or_default()
    }

    /// Most frequent value of a text property across paragraph styles.
    ///
    /// Styles without the property inherit it, ultimately from the default
    /// paragraph style. Ties go to the value seen first.
    pub fn majority_text_property(&self, key: &str) -> Option<String> {
        let paragraphs = self.family(StyleFamilyKind::Paragraph);
        let mut tally: Vec<(&str, usize)> = Vec::new();
        for style in paragraphs.iter() {
            let Some(value) = paragraphs.get_property(style.name(), PropertyCategory::Text, key, true) else {
                continue;
            };
            match tally.iter_mut().find(|(v, _)| *v == value) {
                Some((_, count)) => *count += 1,
                None => tally.push((value, 1)),
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (value, count) in tally {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value.to_string()).or_else(|| {
            paragraphs
                .default_style()?
                .get_property(PropertyCategory::Text, key)
                .map(str::to_string)
        })
    }
}
