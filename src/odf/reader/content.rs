//! Content-part walk.
//!
//! One recursive pass over the body collects everything renderers need to
//! know before they start emitting: which targets are referenced, where marks
//! and bookmarks sit, which styles headings use, which sequences number
//! captions, and the definitions of indices, forms and bibliography marks.

use super::optimize::optimize_paragraph;
use super::styles::StyleSheet;
use crate::odf::elements::bibliography::{BibliographyMark, BibliographySource};
use crate::odf::elements::draw;
use crate::odf::elements::element::{Element, Node};
use crate::odf::elements::forms::Forms;
use crate::odf::elements::index::{CaptionIndexKind, CaptionIndexSource, TocSource};
use crate::odf::elements::list::LIST_LEVELS;
use crate::odf::elements::style::StyleFamilyKind;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Caption paragraph style that identifies figure captions
const ILLUSTRATION: &str = "Illustration";
/// Caption paragraph style that identifies table captions
const TABLE: &str = "Table";

/// Kinds of cross-reference targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// `text:note-ref` to a footnote
    Footnote,
    /// `text:note-ref` to an endnote
    Endnote,
    /// `text:reference-ref`
    ReferenceMark,
    /// `text:bookmark-ref`
    Bookmark,
    /// `text:sequence-ref`
    Sequence,
}

/// Where a bookmark inside a list sits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPosition {
    /// Active list style, if any list level named one
    pub style_name: Option<String>,
    /// Nesting depth, 1 for a top-level list
    pub depth: usize,
}

/// Cross-reference and definition indices of the content part
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    heading_styles: BTreeMap<u8, String>,
    references: HashSet<(ReferenceKind, String)>,
    heading_marks: HashMap<(ReferenceKind, String), u8>,
    list_bookmarks: HashMap<String, ListPosition>,
    sequence_refs: HashMap<String, String>,
    caption_candidates: Vec<(String, String)>,
    figure_sequence_name: Option<String>,
    table_sequence_name: Option<String>,
    internal_links: HashSet<String>,
    index_source_styles: HashSet<String>,
    toc_sources: Vec<TocSource>,
    caption_indices: Vec<CaptionIndexSource>,
    bibliography_source: Option<BibliographySource>,
    bibliography_marks: Vec<BibliographyMark>,
    forms: Forms,
    first_image: Option<Element>,
}

#[derive(Debug, Clone, Default)]
struct Scope {
    heading_level: u8,
    list_depth: usize,
    list_style: Option<String>,
}

/// Walks the content tree and fills a [`ContentIndex`]
pub(crate) struct ContentWalker<'a> {
    styles: &'a StyleSheet,
    destructive: bool,
    index: ContentIndex,
    paragraph_sequences: Vec<Option<String>>,
}

impl<'a> ContentWalker<'a> {
    pub(crate) fn new(styles: &'a StyleSheet, destructive: bool) -> Self {
        Self {
            styles,
            destructive,
            index: ContentIndex::default(),
            paragraph_sequences: Vec::new(),
        }
    }

    /// Walk a body and return the finished index
    pub(crate) fn walk(mut self, body: &mut Element) -> ContentIndex {
        self.visit_children(body, &Scope::default());
        self.resolve_caption_sequences();
        log::debug!(
            "Content walk: {} references, {} bibliography marks, {} TOCs",
            self.index.references.len(),
            self.index.bibliography_marks.len(),
            self.index.toc_sources.len()
        );
        self.index
    }

    fn visit_children(&mut self, node: &mut Element, scope: &Scope) {
        for child in node.children_mut().iter_mut() {
            if let Node::Element(element) = child {
                self.visit(element, scope);
            }
        }
    }

    fn visit(&mut self, node: &mut Element, scope: &Scope) {
        match node.tag_name() {
            "text:h" => {
                // Out-of-range levels clamp to the nearest outline level
                let level = node
                    .int_attribute("text:outline-level")
                    .map_or(1, |l| l.clamp(1, LIST_LEVELS as i64) as u8);
                self.record_heading_style(node, level);
                let inner = Scope {
                    heading_level: level,
                    ..scope.clone()
                };
                self.visit_paragraph(node, &inner);
            },
            "text:p" => self.visit_paragraph(node, scope),
            "text:list" | "text:ordered-list" | "text:unordered-list" => {
                let inner = Scope {
                    list_depth: scope.list_depth + 1,
                    list_style: node
                        .non_empty_attribute("text:style-name")
                        .map(str::to_string)
                        .or_else(|| scope.list_style.clone()),
                    ..scope.clone()
                };
                self.visit_children(node, &inner);
            },
            "table:table" | "text:note" | "text:footnote" | "text:endnote" => {
                let inner = Scope {
                    heading_level: 0,
                    ..scope.clone()
                };
                self.visit_children(node, &inner);
            },
            "text:sequence" => {
                if let Some(name) = node.non_empty_attribute("text:name") {
                    if let Some(current) = self.paragraph_sequences.last_mut()
                        && current.is_none()
                    {
                        *current = Some(name.to_string());
                    }
                    if let Some(ref_name) = node.non_empty_attribute("text:ref-name") {
                        self.index.sequence_refs.insert(ref_name.to_string(), name.to_string());
                    }
                }
            },
            "text:note-ref" => {
                let kind = match node.attribute("text:note-class") {
                    Some("endnote") => ReferenceKind::Endnote,
                    _ => ReferenceKind::Footnote,
                };
                self.record_reference(node, kind);
            },
            "text:footnote-ref" => self.record_reference(node, ReferenceKind::Footnote),
            "text:endnote-ref" => self.record_reference(node, ReferenceKind::Endnote),
            "text:reference-ref" => self.record_reference(node, ReferenceKind::ReferenceMark),
            "text:bookmark-ref" => self.record_reference(node, ReferenceKind::Bookmark),
            "text:sequence-ref" => self.record_reference(node, ReferenceKind::Sequence),
            "text:reference-mark" | "text:reference-mark-start" => {
                self.record_mark(node, ReferenceKind::ReferenceMark, scope);
            },
            "text:bookmark" | "text:bookmark-start" => {
                self.record_mark(node, ReferenceKind::Bookmark, scope);
            },
            "text:bibliography-mark" => {
                self.index.bibliography_marks.push(BibliographyMark::from_element(node));
            },
            "text:a" => {
                if let Some(target) = node.attribute("xlink:href").and_then(|href| href.strip_prefix('#')) {
                    self.index.internal_links.insert(target.to_string());
                }
                self.visit_children(node, scope);
            },
            "office:forms" => self.index.forms.read(node),
            "text:table-of-content" => {
                let toc = TocSource::from_element(node);
                self.index
                    .index_source_styles
                    .extend(toc.source_style_names().map(str::to_string));
                self.index.toc_sources.push(toc);
            },
            "text:illustration-index" | "text:table-index" => {
                if let Some(source) = CaptionIndexSource::from_element(node) {
                    self.index.caption_indices.push(source);
                }
            },
            "text:bibliography" => {
                if self.index.bibliography_source.is_none() {
                    self.index.bibliography_source = Some(BibliographySource::from_element(node));
                }
            },
            "text:alphabetical-index" | "text:user-index" | "text:object-index" => {},
            draw::IMAGE => {
                if self.index.first_image.is_none() {
                    self.index.first_image = Some(node.clone());
                }
                self.visit_children(node, scope);
            },
            _ => self.visit_children(node, scope),
        }
    }

    fn visit_paragraph(&mut self, node: &mut Element, scope: &Scope) {
        if self.destructive {
            optimize_paragraph(node, self.styles.family(StyleFamilyKind::Text));
        }
        self.paragraph_sequences.push(None);
        self.visit_children(node, scope);
        if let Some(Some(sequence)) = self.paragraph_sequences.pop()
            && let Some(style) = node.non_empty_attribute("text:style-name")
        {
            self.index.caption_candidates.push((style.to_string(), sequence));
        }
    }

    fn record_heading_style(&mut self, node: &Element, level: u8) {
        let Some(name) = node.non_empty_attribute("text:style-name") else {
            return;
        };
        let name = self.styles.family(StyleFamilyKind::Paragraph).resolve_automatic(name);
        self.index
            .heading_styles
            .entry(level)
            .or_insert_with(|| name.to_string());
    }

    fn record_reference(&mut self, node: &Element, kind: ReferenceKind) {
        if let Some(target) = node.non_empty_attribute("text:ref-name") {
            self.index.references.insert((kind, target.to_string()));
        }
    }

    fn record_mark(&mut self, node: &Element, kind: ReferenceKind, scope: &Scope) {
        let Some(name) = node.non_empty_attribute("text:name") else {
            return;
        };
        if scope.heading_level > 0 {
            self.index
                .heading_marks
                .insert((kind, name.to_string()), scope.heading_level);
        } else if scope.list_depth > 0 && kind == ReferenceKind::Bookmark {
            self.index.list_bookmarks.insert(
                name.to_string(),
                ListPosition {
                    style_name: scope.list_style.clone(),
                    depth: scope.list_depth,
                },
            );
        }
    }

    fn resolve_caption_sequences(&mut self) {
        for source in &self.index.caption_indices {
            let slot = match source.kind {
                CaptionIndexKind::Figures => &mut self.index.figure_sequence_name,
                CaptionIndexKind::Tables => &mut self.index.table_sequence_name,
            };
            if slot.is_none() {
                slot.clone_from(&source.caption_sequence_name);
            }
        }

        let paragraphs = self.styles.family(StyleFamilyKind::Paragraph);
        for (style, sequence) in &self.index.caption_candidates {
            let resolved = paragraphs.resolve_automatic(style);
            let display_name = paragraphs.display_name(resolved).unwrap_or(resolved);
            let slot = match display_name {
                ILLUSTRATION => &mut self.index.figure_sequence_name,
                TABLE => &mut self.index.table_sequence_name,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(sequence.clone());
            }
        }
    }
}

/// Name of the first `text:sequence` field inside a paragraph
pub fn first_sequence_name(paragraph: &Element) -> Option<&str> {
    for child in paragraph.child_elements() {
        if child.is("text:sequence") {
            if let Some(name) = child.non_empty_attribute("text:name") {
                return Some(name);
            }
        } else if let Some(name) = first_sequence_name(child) {
            return Some(name);
        }
    }
    None
}

impl ContentIndex {
    /// Style of the first heading found at a level
    pub fn heading_style(&self, level: u8) -> Option<&str> {
        self.heading_styles.get(&level).map(String::as_str)
    }

    /// Whether anything references the target
    pub fn has_reference_to(&self, kind: ReferenceKind, target: &str) -> bool {
        self.references.contains(&(kind, target.to_string()))
    }

    /// Heading level containing a reference mark or bookmark
    pub fn heading_level_of(&self, kind: ReferenceKind, name: &str) -> Option<u8> {
        self.heading_marks.get(&(kind, name.to_string())).copied()
    }

    /// Whether a bookmark sits inside a heading
    pub fn bookmark_in_heading(&self, name: &str) -> bool {
        self.heading_level_of(ReferenceKind::Bookmark, name).is_some()
    }

    /// Whether a reference mark sits inside a heading
    pub fn reference_mark_in_heading(&self, name: &str) -> bool {
        self.heading_level_of(ReferenceKind::ReferenceMark, name).is_some()
    }

    /// List position of a bookmark outside headings
    pub fn bookmark_in_list(&self, name: &str) -> Option<&ListPosition> {
        self.list_bookmarks.get(name)
    }

    /// Whether a hyperlink targets `#name`
    pub fn has_internal_link_to(&self, name: &str) -> bool {
        self.internal_links.contains(name)
    }

    /// Whether a table of contents collects paragraphs of this style
    pub fn is_index_source_style(&self, name: &str) -> bool {
        self.index_source_styles.contains(name)
    }

    /// Sequence name bound to a sequence reference name
    pub fn sequence_from_ref(&self, ref_name: &str) -> Option<&str> {
        self.sequence_refs.get(ref_name).map(String::as_str)
    }

    /// Sequence numbering figure captions
    pub fn figure_sequence_name(&self) -> Option<&str> {
        self.figure_sequence_name.as_deref()
    }

    /// Sequence numbering table captions
    pub fn table_sequence_name(&self) -> Option<&str> {
        self.table_sequence_name.as_deref()
    }

    /// Whether `name` is the figure sequence
    pub fn is_figure_sequence(&self, name: &str) -> bool {
        self.figure_sequence_name() == Some(name)
    }

    /// Whether `name` is the table sequence
    pub fn is_table_sequence(&self, name: &str) -> bool {
        self.table_sequence_name() == Some(name)
    }

    /// Table of contents definitions in document order
    pub fn toc_sources(&self) -> &[TocSource] {
        &self.toc_sources
    }

    /// List of figures and list of tables definitions
    pub fn caption_indices(&self) -> &[CaptionIndexSource] {
        &self.caption_indices
    }

    /// Source of the first bibliography index
    pub fn bibliography_source(&self) -> Option<&BibliographySource> {
        self.bibliography_source.as_ref()
    }

    /// Bibliography marks in document order, duplicates included
    pub fn bibliography_marks(&self) -> &[BibliographyMark] {
        &self.bibliography_marks
    }

    /// Forms of the document
    pub fn forms(&self) -> &Forms {
        &self.forms
    }

    /// First image of the document
    pub fn first_image(&self) -> Option<&Element> {
        self.first_image.as_ref()
    }
}
