//! Style elements for ODF documents.
//!
//! A [`Style`] carries one [`PropertySet`] per property category it populates
//! (a paragraph style typically has paragraph and text properties). Inherited
//! lookups are not done here; they need the surrounding family and live in
//! [`super::family::StyleFamily`].

use super::element::Element;
use crate::common::unit::normalize_unit_suffix;
use phf::phf_map;

/// Property categories, one per `style:*-properties` element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyCategory {
    /// `style:text-properties`
    Text,
    /// `style:paragraph-properties`
    Paragraph,
    /// `style:section-properties`
    Section,
    /// `style:table-properties`
    Table,
    /// `style:table-column-properties`
    Column,
    /// `style:table-row-properties`
    Row,
    /// `style:table-cell-properties`
    Cell,
    /// `style:graphic-properties`
    Graphic,
    /// `style:page-layout-properties` and `style:drawing-page-properties`
    Page,
}

static CATEGORY_ELEMENTS: phf::Map<&'static str, PropertyCategory> = phf_map! {
    "style:text-properties" => PropertyCategory::Text,
    "style:paragraph-properties" => PropertyCategory::Paragraph,
    "style:section-properties" => PropertyCategory::Section,
    "style:table-properties" => PropertyCategory::Table,
    "style:table-column-properties" => PropertyCategory::Column,
    "style:table-row-properties" => PropertyCategory::Row,
    "style:table-cell-properties" => PropertyCategory::Cell,
    "style:graphic-properties" => PropertyCategory::Graphic,
    "style:page-layout-properties" => PropertyCategory::Page,
    "style:drawing-page-properties" => PropertyCategory::Page,
};

impl PropertyCategory {
    /// All categories in slot order
    pub const ALL: [PropertyCategory; 9] = [
        Self::Text,
        Self::Paragraph,
        Self::Section,
        Self::Table,
        Self::Column,
        Self::Row,
        Self::Cell,
        Self::Graphic,
        Self::Page,
    ];

    /// Slot index of this category
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Category of a `style:*-properties` element
    pub fn from_element_name(tag_name: &str) -> Option<Self> {
        CATEGORY_ELEMENTS.get(tag_name).copied()
    }
}

/// Style families, as named by the `style:family` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFamilyKind {
    /// Character styles
    Text,
    /// Paragraph styles
    Paragraph,
    /// Section styles
    Section,
    /// Table styles
    Table,
    /// Table column styles
    TableColumn,
    /// Table row styles
    TableRow,
    /// Table cell styles
    TableCell,
    /// Frame and graphic styles
    Graphic,
    /// Presentation object styles
    Presentation,
    /// Drawing page (slide background) styles
    DrawingPage,
    /// Page layouts (`style:page-layout`)
    PageLayout,
}

impl StyleFamilyKind {
    /// All families
    pub const ALL: [StyleFamilyKind; 11] = [
        Self::Text,
        Self::Paragraph,
        Self::Section,
        Self::Table,
        Self::TableColumn,
        Self::TableRow,
        Self::TableCell,
        Self::Graphic,
        Self::Presentation,
        Self::DrawingPage,
        Self::PageLayout,
    ];

    /// Slot index of this family
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse style family from the `style:family` attribute
    pub fn from_attribute(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "paragraph" => Some(Self::Paragraph),
            "section" => Some(Self::Section),
            "table" => Some(Self::Table),
            "table-column" => Some(Self::TableColumn),
            "table-row" => Some(Self::TableRow),
            "table-cell" => Some(Self::TableCell),
            "graphic" | "graphics" => Some(Self::Graphic),
            "presentation" => Some(Self::Presentation),
            "drawing-page" => Some(Self::DrawingPage),
            _ => None,
        }
    }

    /// Convert to the attribute spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Paragraph => "paragraph",
            Self::Section => "section",
            Self::Table => "table",
            Self::TableColumn => "table-column",
            Self::TableRow => "table-row",
            Self::TableCell => "table-cell",
            Self::Graphic => "graphic",
            Self::Presentation => "presentation",
            Self::DrawingPage => "drawing-page",
            Self::PageLayout => "page-layout",
        }
    }

    /// Categories a style of this family can populate.
    ///
    /// Legacy documents keep every property in one untyped `style:properties`
    /// element; on load it is copied into each of these categories.
    pub fn categories(&self) -> &'static [PropertyCategory] {
        use PropertyCategory as C;
        match self {
            Self::Text => &[C::Text],
            Self::Paragraph => &[C::Paragraph, C::Text],
            Self::Section => &[C::Section],
            Self::Table => &[C::Table],
            Self::TableColumn => &[C::Column],
            Self::TableRow => &[C::Row],
            Self::TableCell => &[C::Cell, C::Paragraph, C::Text],
            Self::Graphic | Self::Presentation => &[C::Graphic, C::Paragraph, C::Text],
            Self::DrawingPage | Self::PageLayout => &[C::Page],
        }
    }
}

/// Property names used for revision tracking; a style holding nothing else is empty
pub const REVISION_MARKERS: &[&str] = &["officeooo:rsid", "officeooo:paragraph-rsid"];

/// An ordered attribute bag loaded from one XML element.
///
/// Values ending in `inch` are stored with the canonical `in` suffix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    name: String,
    properties: Vec<(String, String)>,
}

impl PropertySet {
    /// Create an empty property set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a property set holding all attributes of `node`
    pub fn from_element(node: &Element) -> Self {
        let mut set = Self::new();
        set.load(node);
        set
    }

    /// Copy all attributes of `node` into the set, recording its tag name.
    ///
    /// Attributes already present keep their value.
    pub fn load(&mut self, node: &Element) {
        self.name = node.tag_name().to_string();
        for (key, value) in node.attributes() {
            if self.get(key).is_none() {
                self.properties.push((key.clone(), normalize_unit_suffix(value)));
            }
        }
    }

    /// Tag name of the element this set was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a property value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property value
    pub fn set_property(&mut self, key: &str, value: &str) {
        let value = normalize_unit_suffix(value);
        match self.properties.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.properties.push((key.to_string(), value)),
        }
    }

    /// Number of properties
    pub fn size(&self) -> usize {
        self.properties.len()
    }

    /// Whether the set holds no properties
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate properties in load order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn has_only_revision_markers(&self) -> bool {
        self.properties
            .iter()
            .all(|(k, _)| REVISION_MARKERS.contains(&k.as_str()))
    }
}

/// A named style of one family.
#[derive(Debug, Clone)]
pub struct Style {
    family: StyleFamilyKind,
    name: String,
    display_name: Option<String>,
    parent_name: Option<String>,
    automatic: bool,
    attributes: PropertySet,
    categories: [Option<PropertySet>; 9],
}

impl Style {
    /// Create an empty style
    pub fn new(family: StyleFamilyKind, name: &str) -> Self {
        Self {
            family,
            name: name.to_string(),
            display_name: None,
            parent_name: None,
            automatic: false,
            attributes: PropertySet::new(),
            categories: Default::default(),
        }
    }

    /// Load a style from a `style:style`, `style:default-style` or
    /// `style:page-layout` element.
    pub fn from_element(node: &Element, family: StyleFamilyKind, automatic: bool) -> Self {
        let name = node.attribute("style:name").unwrap_or_default();
        let mut style = Self::new(family, name);
        style.automatic = automatic;
        style.display_name = node.non_empty_attribute("style:display-name").map(str::to_string);
        style.parent_name = node
            .non_empty_attribute("style:parent-style-name")
            .map(str::to_string);
        style.attributes = PropertySet::from_element(node);

        for child in node.child_elements() {
            if let Some(category) = PropertyCategory::from_element_name(child.tag_name()) {
                style.category_mut(category).load(child);
            } else if child.is("style:properties") {
                for &category in family.categories() {
                    style.category_mut(category).load(child);
                }
            }
        }
        style
    }

    /// Get the style family
    pub fn family(&self) -> StyleFamilyKind {
        self.family
    }

    /// Get the style name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the display name, falling back to the internal name
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Get the parent style name
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    /// Whether this is a content-local automatic style
    pub fn is_automatic(&self) -> bool {
        self.automatic
    }

    /// Change the automatic flag
    pub fn set_automatic(&mut self, automatic: bool) {
        self.automatic = automatic;
    }

    /// Attribute of the style element itself (`style:list-style-name`, …)
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Properties of one category, if the style populates it
    pub fn properties(&self, category: PropertyCategory) -> Option<&PropertySet> {
        self.categories[category.index()].as_ref()
    }

    fn category_mut(&mut self, category: PropertyCategory) -> &mut PropertySet {
        self.categories[category.index()].get_or_insert_with(PropertySet::new)
    }

    /// Own property value, without inheritance
    pub fn get_property(&self, category: PropertyCategory, key: &str) -> Option<&str> {
        self.properties(category).and_then(|set| set.get(key))
    }

    /// Set a property value
    pub fn set_property(&mut self, category: PropertyCategory, key: &str, value: &str) {
        self.category_mut(category).set_property(key, value);
    }

    /// Style of the next paragraph
    pub fn next_style_name(&self) -> Option<&str> {
        self.attributes.get("style:next-style-name").filter(|s| !s.is_empty())
    }

    /// List style applied by a paragraph style
    pub fn list_style_name(&self) -> Option<&str> {
        self.attributes.get("style:list-style-name").filter(|s| !s.is_empty())
    }

    /// Master page started by a paragraph or table style
    pub fn master_page_name(&self) -> Option<&str> {
        self.attributes.get("style:master-page-name").filter(|s| !s.is_empty())
    }

    /// Outline level a paragraph style assigns by default
    pub fn default_outline_level(&self) -> Option<u8> {
        self.attributes
            .get("style:default-outline-level")
            .and_then(|s| s.parse().ok())
    }

    /// Style class (`text`, `chapter`, `index`, …)
    pub fn class(&self) -> Option<&str> {
        self.attributes.get("style:class")
    }

    /// Whether the style holds nothing but revision markers.
    pub fn is_empty(&self) -> bool {
        self.parent_name.is_none()
            && self
                .categories
                .iter()
                .flatten()
                .all(PropertySet::has_only_revision_markers)
    }
}
