//! Bibliography marks, configuration and entry templates.

use super::element::Element;
use std::collections::{BTreeMap, HashMap};

/// Data fields of a bibliography mark, in their ODF order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BibField {
    /// Citation key (`text:identifier`)
    Identifier,
    /// Publisher address
    Address,
    /// Annotation
    Annote,
    /// Author names
    Author,
    /// Title of the containing book
    Booktitle,
    /// Chapter
    Chapter,
    /// Edition
    Edition,
    /// Editor names
    Editor,
    /// Publication method for unusual works
    HowPublished,
    /// Sponsoring institution
    Institution,
    /// Journal name
    Journal,
    /// Month of publication
    Month,
    /// Free-form note
    Note,
    /// Issue or report number
    Number,
    /// Sponsoring organizations
    Organizations,
    /// Page range
    Pages,
    /// Publisher name
    Publisher,
    /// School of a thesis
    School,
    /// Book series
    Series,
    /// Title of the work
    Title,
    /// Type of a technical report
    ReportType,
    /// Volume
    Volume,
    /// Year of publication
    Year,
    /// Web address
    Url,
    /// User-defined field 1
    Custom1,
    /// User-defined field 2
    Custom2,
    /// User-defined field 3
    Custom3,
    /// User-defined field 4
    Custom4,
    /// User-defined field 5
    Custom5,
    /// ISBN
    Isbn,
}

impl BibField {
    /// All fields
    pub const ALL: [BibField; 30] = [
        Self::Identifier,
        Self::Address,
        Self::Annote,
        Self::Author,
        Self::Booktitle,
        Self::Chapter,
        Self::Edition,
        Self::Editor,
        Self::HowPublished,
        Self::Institution,
        Self::Journal,
        Self::Month,
        Self::Note,
        Self::Number,
        Self::Organizations,
        Self::Pages,
        Self::Publisher,
        Self::School,
        Self::Series,
        Self::Title,
        Self::ReportType,
        Self::Volume,
        Self::Year,
        Self::Url,
        Self::Custom1,
        Self::Custom2,
        Self::Custom3,
        Self::Custom4,
        Self::Custom5,
        Self::Isbn,
    ];

    /// Name used in `text:*` attributes and `text:bibliography-data-field`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Address => "address",
            Self::Annote => "annote",
            Self::Author => "author",
            Self::Booktitle => "booktitle",
            Self::Chapter => "chapter",
            Self::Edition => "edition",
            Self::Editor => "editor",
            Self::HowPublished => "howpublished",
            Self::Institution => "institution",
            Self::Journal => "journal",
            Self::Month => "month",
            Self::Note => "note",
            Self::Number => "number",
            Self::Organizations => "organizations",
            Self::Pages => "pages",
            Self::Publisher => "publisher",
            Self::School => "school",
            Self::Series => "series",
            Self::Title => "title",
            Self::ReportType => "report-type",
            Self::Volume => "volume",
            Self::Year => "year",
            Self::Url => "url",
            Self::Custom1 => "custom1",
            Self::Custom2 => "custom2",
            Self::Custom3 => "custom3",
            Self::Custom4 => "custom4",
            Self::Custom5 => "custom5",
            Self::Isbn => "isbn",
        }
    }

    /// Parse a field name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.as_str() == name)
    }
}

/// One `text:bibliography-mark`
#[derive(Debug, Clone, PartialEq)]
pub struct BibliographyMark {
    /// Citation key
    pub identifier: String,
    /// `text:bibliography-type` (article, book, …)
    pub entry_type: String,
    /// Field values other than the identifier
    pub fields: BTreeMap<BibField, String>,
}

impl BibliographyMark {
    /// Load from a `text:bibliography-mark` element
    pub fn from_element(node: &Element) -> Self {
        let fields = BibField::ALL
            .iter()
            .filter(|field| **field != BibField::Identifier)
            .filter_map(|field| {
                let value = node.non_empty_attribute(&format!("text:{}", field.as_str()))?;
                Some((*field, value.to_string()))
            })
            .collect();
        Self {
            identifier: node.attribute("text:identifier").unwrap_or_default().to_string(),
            entry_type: node.attribute("text:bibliography-type").unwrap_or_default().to_string(),
            fields,
        }
    }

    /// Value of a field; the identifier is always present
    pub fn field(&self, field: BibField) -> Option<&str> {
        match field {
            BibField::Identifier => Some(&self.identifier),
            _ => self.fields.get(&field).map(String::as_str),
        }
    }
}

/// One `text:sort-key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Field to sort by
    pub field: BibField,
    /// Ascending (default) or descending
    pub ascending: bool,
}

/// A `text:bibliography-configuration` element
#[derive(Debug, Clone, PartialEq)]
pub struct BibliographyConfiguration {
    /// Text before a citation label, `[` unless the document sets one
    pub prefix: String,
    /// Text after a citation label, `]` unless the document sets one
    pub suffix: String,
    /// Label entries by position instead of by identifier
    pub numbered_entries: bool,
    /// Keep document order instead of sorting by `sort_keys`
    pub sort_by_position: bool,
    /// Sort keys in priority order
    pub sort_keys: Vec<SortKey>,
    /// Collation language
    pub language: Option<String>,
    /// Collation country
    pub country: Option<String>,
    /// Collation algorithm name
    pub sort_algorithm: Option<String>,
}

impl Default for BibliographyConfiguration {
    fn default() -> Self {
        Self {
            prefix: "[".to_string(),
            suffix: "]".to_string(),
            numbered_entries: false,
            sort_by_position: true,
            sort_keys: Vec::new(),
            language: None,
            country: None,
            sort_algorithm: None,
        }
    }
}

impl BibliographyConfiguration {
    /// Load from a `text:bibliography-configuration` element.
    ///
    /// Attributes the element leaves out keep their [`Default`] values; an
    /// explicitly empty prefix or suffix stays empty.
    pub fn from_element(node: &Element) -> Self {
        let defaults = Self::default();
        let sort_keys = node
            .child_elements()
            .filter(|child| child.is("text:sort-key"))
            .filter_map(|child| {
                let field = child.attribute("text:key").and_then(BibField::from_name)?;
                Some(SortKey {
                    field,
                    ascending: child.bool_attribute("text:sort-ascending").unwrap_or(true),
                })
            })
            .collect();

        Self {
            prefix: node.attribute("text:prefix").map_or(defaults.prefix, str::to_string),
            suffix: node.attribute("text:suffix").map_or(defaults.suffix, str::to_string),
            numbered_entries: node
                .bool_attribute("text:numbered-entries")
                .unwrap_or(defaults.numbered_entries),
            sort_by_position: node
                .bool_attribute("text:sort-by-position")
                .unwrap_or(defaults.sort_by_position),
            sort_keys,
            language: node.non_empty_attribute("fo:language").map(str::to_string),
            country: node.non_empty_attribute("fo:country").map(str::to_string),
            sort_algorithm: node.non_empty_attribute("text:sort-algorithm").map(str::to_string),
        }
    }
}

/// Piece of a bibliography entry template
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSegment {
    /// Value of a data field
    Field(BibField),
    /// The entry type itself
    EntryType,
    /// Literal text
    Text(String),
    /// Tab stop
    Tab,
}

/// A `text:bibliography-entry-template` for one entry type
#[derive(Debug, Clone, PartialEq)]
pub struct BibliographyTemplate {
    /// Paragraph style of rendered entries
    pub style_name: Option<String>,
    /// Segments in order
    pub segments: Vec<TemplateSegment>,
}

impl BibliographyTemplate {
    fn from_element(node: &Element) -> Self {
        let segments = node
            .child_elements()
            .filter_map(|child| match child.tag_name() {
                "text:index-entry-bibliography" => {
                    match child.attribute("text:bibliography-data-field")? {
                        "bibliography-type" => Some(TemplateSegment::EntryType),
                        name => BibField::from_name(name).map(TemplateSegment::Field),
                    }
                },
                "text:index-entry-span" => Some(TemplateSegment::Text(child.text())),
                "text:index-entry-tab-stop" => Some(TemplateSegment::Tab),
                _ => None,
            })
            .collect();
        Self {
            style_name: node.non_empty_attribute("text:style-name").map(str::to_string),
            segments,
        }
    }
}

/// The `text:bibliography-source` of a bibliography index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BibliographySource {
    /// Index title
    pub title: Option<String>,
    /// Templates keyed by entry type
    pub templates: HashMap<String, BibliographyTemplate>,
}

impl BibliographySource {
    /// Load from a `text:bibliography` element or its source child
    pub fn from_element(node: &Element) -> Self {
        let source = if node.is("text:bibliography-source") {
            node
        } else {
            match node.first_child_element("text:bibliography-source") {
                Some(source) => source,
                None => return Self::default(),
            }
        };

        let title = source
            .first_child_element("text:index-title-template")
            .map(Element::text)
            .filter(|title| !title.is_empty());
        let templates = source
            .child_elements()
            .filter(|child| child.is("text:bibliography-entry-template"))
            .filter_map(|child| {
                let entry_type = child.non_empty_attribute("text:bibliography-type")?;
                Some((entry_type.to_string(), BibliographyTemplate::from_element(child)))
            })
            .collect();
        Self { title, templates }
    }

    /// Template for an entry type
    pub fn template(&self, entry_type: &str) -> Option<&BibliographyTemplate> {
        self.templates.get(entry_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark() {
        let node = Element::new("text:bibliography-mark")
            .with_attribute("text:identifier", "Knuth84")
            .with_attribute("text:bibliography-type", "book")
            .with_attribute("text:author", "Donald E. Knuth")
            .with_attribute("text:title", "The TeXbook")
            .with_attribute("text:report-type", "")
            .with_attribute("text:year", "1984");
        let mark = BibliographyMark::from_element(&node);
        assert_eq!(mark.identifier, "Knuth84");
        assert_eq!(mark.entry_type, "book");
        assert_eq!(mark.field(BibField::Identifier), Some("Knuth84"));
        assert_eq!(mark.field(BibField::Year), Some("1984"));
        assert_eq!(mark.field(BibField::ReportType), None);
        assert_eq!(mark.fields.len(), 3);
        assert_eq!(BibField::from_name("report-type"), Some(BibField::ReportType));
        assert_eq!(BibField::ALL.len(), 30);
    }

    #[test]
    fn test_configuration() {
        let xml = r#"<text:bibliography-configuration text:prefix="(" text:suffix=")" text:numbered-entries="true" text:sort-by-position="false" fo:language="de">
            <text:sort-key text:key="author" text:sort-ascending="true"/>
            <text:sort-key text:key="year" text:sort-ascending="false"/>
            <text:sort-key text:key="bogus"/>
        </text:bibliography-configuration>"#;
        let config = BibliographyConfiguration::from_element(&Element::from_bytes(xml.as_bytes()).unwrap());
        assert_eq!(config.prefix, "(");
        assert!(config.numbered_entries);
        assert!(!config.sort_by_position);
        assert_eq!(
            config.sort_keys,
            vec![
                SortKey { field: BibField::Author, ascending: true },
                SortKey { field: BibField::Year, ascending: false },
            ]
        );
        assert_eq!(config.language.as_deref(), Some("de"));
        assert!(BibliographyConfiguration::default().sort_by_position);
    }

    #[test]
    fn test_configuration_defaults() {
        let config = BibliographyConfiguration::from_element(&Element::new("text:bibliography-configuration"));
        assert_eq!(config, BibliographyConfiguration::default());
        assert_eq!((config.prefix.as_str(), config.suffix.as_str()), ("[", "]"));

        let bare = Element::new("text:bibliography-configuration")
            .with_attribute("text:prefix", "")
            .with_attribute("text:suffix", "");
        let config = BibliographyConfiguration::from_element(&bare);
        assert_eq!((config.prefix.as_str(), config.suffix.as_str()), ("", ""));
    }

    #[test]
    fn test_source_templates() {
        let xml = r#"<text:bibliography text:name="Bibliography1">
            <text:bibliography-source>
                <text:index-title-template>References</text:index-title-template>
                <text:bibliography-entry-template text:bibliography-type="book" text:style-name="Bibliography_20_1">
                    <text:index-entry-bibliography text:bibliography-data-field="identifier"/>
                    <text:index-entry-span>: </text:index-entry-span>
                    <text:index-entry-bibliography text:bibliography-data-field="author"/>
                    <text:index-entry-tab-stop style:type="right"/>
                    <text:index-entry-bibliography text:bibliography-data-field="bibliography-type"/>
                </text:bibliography-entry-template>
            </text:bibliography-source>
        </text:bibliography>"#;
        let source = BibliographySource::from_element(&Element::from_bytes(xml.as_bytes()).unwrap());
        assert_eq!(source.title.as_deref(), Some("References"));
        let template = source.template("book").unwrap();
        assert_eq!(template.style_name.as_deref(), Some("Bibliography_20_1"));
        assert_eq!(
            template.segments,
            vec![
                TemplateSegment::Field(BibField::Identifier),
                TemplateSegment::Text(": ".to_string()),
                TemplateSegment::Field(BibField::Author),
                TemplateSegment::Tab,
                TemplateSegment::EntryType,
            ]
        );
        assert!(source.template("article").is_none());
    }
}
