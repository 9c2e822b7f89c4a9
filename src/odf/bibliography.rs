//! Bibliography generation from the marks of a document.
//!
//! Marks are deduplicated by citation key (first occurrence wins), optionally
//! sorted by the configured sort keys, and labelled either with their key or
//! with their 1-based position.
//!
//! # Examples
//!
//! ```rust
//! use litchi_odf::odf::{BibliographyConfiguration, BibliographyGenerator, BibliographyOptions};
//! use litchi_odf::odf::elements::bibliography::{BibField, BibliographyMark};
//!
//! let mark = BibliographyMark {
//!     identifier: "Knuth84".to_string(),
//!     entry_type: "book".to_string(),
//!     fields: [(BibField::Author, "Knuth".to_string())].into_iter().collect(),
//! };
//! let config = BibliographyConfiguration { numbered_entries: true, ..Default::default() };
//! let generator = BibliographyGenerator::new(&[mark], config, BibliographyOptions::default());
//! assert_eq!(generator.citation("Knuth84").as_deref(), Some("[1]"));
//! ```

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use log::{debug, warn};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::elements::bibliography::{
    BibField, BibliographyConfiguration, BibliographyMark, BibliographySource, TemplateSegment,
};

/// Rendering options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BibliographyOptions {
    /// Leave the identifier field out of templated entries
    pub skip_identifier: bool,
}

/// Piece of a rendered entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntrySegment {
    /// The entry's label
    Label(String),
    /// A data field value
    Field { field: BibField, value: String },
    /// Literal text
    Text(String),
    /// Tab stop
    Tab,
}

/// One rendered bibliography entry
#[derive(Debug, Clone, PartialEq)]
pub struct BibliographyEntry {
    /// Citation key
    pub key: String,
    /// Label shown for the entry
    pub label: String,
    /// Paragraph style from the template, if one applied
    pub style_name: Option<String>,
    /// Rendered pieces of the entry, in output order
    pub segments: Vec<EntrySegment>,
}

impl BibliographyEntry {
    /// Entry text with tab stops as `\t`
    pub fn to_plain_text(&self) -> String {
        let mut text = String::new();
        for segment in &self.segments {
            match segment {
                EntrySegment::Label(value) | EntrySegment::Text(value) => text.push_str(value),
                EntrySegment::Field { value, .. } => text.push_str(value),
                EntrySegment::Tab => text.push('\t'),
            }
        }
        text
    }
}

/// Orders, labels and renders bibliography entries
#[derive(Debug, Clone)]
pub struct BibliographyGenerator {
    config: BibliographyConfiguration,
    options: BibliographyOptions,
    entries: Vec<BibliographyMark>,
    labels: HashMap<String, String>,
}

impl BibliographyGenerator {
    /// Build the bibliography from the marks of a document.
    ///
    /// Marks sharing an identifier collapse to the first one. Unless the
    /// configuration sorts by position, entries are ordered by its sort keys
    /// using the collation of its language and country.
    ///
    /// ```
    /// use litchi_odf::odf::{BibliographyGenerator, BibliographyMark};
    ///
    /// let mark = BibliographyMark {
    ///     identifier: "Lamport94".to_string(),
    ///     entry_type: "book".to_string(),
    ///     fields: Default::default(),
    /// };
    /// let generator = BibliographyGenerator::new(&[mark.clone(), mark], Default::default(), Default::default());
    /// assert_eq!(generator.len(), 1);
    /// assert!(!generator.is_empty());
    /// assert_eq!(generator.configuration().prefix, "[");
    /// ```
    pub fn new(marks: &[BibliographyMark], config: BibliographyConfiguration, options: BibliographyOptions) -> Self {
        let mut seen = HashSet::new();
        let mut entries: Vec<BibliographyMark> = marks
            .iter()
            .filter(|mark| seen.insert(mark.identifier.as_str()))
            .cloned()
            .collect();
        debug!("Bibliography: {} marks, {} distinct", marks.len(), entries.len());

        if !config.sort_by_position && !config.sort_keys.is_empty() {
            let collation = Collation::for_config(&config);
            entries.sort_by(|a, b| compare_marks(a, b, &config, &collation));
        }

        let labels = entries
            .iter()
            .enumerate()
            .map(|(position, mark)| {
                let label = if config.numbered_entries {
                    (position + 1).to_string()
                } else {
                    mark.identifier.clone()
                };
                (mark.identifier.clone(), label)
            })
            .collect();

        Self {
            config,
            options,
            entries,
            labels,
        }
    }

    /// Configuration the bibliography was built with
    pub fn configuration(&self) -> &BibliographyConfiguration {
        &self.config
    }

    /// Distinct marks in bibliography order
    pub fn entries(&self) -> &[BibliographyMark] {
        &self.entries
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no marks were cited
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label of a citation key
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Citation text for a key: its label wrapped in the configured prefix and suffix
    pub fn citation(&self, key: &str) -> Option<String> {
        let label = self.label(key)?;
        Some(format!("{}{}{}", self.config.prefix, label, self.config.suffix))
    }

    /// Render every entry, using the source's template for its type when
    /// there is one and `label: author, title, year` otherwise
    pub fn render(&self, source: Option<&BibliographySource>) -> Vec<BibliographyEntry> {
        self.entries
            .iter()
            .map(|mark| {
                let label = self.label(&mark.identifier).unwrap_or(mark.identifier.as_str()).to_string();
                match source.and_then(|source| source.template(&mark.entry_type)) {
                    Some(template) => BibliographyEntry {
                        key: mark.identifier.clone(),
                        segments: self.apply_template(mark, &label, &template.segments),
                        style_name: template.style_name.clone(),
                        label,
                    },
                    None => BibliographyEntry {
                        key: mark.identifier.clone(),
                        segments: default_segments(mark, &label),
                        style_name: None,
                        label,
                    },
                }
            })
            .collect()
    }

    fn apply_template(&self, mark: &BibliographyMark, label: &str, template: &[TemplateSegment]) -> Vec<EntrySegment> {
        template
            .iter()
            .filter_map(|segment| match segment {
                TemplateSegment::Field(BibField::Identifier) => {
                    (!self.options.skip_identifier).then(|| EntrySegment::Label(label.to_string()))
                },
                TemplateSegment::Field(field) => mark.field(*field).map(|value| EntrySegment::Field {
                    field: *field,
                    value: value.to_string(),
                }),
                TemplateSegment::EntryType => {
                    (!mark.entry_type.is_empty()).then(|| EntrySegment::Text(mark.entry_type.clone()))
                },
                TemplateSegment::Text(text) => Some(EntrySegment::Text(text.clone())),
                TemplateSegment::Tab => Some(EntrySegment::Tab),
            })
            .collect()
    }
}

fn default_segments(mark: &BibliographyMark, label: &str) -> Vec<EntrySegment> {
    let mut segments = vec![EntrySegment::Label(label.to_string()), EntrySegment::Text(": ".to_string())];
    let fields = [BibField::Author, BibField::Title, BibField::Year]
        .into_iter()
        .filter_map(|field| mark.field(field).map(|value| (field, value)));
    for (i, (field, value)) in fields.enumerate() {
        if i > 0 {
            segments.push(EntrySegment::Text(", ".to_string()));
        }
        segments.push(EntrySegment::Field {
            field,
            value: value.to_string(),
        });
    }
    segments
}

/// String ordering used for sort keys
enum Collation {
    /// Collator for the configured `fo:language` and `fo:country`
    Locale(Collator),
    /// Accent and case folding when no usable language is configured
    Folded,
}

impl Collation {
    fn for_config(config: &BibliographyConfiguration) -> Self {
        let Some(language) = config.language.as_deref() else {
            return Self::Folded;
        };
        let Some(locale) = config
            .country
            .as_deref()
            .and_then(|country| format!("{language}-{country}").parse::<Locale>().ok())
            .or_else(|| language.parse::<Locale>().ok())
        else {
            warn!("Bibliography: unparsable collation language {language:?}");
            return Self::Folded;
        };

        match Collator::try_new(&locale.clone().into(), CollatorOptions::new()) {
            Ok(collator) => Self::Locale(collator),
            Err(e) => {
                warn!("Bibliography: no collator for {locale}: {e:?}");
                Self::Folded
            },
        }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Locale(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
            Self::Folded => collate(a, b),
        }
    }
}

fn compare_marks(
    a: &BibliographyMark,
    b: &BibliographyMark,
    config: &BibliographyConfiguration,
    collation: &Collation,
) -> Ordering {
    for key in &config.sort_keys {
        let order = collation.compare(
            a.field(key.field).unwrap_or_default(),
            b.field(key.field).unwrap_or_default(),
        );
        let order = if key.ascending { order } else { order.reverse() };
        if order != Ordering::Equal {
            return order;
        }
    }
    Ordering::Equal
}

/// Compare ignoring accents and case, falling back to the raw strings
fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::elements::bibliography::SortKey;
    use crate::odf::elements::element::Element;

    fn mark(identifier: &str, author: &str, year: &str) -> BibliographyMark {
        BibliographyMark {
            identifier: identifier.to_string(),
            entry_type: "book".to_string(),
            fields: [
                (BibField::Author, author.to_string()),
                (BibField::Title, format!("Title of {identifier}")),
                (BibField::Year, year.to_string()),
            ]
            .into_iter()
            .collect(),
        }
    }

    fn sorted_config(keys: &[(BibField, bool)]) -> BibliographyConfiguration {
        BibliographyConfiguration {
            sort_by_position: false,
            sort_keys: keys
                .iter()
                .map(|(field, ascending)| SortKey {
                    field: *field,
                    ascending: *ascending,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_duplicates_first_wins() {
        let mut second = mark("A", "Other", "2000");
        second.entry_type = "article".to_string();
        let marks = [mark("A", "Adams", "1999"), mark("B", "Brown", "2001"), second];
        let generator = BibliographyGenerator::new(&marks, BibliographyConfiguration::default(), Default::default());
        assert_eq!(generator.len(), 2);
        assert_eq!(generator.entries()[0].field(BibField::Author), Some("Adams"));
    }

    #[test]
    fn test_numbered_labels_follow_position() {
        let config = BibliographyConfiguration {
            numbered_entries: true,
            ..Default::default()
        };
        let marks = [mark("Z", "Zed", "1"), mark("A", "Ann", "2")];
        let generator = BibliographyGenerator::new(&marks, config, Default::default());
        assert_eq!(generator.label("Z"), Some("1"));
        assert_eq!(generator.label("A"), Some("2"));
        assert_eq!(generator.citation("A").as_deref(), Some("[2]"));
        assert_eq!(generator.citation("missing"), None);
    }

    #[test]
    fn test_keyed_labels() {
        let generator =
            BibliographyGenerator::new(&[mark("Knuth84", "Knuth", "1984")], Default::default(), Default::default());
        assert_eq!(generator.citation("Knuth84").as_deref(), Some("[Knuth84]"));
    }

    #[test]
    fn test_sort_by_keys() {
        let marks = [
            mark("c", "Émile", "2001"),
            mark("a", "eve", "1999"),
            mark("b", "Adam", "2005"),
            mark("d", "eve", "2010"),
        ];
        let config = sorted_config(&[(BibField::Author, true), (BibField::Year, false)]);
        let generator = BibliographyGenerator::new(&marks, config, Default::default());
        let order: Vec<_> = generator.entries().iter().map(|m| m.identifier.as_str()).collect();
        assert_eq!(order, ["b", "c", "d", "a"]);
    }

    #[test]
    fn test_sort_by_position_keeps_document_order() {
        let mut config = sorted_config(&[(BibField::Author, true)]);
        config.sort_by_position = true;
        let marks = [mark("b", "Zed", "1"), mark("a", "Ann", "2")];
        let generator = BibliographyGenerator::new(&marks, config, Default::default());
        assert_eq!(generator.entries()[0].identifier, "b");
    }

    #[test]
    fn test_default_rendering() {
        let mut partial = mark("B", "Brown", "2001");
        partial.fields.remove(&BibField::Title);
        let marks = [mark("A", "Adams", "1999"), partial];
        let generator = BibliographyGenerator::new(&marks, Default::default(), Default::default());
        let entries = generator.render(None);
        assert_eq!(entries[0].to_plain_text(), "A: Adams, Title of A, 1999");
        assert_eq!(entries[1].to_plain_text(), "B: Brown, 2001");
    }

    #[test]
    fn test_template_rendering() {
        let xml = r#"<text:bibliography-source>
            <text:bibliography-entry-template text:bibliography-type="book" text:style-name="Bibliography_1">
                <text:index-entry-bibliography text:bibliography-data-field="identifier"/>
                <text:index-entry-tab-stop/>
                <text:index-entry-bibliography text:bibliography-data-field="author"/>
                <text:index-entry-span>: </text:index-entry-span>
                <text:index-entry-bibliography text:bibliography-data-field="title"/>
                <text:index-entry-span> (</text:index-entry-span>
                <text:index-entry-bibliography text:bibliography-data-field="bibliography-type"/>
                <text:index-entry-span>)</text:index-entry-span>
            </text:bibliography-entry-template>
        </text:bibliography-source>"#;
        let source = BibliographySource::from_element(&Element::from_bytes(xml.as_bytes()).unwrap());
        let mut article = mark("B", "Brown", "2001");
        article.entry_type = "article".to_string();
        let marks = [mark("A", "Adams", "1999"), article];

        let generator = BibliographyGenerator::new(&marks, Default::default(), Default::default());
        let entries = generator.render(Some(&source));
        assert_eq!(entries[0].to_plain_text(), "A\tAdams: Title of A (book)");
        assert_eq!(entries[0].style_name.as_deref(), Some("Bibliography_1"));
        assert_eq!(entries[1].to_plain_text(), "B: Brown, Title of B, 2001");

        let options = BibliographyOptions { skip_identifier: true };
        let generator = BibliographyGenerator::new(&marks, Default::default(), options);
        assert_eq!(generator.render(Some(&source))[0].to_plain_text(), "\tAdams: Title of A (book)");
    }

    #[test]
    fn test_sort_follows_configured_language() {
        let marks = [mark("a", "Ärlig", "2001"), mark("z", "Zorn", "1999")];
        let order = |config: BibliographyConfiguration| -> Vec<String> {
            BibliographyGenerator::new(&marks, config, Default::default())
                .entries()
                .iter()
                .map(|m| m.identifier.clone())
                .collect()
        };

        let mut swedish = sorted_config(&[(BibField::Author, true)]);
        swedish.language = Some("sv".to_string());
        swedish.country = Some("SE".to_string());
        assert_eq!(order(swedish), ["z", "a"]);

        let mut german = sorted_config(&[(BibField::Author, true)]);
        german.language = Some("de".to_string());
        assert_eq!(order(german), ["a", "z"]);

        assert_eq!(order(sorted_config(&[(BibField::Author, true)])), ["a", "z"]);
    }

    #[test]
    fn test_unusable_language_falls_back_to_folding() {
        let mut config = sorted_config(&[(BibField::Author, true)]);
        config.language = Some("not a language".to_string());
        assert!(matches!(Collation::for_config(&config), Collation::Folded));
        assert!(matches!(Collation::for_config(&sorted_config(&[])), Collation::Folded));
    }

    #[test]
    fn test_collation_ignores_accents_and_case() {
        assert_eq!(collation_key("Émile"), "emile");
        assert_eq!(collate("Adam", "eve"), Ordering::Less);
        assert_ne!(collate("Emile", "emile"), Ordering::Equal);
    }
}
