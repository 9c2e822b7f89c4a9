//! ODF metadata parsing functionality.
//!
//! Reads the `office:meta` element of `meta.xml` (or of a flat XML document)
//! into a plain [`Metadata`] record.

use crate::odf::elements::element::Element;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Document metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document description
    pub description: Option<String>,
    /// Document keywords
    pub keywords: Vec<String>,
    /// Last author
    pub creator: Option<String>,
    /// Original author
    pub initial_creator: Option<String>,
    /// Document language
    pub language: Option<String>,
    /// Creation date
    pub created: Option<DateTime<Utc>>,
    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
    /// Generator application
    pub generator: Option<String>,
    /// Number of editing sessions
    pub editing_cycles: Option<u32>,
    /// Document statistics
    pub statistics: DocumentStatistics,
    /// `meta:user-defined` properties
    pub user_defined: BTreeMap<String, String>,
}

/// Document statistics from metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStatistics {
    /// Number of pages
    pub page_count: Option<u32>,
    /// Number of paragraphs
    pub paragraph_count: Option<u32>,
    /// Number of words
    pub word_count: Option<u32>,
    /// Number of characters
    pub character_count: Option<u32>,
    /// Number of tables
    pub table_count: Option<u32>,
    /// Number of images
    pub image_count: Option<u32>,
    /// Number of objects
    pub object_count: Option<u32>,
}

impl DocumentStatistics {
    fn from_element(node: &Element) -> Self {
        let count = |name: &str| node.attribute(name).and_then(|v| v.parse().ok());
        Self {
            page_count: count("meta:page-count"),
            paragraph_count: count("meta:paragraph-count"),
            word_count: count("meta:word-count"),
            character_count: count("meta:character-count"),
            table_count: count("meta:table-count"),
            image_count: count("meta:image-count"),
            object_count: count("meta:object-count"),
        }
    }
}

impl Metadata {
    /// Read metadata from an `office:document-meta`, `office:document` or
    /// `office:meta` element
    pub fn from_element(root: &Element) -> Self {
        let meta = if root.is("office:meta") {
            Some(root)
        } else {
            root.first_child_element("office:meta")
        };
        let Some(meta) = meta else {
            return Self::default();
        };

        let mut metadata = Self::default();
        for child in meta.child_elements() {
            let text = || Some(child.text().trim().to_string()).filter(|t| !t.is_empty());
            match child.tag_name() {
                "dc:title" => metadata.title = text(),
                "dc:subject" => metadata.subject = text(),
                "dc:description" => metadata.description = text(),
                "dc:creator" => metadata.creator = text(),
                "meta:initial-creator" => metadata.initial_creator = text(),
                "dc:language" => metadata.language = text(),
                "dc:date" => metadata.modified = text().as_deref().and_then(parse_date),
                "meta:creation-date" => metadata.created = text().as_deref().and_then(parse_date),
                "meta:generator" => metadata.generator = text(),
                "meta:editing-cycles" => metadata.editing_cycles = text().and_then(|t| t.parse().ok()),
                "meta:keyword" => metadata.keywords.extend(text()),
                "meta:document-statistic" => {
                    metadata.statistics = DocumentStatistics::from_element(child);
                },
                "meta:user-defined" => {
                    if let Some(name) = child.non_empty_attribute("meta:name") {
                        metadata
                            .user_defined
                            .insert(name.to_string(), child.text().trim().to_string());
                    }
                },
                _ => {},
            }
        }
        metadata
    }

    /// Whether any field is set
    pub fn has_data(&self) -> bool {
        self != &Self::default()
    }
}

/// Parse an ODF date: RFC 3339, a local date-time without zone (taken as
/// UTC), or a bare date.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
