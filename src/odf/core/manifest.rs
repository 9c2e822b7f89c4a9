//! ODF manifest parsing functionality.
//!
//! The manifest.xml file lists every file in the package with its media type.
//! The image converter uses it to type embedded pictures before falling back
//! to content sniffing.

use super::embedded::normalize_path;
use crate::common::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// ODF manifest (META-INF/manifest.xml)
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Media type of the package root entry
    pub mimetype: Option<String>,
    /// Entries keyed by normalized path
    pub entries: HashMap<String, ManifestEntry>,
}

/// Entry in the ODF manifest
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    /// Path as written in the manifest
    pub full_path: String,
    /// Declared media type, possibly empty
    pub media_type: String,
    /// Uncompressed size, when declared
    pub size: Option<u64>,
    /// Whether the entry carries encryption data
    pub encrypted: bool,
}

impl Manifest {
    /// Parse manifest XML content
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut manifest = Self::default();
        let mut open_entry: Option<ManifestEntry> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"manifest:file-entry" => open_entry = Self::parse_file_entry(e)?,
                    b"manifest:encryption-data" => {
                        if let Some(entry) = open_entry.as_mut() {
                            entry.encrypted = true;
                        }
                    },
                    _ => {},
                },
                Event::Empty(ref e) => match e.name().as_ref() {
                    b"manifest:file-entry" => {
                        if let Some(entry) = Self::parse_file_entry(e)? {
                            manifest.insert(entry);
                        }
                    },
                    b"manifest:encryption-data" => {
                        if let Some(entry) = open_entry.as_mut() {
                            entry.encrypted = true;
                        }
                    },
                    _ => {},
                },
                Event::End(ref e) if e.name().as_ref() == b"manifest:file-entry" => {
                    if let Some(entry) = open_entry.take() {
                        manifest.insert(entry);
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(manifest)
    }

    fn insert(&mut self, entry: ManifestEntry) {
        if entry.full_path == "/" {
            self.mimetype = Some(entry.media_type.clone()).filter(|m| !m.is_empty());
        }
        self.entries.insert(normalize_path(&entry.full_path), entry);
    }

    /// Parse a single file-entry element
    fn parse_file_entry(e: &BytesStart) -> Result<Option<ManifestEntry>> {
        let mut full_path = String::new();
        let mut media_type = String::new();
        let mut size = None;

        for attr in e.attributes() {
            let attr = attr?;
            let value = attr.unescape_value()?;
            match attr.key.as_ref() {
                b"manifest:full-path" => full_path = value.into_owned(),
                b"manifest:media-type" => media_type = value.into_owned(),
                b"manifest:size" => size = value.parse::<u64>().ok(),
                _ => {},
            }
        }

        if full_path.is_empty() {
            return Ok(None);
        }
        Ok(Some(ManifestEntry {
            full_path,
            media_type,
            size,
            encrypted: false,
        }))
    }

    /// Declared media type of a path; empty declarations count as absent
    pub fn media_type(&self, path: &str) -> Option<&str> {
        self.entries
            .get(&normalize_path(path))
            .map(|entry| entry.media_type.as_str())
            .filter(|media_type| !media_type.is_empty())
    }

    /// Entry for a path
    pub fn entry(&self, path: &str) -> Option<&ManifestEntry> {
        self.entries.get(&normalize_path(path))
    }

    /// Whether any entry is encrypted
    pub fn has_encrypted_entries(&self) -> bool {
        self.entries.values().any(|entry| entry.encrypted)
    }
}

impl std::str::FromStr for Manifest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}
