//! ODF package handling.
//!
//! A document arrives either as a zip package with one file per part or as a
//! single flat XML stream. [`Package::from_bytes`] sniffs the first bytes and
//! yields the same set of named parts for both.

use super::embedded::{EmbeddedObjects, normalize_path};
use super::manifest::Manifest;
use crate::common::{ContainerKind, Error, Result, detect_container};
use std::collections::HashMap;
use std::io::{Cursor, Read};

/// Main content part
pub const CONTENT: &str = "content.xml";
/// Styles part
pub const STYLES: &str = "styles.xml";
/// Metadata part
pub const META: &str = "meta.xml";
/// Settings part
pub const SETTINGS: &str = "settings.xml";
/// Manifest part
pub const MANIFEST: &str = "META-INF/manifest.xml";
/// MIME type entry
pub const MIMETYPE: &str = "mimetype";

const MAIN_PARTS: [&str; 6] = [CONTENT, STYLES, META, SETTINGS, MANIFEST, MIMETYPE];

/// The named byte entries of an ODF document
#[derive(Debug, Clone)]
pub struct Package {
    kind: ContainerKind,
    mimetype: Option<String>,
    parts: HashMap<String, Vec<u8>>,
    manifest: Manifest,
    embedded: EmbeddedObjects,
}

impl Package {
    /// Open a package from its raw bytes.
    ///
    /// Fails when the bytes are neither a zip archive nor XML, when the zip
    /// archive is damaged, or when a zip package lacks `content.xml`.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        match detect_container(&bytes) {
            Some(ContainerKind::Package) => Self::from_zip(bytes),
            Some(ContainerKind::FlatXml) => Ok(Self::from_flat_xml(bytes)),
            None => Err(Error::InvalidFormat(
                "Neither a zip package nor a flat XML document".to_string(),
            )),
        }
    }

    fn from_zip(bytes: Vec<u8>) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

        let mut parts = HashMap::new();
        let mut others = Vec::new();
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let name = normalize_path(file.name());
            let mut content = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
            file.read_to_end(&mut content)?;
            if MAIN_PARTS.contains(&name.as_str()) {
                parts.insert(name, content);
            } else {
                others.push((name, content));
            }
        }

        if !parts.contains_key(CONTENT) {
            return Err(Error::ComponentNotFound(CONTENT.to_string()));
        }

        let manifest = match parts.get(MANIFEST).map(|bytes| Manifest::parse(bytes)) {
            Some(Ok(manifest)) => manifest,
            Some(Err(e)) => {
                log::warn!("Ignoring unreadable manifest: {}", e);
                Manifest::default()
            },
            None => {
                log::debug!("Package has no manifest");
                Manifest::default()
            },
        };

        let mimetype = parts
            .get(MIMETYPE)
            .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
            .filter(|mimetype| !mimetype.is_empty())
            .or_else(|| manifest.mimetype.clone());

        let embedded = EmbeddedObjects::from_entries(others, |path| {
            manifest.media_type(path).map(str::to_string)
        });
        log::debug!(
            "Opened zip package with {} parts and {} embedded objects",
            parts.len(),
            embedded.len()
        );

        Ok(Self {
            kind: ContainerKind::Package,
            mimetype,
            parts,
            manifest,
            embedded,
        })
    }

    fn from_flat_xml(bytes: Vec<u8>) -> Self {
        let mut parts = HashMap::new();
        parts.insert(CONTENT.to_string(), bytes);
        Self {
            kind: ContainerKind::FlatXml,
            mimetype: None,
            parts,
            manifest: Manifest::default(),
            embedded: EmbeddedObjects::new(),
        }
    }

    /// Container layout
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// MIME type from the `mimetype` entry or the manifest root
    pub fn mimetype(&self) -> Option<&str> {
        self.mimetype.as_deref()
    }

    /// Bytes of a main part
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(Vec::as_slice)
    }

    /// Whether a main part exists
    pub fn has_part(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    /// Package manifest
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Embedded objects
    pub fn embedded(&self) -> &EmbeddedObjects {
        &self.embedded
    }

    /// Split into parts, manifest and embedded objects
    pub fn into_parts(self) -> (HashMap<String, Vec<u8>>, Manifest, EmbeddedObjects) {
        (self.parts, self.manifest, self.embedded)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Build an in-memory zip package from `(path, bytes)` entries
    pub(crate) fn zip_package(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(bytes).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_zip_package() {
        let bytes = zip_package(&[
            (MIMETYPE, b"application/vnd.oasis.opendocument.text"),
            (CONTENT, b"<office:document-content/>"),
            (
                MANIFEST,
                br#"<manifest:manifest><manifest:file-entry manifest:full-path="Pictures/a.png" manifest:media-type="image/png"/></manifest:manifest>"#,
            ),
            ("Pictures/a.png", b"\x89PNG\r\n\x1a\n"),
        ]);
        let package = Package::from_bytes(bytes).unwrap();
        assert_eq!(package.kind(), ContainerKind::Package);
        assert_eq!(package.mimetype(), Some("application/vnd.oasis.opendocument.text"));
        assert!(package.has_part(CONTENT));
        assert!(!package.has_part(STYLES));
        assert_eq!(
            package.embedded().get("Pictures/a.png").and_then(|o| o.media_type.as_deref()),
            Some("image/png")
        );
    }

    #[test]
    fn test_missing_content() {
        let bytes = zip_package(&[(STYLES, b"<office:document-styles/>")]);
        assert!(matches!(Package::from_bytes(bytes), Err(Error::ComponentNotFound(_))));
    }

    #[test]
    fn test_truncated_zip_is_fatal() {
        let mut bytes = zip_package(&[(CONTENT, b"<office:document-content/>")]);
        bytes.truncate(bytes.len() - 10);
        let err = Package::from_bytes(bytes).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, Error::ZipError(_) | Error::InvalidFormat(_)));
    }

    #[test]
    fn test_flat_xml_and_garbage() {
        let package = Package::from_bytes(b"<?xml version=\"1.0\"?><office:document/>".to_vec()).unwrap();
        assert_eq!(package.kind(), ContainerKind::FlatXml);
        assert!(package.part(CONTENT).is_some());
        assert!(package.embedded().is_empty());

        assert!(matches!(Package::from_bytes(b"%PDF-1.7".to_vec()), Err(Error::InvalidFormat(_))));
    }
}
