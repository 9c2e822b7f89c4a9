//! A loaded ODF document: parsed part trees plus the embedded object registry.

use super::core::{CONTENT, EmbeddedObjects, META, Manifest, Metadata, Package, SETTINGS, STYLES};
use super::elements::element::Element;
use super::{OdfFormat, detect_format_from_mime};
use crate::common::{ContainerKind, Result};
use std::path::Path;

/// Parsed XML parts of one document.
///
/// For flat XML documents every part lives in the single root returned by
/// [`OdfDocument::content`]; the separate part accessors return `None`.
#[derive(Debug, Clone)]
pub struct OdfDocument {
    kind: ContainerKind,
    mimetype: Option<String>,
    content: Element,
    styles: Option<Element>,
    meta: Option<Element>,
    settings: Option<Element>,
    manifest: Manifest,
    embedded: EmbeddedObjects,
}

impl OdfDocument {
    /// Open a document file
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use litchi_odf::odf::OdfDocument;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let document = OdfDocument::open("report.odt")?;
    /// println!("{:?}", document.metadata().title);
    /// # Ok(())
    /// # }
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Load a document from bytes of a zip package or flat XML stream
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let package = Package::from_bytes(bytes.into())?;
        let kind = package.kind();
        let mimetype = package.mimetype().map(str::to_string);
        let (parts, manifest, embedded) = package.into_parts();

        let content = match parts.get(CONTENT) {
            Some(bytes) => Element::from_bytes(bytes)?,
            None => return Err(crate::common::Error::ComponentNotFound(CONTENT.to_string())),
        };
        let optional = |name: &str| {
            let bytes = parts.get(name)?;
            match Element::from_bytes(bytes) {
                Ok(root) => Some(root),
                Err(e) => {
                    log::warn!("Ignoring malformed {}: {}", name, e);
                    None
                },
            }
        };

        let document = Self {
            kind,
            mimetype,
            styles: optional(STYLES),
            meta: optional(META),
            settings: optional(SETTINGS),
            content,
            manifest,
            embedded,
        };
        log::debug!(
            "Loaded {:?} document (styles: {}, meta: {})",
            document.kind,
            document.styles.is_some(),
            document.meta.is_some()
        );
        Ok(document)
    }

    /// Container layout
    pub fn container(&self) -> ContainerKind {
        self.kind
    }

    /// Whether the document came from a flat XML stream
    pub fn is_flat(&self) -> bool {
        self.kind == ContainerKind::FlatXml
    }

    /// MIME type declared by the package
    pub fn mimetype(&self) -> Option<&str> {
        self.mimetype.as_deref()
    }

    /// Format from the declared MIME type, or from the flat root's `office:mimetype`
    pub fn format(&self) -> Option<OdfFormat> {
        self.mimetype()
            .or_else(|| self.content.attribute("office:mimetype"))
            .and_then(detect_format_from_mime)
    }

    /// Root of the content part (or of the whole flat document)
    pub fn content(&self) -> &Element {
        &self.content
    }

    /// Mutable root of the content part
    pub fn content_mut(&mut self) -> &mut Element {
        &mut self.content
    }

    /// Root of the styles part
    pub fn styles(&self) -> Option<&Element> {
        self.styles.as_ref()
    }

    /// Root of the meta part
    pub fn meta(&self) -> Option<&Element> {
        self.meta.as_ref()
    }

    /// Root of the settings part
    pub fn settings(&self) -> Option<&Element> {
        self.settings.as_ref()
    }

    /// Package manifest
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Embedded objects
    pub fn embedded(&self) -> &EmbeddedObjects {
        &self.embedded
    }

    /// Mutable embedded objects
    pub fn embedded_mut(&mut self) -> &mut EmbeddedObjects {
        &mut self.embedded
    }

    /// Content root and embedded objects, borrowed together for image extraction
    pub fn content_and_embedded_mut(&mut self) -> (&mut Element, &mut EmbeddedObjects) {
        (&mut self.content, &mut self.embedded)
    }

    /// Document metadata; empty when the document has none
    pub fn metadata(&self) -> Metadata {
        Metadata::from_element(self.meta.as_ref().unwrap_or(&self.content))
    }
}
