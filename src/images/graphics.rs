//! Extracted image records.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Where the image data of a [`BinaryGraphics`] lives
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Image bytes
    Bytes(Vec<u8>),
    /// External link; the caller resolves it
    Linked(String),
    /// No data; the image repeats an earlier extraction
    None,
}

/// One extracted image
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryGraphics {
    file_name: String,
    mime_type: String,
    payload: Payload,
    accepted: bool,
    recycled: bool,
}

impl BinaryGraphics {
    /// Create an image holding bytes
    pub fn new(file_name: String, mime_type: &str, bytes: Vec<u8>, accepted: bool) -> Self {
        Self {
            file_name,
            mime_type: mime_type.to_string(),
            payload: Payload::Bytes(bytes),
            accepted,
            recycled: false,
        }
    }

    /// Create an image referring to an external location
    pub fn linked(href: &str, mime_type: &str, accepted: bool) -> Self {
        Self {
            file_name: href.to_string(),
            mime_type: mime_type.to_string(),
            payload: Payload::Linked(href.to_string()),
            accepted,
            recycled: false,
        }
    }

    /// A payload-free copy marking a repeated reference to this image
    pub fn recycled_copy(&self) -> Self {
        let payload = match &self.payload {
            Payload::Linked(href) => Payload::Linked(href.clone()),
            _ => Payload::None,
        };
        Self {
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            payload,
            accepted: self.accepted,
            recycled: true,
        }
    }

    /// Generated file name, or the link target of linked images
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type, empty when unknown
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Image data
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Image bytes, if this record holds them
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Take the image bytes
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self.payload {
            Payload::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Image bytes encoded as base64
    pub fn to_base64(&self) -> Option<String> {
        self.bytes().map(|bytes| STANDARD.encode(bytes))
    }

    /// Whether the image refers to an external location
    pub fn is_linked(&self) -> bool {
        matches!(self.payload, Payload::Linked(_))
    }

    /// Whether the format is one the caller accepts
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Whether this record repeats an earlier extraction
    pub fn is_recycled(&self) -> bool {
        self.recycled
    }
}
