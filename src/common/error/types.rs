//! Unified error types for the ODF reader.
//!
//! Only fatal conditions surface as an [`Error`]: a container that is neither a
//! zip package nor a flat XML document, or a package without its main content
//! part. Everything recoverable (missing optional parts, unknown style names,
//! unreadable images) is reported through `Option` returns and log records.
use thiserror::Error;

/// Main error type for ODF reading operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not a recognizable ODF container
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Mandatory part (such as content.xml) not found
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Malformed base64 payload
    #[error("Base64 error: {0}")]
    Base64(String),

    /// Unsupported feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// A graphics converter rejected or failed a conversion
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for ODF reading operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error aborts a document load.
    ///
    /// Conversion and base64 failures are local to one image and never abort.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Conversion(_) | Error::Base64(_))
    }
}
