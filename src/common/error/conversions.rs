//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the errors
//! of the underlying crates to the unified Error type.

use super::types::Error;

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipError(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Base64(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::XmlError(format!("Invalid UTF-8: {}", err))
    }
}

#[cfg(feature = "imgconv")]
impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Conversion(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_error_is_fatal() {
        let err: Error = zip::result::ZipError::InvalidArchive("truncated".into()).into();
        assert!(matches!(err, Error::ZipError(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_base64_error_is_local() {
        use base64::Engine;
        let err: Error = base64::engine::general_purpose::STANDARD
            .decode("@@@")
            .unwrap_err()
            .into();
        assert!(!err.is_fatal());
    }
}
