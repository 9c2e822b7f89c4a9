//! ODF container detection.

use super::types::ContainerKind;
use super::utils::{ZIP_EMPTY_SIGNATURE, ZIP_SIGNATURE, skip_bom_and_whitespace};

/// Detect whether the bytes hold a zip package or a flat XML document.
///
/// Returns `None` when the stream starts with neither signature.
///
/// # Examples
///
/// ```
/// use litchi_odf::common::detection::{detect_container, ContainerKind};
///
/// assert_eq!(detect_container(b"PK\x03\x04rest"), Some(ContainerKind::Package));
/// assert_eq!(detect_container(b"<?xml version=\"1.0\"?><office:document/>"), Some(ContainerKind::FlatXml));
/// assert_eq!(detect_container(b"%PDF-1.4"), None);
/// ```
pub fn detect_container(bytes: &[u8]) -> Option<ContainerKind> {
    if bytes.starts_with(ZIP_SIGNATURE) || bytes.starts_with(ZIP_EMPTY_SIGNATURE) {
        return Some(ContainerKind::Package);
    }
    if skip_bom_and_whitespace(bytes).starts_with(b"<") {
        return Some(ContainerKind::FlatXml);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_bom_prefixed_xml() {
        let bytes = b"\xEF\xBB\xBF\n  <office:document/>";
        assert_eq!(detect_container(bytes), Some(ContainerKind::FlatXml));
    }

    #[test]
    fn test_rejects_short_and_binary_input() {
        assert_eq!(detect_container(b""), None);
        assert_eq!(detect_container(b"PK"), None);
        assert_eq!(detect_container(&[0xD0, 0xCF, 0x11, 0xE0]), None);
    }
}
