//! Image MIME type detection.
//!
//! Used when a package manifest declares no media type for an embedded picture,
//! and for pictures stored inline as base64.

use phf::phf_map;

pub const MIME_PNG: &str = "image/png";
pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_GIF: &str = "image/gif";
pub const MIME_BMP: &str = "image/bmp";
pub const MIME_TIFF: &str = "image/tiff";
pub const MIME_WEBP: &str = "image/webp";
pub const MIME_SVG: &str = "image/svg+xml";
pub const MIME_EMF: &str = "image/x-emf";
pub const MIME_WMF: &str = "image/x-wmf";
pub const MIME_SVM: &str = "image/x-svm";
pub const MIME_EPS: &str = "image/x-eps";
pub const MIME_PDF: &str = "application/pdf";

/// Vector formats, eligible for conversion to a vector target
pub const VECTOR_MIME_TYPES: &[&str] = &[MIME_SVG, MIME_EMF, MIME_WMF, MIME_SVM, MIME_EPS, MIME_PDF];

static EXTENSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "png" => MIME_PNG,
    "jpg" => MIME_JPEG,
    "jpeg" => MIME_JPEG,
    "gif" => MIME_GIF,
    "bmp" => MIME_BMP,
    "tif" => MIME_TIFF,
    "tiff" => MIME_TIFF,
    "webp" => MIME_WEBP,
    "svg" => MIME_SVG,
    "emf" => MIME_EMF,
    "wmf" => MIME_WMF,
    "svm" => MIME_SVM,
    "eps" => MIME_EPS,
    "pdf" => MIME_PDF,
};

/// Detect the MIME type of image data from its signature.
pub fn sniff_image_mime(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(MIME_PNG)
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(MIME_JPEG)
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some(MIME_GIF)
    } else if data.starts_with(b"BM") && data.len() > 14 {
        Some(MIME_BMP)
    } else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
        Some(MIME_TIFF)
    } else if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        Some(MIME_WEBP)
    } else if data.len() >= 44 && data.starts_with(&[0x01, 0, 0, 0]) && &data[40..44] == b" EMF" {
        Some(MIME_EMF)
    } else if data.starts_with(&[0xD7, 0xCD, 0xC6, 0x9A]) || data.starts_with(&[0x01, 0x00, 0x09, 0x00]) {
        Some(MIME_WMF)
    } else if data.starts_with(b"VCLMTF") {
        Some(MIME_SVM)
    } else if data.starts_with(b"%!PS") || data.starts_with(&[0xC5, 0xD0, 0xD3, 0xC6]) {
        Some(MIME_EPS)
    } else if data.starts_with(b"%PDF") {
        Some(MIME_PDF)
    } else if is_svg(data) {
        Some(MIME_SVG)
    } else {
        None
    }
}

fn is_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(1024)];
    let head = super::utils::skip_bom_and_whitespace(head);
    head.starts_with(b"<") && super::utils::find_in_buffer(head, b"<svg").is_some()
}

/// Guess a MIME type from the extension of a file name or URL.
pub fn mime_from_extension(path: &str) -> Option<&'static str> {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let (_, ext) = name.rsplit_once('.')?;
    EXTENSIONS.get(ext.to_ascii_lowercase().as_str()).copied()
}

/// File extension (with leading dot) for a MIME type.
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        MIME_PNG => ".png",
        MIME_JPEG => ".jpg",
        MIME_GIF => ".gif",
        MIME_BMP => ".bmp",
        MIME_TIFF => ".tif",
        MIME_WEBP => ".webp",
        MIME_SVG => ".svg",
        MIME_EMF => ".emf",
        MIME_WMF => ".wmf",
        MIME_SVM => ".svm",
        MIME_EPS => ".eps",
        MIME_PDF => ".pdf",
        _ => "",
    }
}

/// Whether a MIME type names a vector format.
pub fn is_vector_mime(mime: &str) -> bool {
    VECTOR_MIME_TYPES.contains(&mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_common_signatures() {
        assert_eq!(sniff_image_mime(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"), Some(MIME_PNG));
        assert_eq!(sniff_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10]), Some(MIME_JPEG));
        assert_eq!(sniff_image_mime(b"GIF89a...."), Some(MIME_GIF));
        assert_eq!(sniff_image_mime(b"VCLMTF\x01\x00"), Some(MIME_SVM));
        assert_eq!(sniff_image_mime(b"<?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\"/>"), Some(MIME_SVG));
        assert_eq!(sniff_image_mime(b"plain text"), None);
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(mime_from_extension("Pictures/1000.JPG"), Some(MIME_JPEG));
        assert_eq!(mime_from_extension("http://example.com/logo.svg"), Some(MIME_SVG));
        assert_eq!(mime_from_extension("noext"), None);
        assert_eq!(extension_for_mime(MIME_PNG), ".png");
        assert!(is_vector_mime(MIME_WMF));
        assert!(!is_vector_mime(MIME_GIF));
    }
}
