//! Image extraction from `draw:image` nodes.
//!
//! An image is found, in order, through a link to a package entry, a link
//! outside the package, or inline base64 data. Every extraction is keyed (the
//! link for linked and package images, a content fingerprint for inline data)
//! so a repeated image comes back as a payload-free recycled record.

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, warn};
use sha2::{Digest, Sha256};

use super::graphics::BinaryGraphics;
use super::options::ImageOptions;
use super::svm;
use crate::common::detection::image::{MIME_EPS, MIME_SVM};
use crate::common::detection::{extension_for_mime, is_vector_mime, mime_from_extension, sniff_image_mime};
use crate::common::error::{Error, Result};
use crate::odf::core::{EmbeddedKind, EmbeddedObject, EmbeddedObjects, normalize_path};
use crate::odf::elements::draw;
use crate::odf::elements::element::{Element, Node};

/// A capability that turns image bytes of one format into another
pub trait GraphicConverter {
    /// Whether `source_mime` can be converted to `target_mime`
    fn supports_conversion(&self, source_mime: &str, target_mime: &str) -> bool;

    /// Convert `source` from `source_mime` to `target_mime`
    fn convert(&self, source: &[u8], source_mime: &str, target_mime: &str) -> Result<Vec<u8>>;
}

/// Extracts images of one document.
///
/// The recycling map lives as long as the converter, so use one converter per
/// document.
pub struct ImageConverter {
    options: ImageOptions,
    converter: Option<Box<dyn GraphicConverter>>,
    extracted: HashMap<String, BinaryGraphics>,
    next_index: usize,
}

impl std::fmt::Debug for ImageConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageConverter")
            .field("options", &self.options)
            .field("has_converter", &self.converter.is_some())
            .field("extracted", &self.extracted.len())
            .finish()
    }
}

impl ImageConverter {
    /// Create a converter without conversion capability
    pub fn new(options: ImageOptions) -> Self {
        Self {
            options,
            converter: None,
            extracted: HashMap::new(),
            next_index: 0,
        }
    }

    /// Attach a conversion capability
    pub fn with_converter(mut self, converter: impl GraphicConverter + 'static) -> Self {
        self.converter = Some(Box::new(converter));
        self
    }

    /// Options this converter was created with
    pub fn options(&self) -> &ImageOptions {
        &self.options
    }

    /// Number of distinct images extracted so far
    pub fn extracted_count(&self) -> usize {
        self.extracted.len()
    }

    /// Extract the image behind a `draw:image` node.
    ///
    /// Returns `None` when the node carries no usable image. In destructive
    /// mode a successfully extracted package entry is removed from `embedded`
    /// and extracted inline data is replaced by a [`Node::Tombstone`]; data
    /// that yields no image is left in place.
    pub fn extract(&mut self, image: &mut Element, embedded: &mut EmbeddedObjects) -> Option<BinaryGraphics> {
        if let Some(href) = draw::image_href(image) {
            let href = href.to_string();
            if draw::is_external_href(&href) {
                return Some(self.extract_linked(&href));
            }
            return self.extract_embedded(&normalize_path(&href), embedded);
        }
        self.extract_inline(image)
    }

    /// Extract child `index` of `parent`, falling back to the image right
    /// after it.
    ///
    /// Office suites store a replacement graphic as the next `draw:image` in the
    /// same frame. This is a positional heuristic: the sibling is tried only
    /// when the first image is not accepted or is not the preferred vector
    /// format, and wins only if it is strictly better.
    pub fn extract_child(
        &mut self,
        parent: &mut Element,
        index: usize,
        embedded: &mut EmbeddedObjects,
    ) -> Option<BinaryGraphics> {
        let primary = self.extract(parent.child_element_at_mut(index)?, embedded);
        if !self.options.use_alternate_image || primary.as_ref().is_some_and(|p| self.is_preferred(p)) {
            return primary;
        }

        let Some(sibling) = parent.next_sibling_element_index(index) else {
            return primary;
        };
        let alternate = match parent.child_element_at_mut(sibling) {
            Some(node) if draw::is_image(node) => self.extract(node, embedded),
            _ => return primary,
        };

        match (primary, alternate) {
            (None, alternate) => alternate,
            (Some(primary), Some(alternate)) if self.is_better(&alternate, &primary) => {
                debug!("using alternate image {}", alternate.file_name());
                Some(alternate)
            },
            (primary, _) => primary,
        }
    }

    /// Extract the first image of a `draw:frame`, with alternate fallback
    pub fn extract_frame(&mut self, frame: &mut Element, embedded: &mut EmbeddedObjects) -> Option<BinaryGraphics> {
        let index = frame
            .children()
            .iter()
            .position(|child| matches!(child, Node::Element(e) if draw::is_image(e)))?;
        self.extract_child(frame, index, embedded)
    }

    fn is_preferred(&self, graphics: &BinaryGraphics) -> bool {
        graphics.is_accepted()
            && (self.options.vector_target.is_none() || self.options.is_vector_target(graphics.mime_type()))
    }

    fn is_better(&self, candidate: &BinaryGraphics, current: &BinaryGraphics) -> bool {
        (candidate.is_accepted() && !current.is_accepted())
            || (self.options.is_vector_target(candidate.mime_type())
                && !self.options.is_vector_target(current.mime_type()))
    }

    fn extract_linked(&mut self, href: &str) -> BinaryGraphics {
        let key = format!("href:{href}");
        if let Some(previous) = self.extracted.get(&key) {
            return previous.clone();
        }
        let mime = mime_from_extension(href).unwrap_or_default();
        let graphics = BinaryGraphics::linked(href, mime, self.options.accepts(mime));
        self.extracted.insert(key, graphics.recycled_copy());
        graphics
    }

    fn extract_embedded(&mut self, path: &str, embedded: &mut EmbeddedObjects) -> Option<BinaryGraphics> {
        let key = format!("href:{path}");
        if let Some(previous) = self.extracted.get(&key) {
            return Some(previous.clone());
        }

        let mime = match embedded.get(path) {
            None => {
                warn!("image {path} not found in package");
                return None;
            },
            Some(EmbeddedObject {
                kind: EmbeddedKind::Binary(bytes),
                media_type,
                ..
            }) => media_type
                .clone()
                .or_else(|| sniff_image_mime(bytes).map(str::to_string))
                .or_else(|| mime_from_extension(path).map(str::to_string)),
            Some(_) => {
                debug!("{path} is an embedded document, not an image");
                return None;
            },
        };
        let Some(mime) = mime else {
            warn!("unknown image format in {path}");
            return None;
        };

        let object = if self.options.destructive {
            embedded.take(path)?
        } else {
            embedded.get(path).cloned()?
        };
        let EmbeddedKind::Binary(bytes) = object.kind else {
            return None;
        };
        Some(self.finish(key, bytes, mime))
    }

    fn extract_inline(&mut self, image: &mut Element) -> Option<BinaryGraphics> {
        let index = draw::binary_data_index(image)?;
        let encoded: String = image.child_element_at(index)?.text().split_ascii_whitespace().collect();
        let bytes = match STANDARD.decode(encoded) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("skipping inline image: {}", Error::from(err));
                return None;
            },
        };

        let key = fingerprint(&bytes);
        let graphics = match self.extracted.get(&key).cloned() {
            Some(previous) => previous,
            None => {
                let Some(mime) = sniff_image_mime(&bytes) else {
                    warn!("unknown inline image format");
                    return None;
                };
                self.finish(key.clone(), bytes, mime.to_string())
            },
        };
        if self.options.destructive {
            image.children_mut()[index] = Node::Tombstone(key);
        }
        Some(graphics)
    }

    fn finish(&mut self, key: String, mut bytes: Vec<u8>, mut mime: String) -> BinaryGraphics {
        if self.options.extract_eps
            && mime == MIME_SVM
            && let Some(eps) = svm::extract_eps(&bytes)
        {
            bytes = eps;
            mime = MIME_EPS.to_string();
        }

        let mut accepted = self.options.accepts(&mime);
        if !accepted && let Some((converted, target)) = self.convert(&bytes, &mime) {
            bytes = converted;
            mime = target;
            accepted = true;
        }

        let file_name = format!(
            "{}{}{}",
            self.options.base_file_name,
            self.next_index,
            extension_for_mime(&mime)
        );
        self.next_index += 1;

        let graphics = BinaryGraphics::new(file_name, &mime, bytes, accepted);
        self.extracted.insert(key, graphics.recycled_copy());
        graphics
    }

    /// Try the vector target for vector sources, then the raster target
    fn convert(&self, bytes: &[u8], mime: &str) -> Option<(Vec<u8>, String)> {
        let converter = self.converter.as_deref()?;
        let vector = self.options.vector_target.as_deref().filter(|_| is_vector_mime(mime));
        let raster = self.options.raster_target.as_deref();

        for target in vector.into_iter().chain(raster) {
            if target == mime || !converter.supports_conversion(mime, target) {
                continue;
            }
            match converter.convert(bytes, mime, target) {
                Ok(converted) => return Some((converted, target.to_string())),
                Err(err) => warn!("converting {mime} to {target} failed: {err}"),
            }
        }
        None
    }
}

/// SHA-256 of the content followed by its first ten bytes, both in hex
fn fingerprint(bytes: &[u8]) -> String {
    let mut key = format!("{:x}", Sha256::digest(bytes));
    for byte in bytes.iter().take(10) {
        key.push_str(&format!("{byte:02x}"));
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01";
    const BMP: &[u8] = b"BM\x3a\0\0\0\0\0\0\0\x36\0\0\0";

    fn embedded(entries: &[(&str, Option<&str>, &[u8])]) -> EmbeddedObjects {
        let mut objects = EmbeddedObjects::new();
        for (name, media_type, bytes) in entries {
            objects.insert(EmbeddedObject {
                name: name.to_string(),
                media_type: media_type.map(str::to_string),
                kind: EmbeddedKind::Binary(bytes.to_vec()),
            });
        }
        objects
    }

    fn linked_image(href: &str) -> Element {
        Element::new(draw::IMAGE).with_attribute("xlink:href", href)
    }

    fn inline_image(bytes: &[u8]) -> Element {
        Element::new(draw::IMAGE).with_child(Element::new(draw::BINARY_DATA).with_text(&STANDARD.encode(bytes)))
    }

    struct FakeConverter {
        fail: bool,
    }

    impl GraphicConverter for FakeConverter {
        fn supports_conversion(&self, _source_mime: &str, target_mime: &str) -> bool {
            target_mime == "image/png" || target_mime == "image/svg+xml"
        }

        fn convert(&self, source: &[u8], _source_mime: &str, target_mime: &str) -> Result<Vec<u8>> {
            if self.fail {
                return Err(Error::Conversion("broken".into()));
            }
            let mut out = target_mime.as_bytes().to_vec();
            out.extend_from_slice(source);
            Ok(out)
        }
    }

    #[test]
    fn test_embedded_image() {
        let mut objects = embedded(&[("Pictures/a.png", Some("image/png"), PNG)]);
        let mut converter = ImageConverter::new(ImageOptions::default());
        let image = converter
            .extract(&mut linked_image("Pictures/a.png"), &mut objects)
            .unwrap();
        assert_eq!(image.file_name(), "img0.png");
        assert_eq!(image.mime_type(), "image/png");
        assert!(image.is_accepted());
        assert_eq!(image.bytes(), Some(PNG));
        assert!(objects.contains("Pictures/a.png"));
    }

    #[test]
    fn test_mime_sniffed_when_manifest_is_silent() {
        let mut objects = embedded(&[("Pictures/blob", None, PNG)]);
        let mut converter = ImageConverter::new(ImageOptions::default());
        let image = converter.extract(&mut linked_image("./Pictures/blob"), &mut objects).unwrap();
        assert_eq!(image.mime_type(), "image/png");
    }

    #[test]
    fn test_repeated_image_is_recycled() {
        let mut objects = embedded(&[("Pictures/a.png", Some("image/png"), PNG)]);
        let mut converter = ImageConverter::new(ImageOptions::default());
        let first = converter.extract(&mut linked_image("Pictures/a.png"), &mut objects).unwrap();
        let second = converter.extract(&mut linked_image("Pictures/a.png"), &mut objects).unwrap();
        assert_eq!(first.file_name(), second.file_name());
        assert_eq!(first.mime_type(), second.mime_type());
        assert!(!first.is_recycled());
        assert!(second.is_recycled());
        assert!(second.bytes().is_none());
        assert_eq!(converter.extracted_count(), 1);
    }

    #[test]
    fn test_inline_duplicates_share_fingerprint() {
        let mut converter = ImageConverter::new(ImageOptions::default().with_destructive(true));
        let mut objects = EmbeddedObjects::new();
        let mut first_node = inline_image(PNG);
        let first = converter.extract(&mut first_node, &mut objects).unwrap();
        let second = converter.extract(&mut inline_image(PNG), &mut objects).unwrap();
        assert_eq!(first.file_name(), "img0.png");
        assert!(second.is_recycled());
        assert_eq!(second.file_name(), "img0.png");
        assert!(matches!(first_node.children()[0], Node::Tombstone(_)));
    }

    #[test]
    fn test_destructive_removes_package_entry() {
        let mut objects = embedded(&[("Pictures/a.png", Some("image/png"), PNG)]);
        let mut converter = ImageConverter::new(ImageOptions::default().with_destructive(true));
        assert!(converter.extract(&mut linked_image("Pictures/a.png"), &mut objects).is_some());
        assert!(!objects.contains("Pictures/a.png"));
    }

    #[test]
    fn test_destructive_keeps_unrecognized_data() {
        let mut converter = ImageConverter::new(ImageOptions::default().with_destructive(true));
        let mut objects = embedded(&[("Pictures/blob", None, &b"unknown-format-bytes"[..])]);
        assert!(converter.extract(&mut linked_image("Pictures/blob"), &mut objects).is_none());
        assert!(objects.contains("Pictures/blob"));

        let mut node = inline_image(b"unknown-format-bytes");
        assert!(converter.extract(&mut node, &mut objects).is_none());
        assert!(matches!(&node.children()[0], Node::Element(data) if data.tag_name() == draw::BINARY_DATA));
        assert_eq!(converter.extracted_count(), 0);
    }

    #[test]
    fn test_external_link() {
        let mut converter = ImageConverter::new(ImageOptions::default());
        let image = converter
            .extract(&mut linked_image("http://example.com/logo.gif"), &mut EmbeddedObjects::new())
            .unwrap();
        assert!(image.is_linked());
        assert_eq!(image.mime_type(), "image/gif");
        assert!(image.is_accepted());
    }

    #[test]
    fn test_missing_and_malformed_images() {
        let mut converter = ImageConverter::new(ImageOptions::default());
        let mut objects = EmbeddedObjects::new();
        assert!(converter.extract(&mut linked_image("Pictures/gone.png"), &mut objects).is_none());
        let mut broken = Element::new(draw::IMAGE).with_child(Element::new(draw::BINARY_DATA).with_text("@@@"));
        assert!(converter.extract(&mut broken, &mut objects).is_none());
        assert!(converter.extract(&mut Element::new(draw::IMAGE), &mut objects).is_none());
    }

    #[test]
    fn test_conversion_to_raster_target() {
        let mut objects = embedded(&[("Pictures/a.bmp", Some("image/bmp"), BMP)]);
        let mut converter = ImageConverter::new(ImageOptions::default()).with_converter(FakeConverter { fail: false });
        let image = converter.extract(&mut linked_image("Pictures/a.bmp"), &mut objects).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.file_name(), "img0.png");
        assert!(image.is_accepted());
    }

    #[test]
    fn test_vector_target_preferred_for_vector_sources() {
        let mut objects = embedded(&[("Pictures/a.wmf", Some("image/x-wmf"), b"\xd7\xcd\xc6\x9a")]);
        let options = ImageOptions::default().with_vector_target(Some("image/svg+xml"));
        let mut converter = ImageConverter::new(options).with_converter(FakeConverter { fail: false });
        let image = converter.extract(&mut linked_image("Pictures/a.wmf"), &mut objects).unwrap();
        assert_eq!(image.mime_type(), "image/svg+xml");
        assert_eq!(image.file_name(), "img0.svg");
    }

    #[test]
    fn test_failed_conversion_keeps_original() {
        let mut objects = embedded(&[("Pictures/a.bmp", Some("image/bmp"), BMP)]);
        let mut converter = ImageConverter::new(ImageOptions::default()).with_converter(FakeConverter { fail: true });
        let image = converter.extract(&mut linked_image("Pictures/a.bmp"), &mut objects).unwrap();
        assert_eq!(image.mime_type(), "image/bmp");
        assert!(!image.is_accepted());
        assert_eq!(image.bytes(), Some(BMP));
    }

    #[test]
    fn test_eps_unwrapped_from_svm() {
        let mut svm_bytes = b"VCLMTF\x01\x00".to_vec();
        svm_bytes.extend_from_slice(b"%!PS-Adobe-3.0 EPSF-3.0\nshowpage\n%%EOF");
        let mut objects = embedded(&[("Pictures/a.svm", Some("image/x-svm"), &svm_bytes)]);
        let options = ImageOptions::default().with_extract_eps(true);
        let mut converter = ImageConverter::new(options);
        let image = converter.extract(&mut linked_image("Pictures/a.svm"), &mut objects).unwrap();
        assert_eq!(image.mime_type(), "image/x-eps");
        assert!(image.bytes().unwrap().starts_with(b"%!PS-Adobe"));
    }

    #[test]
    fn test_alternate_image_fallback() {
        let mut objects = embedded(&[
            ("Objects/a.svm", Some("image/x-svm"), b"VCLMTF"),
            ("Pictures/a.png", Some("image/png"), PNG),
        ]);
        let mut frame = Element::new(draw::FRAME)
            .with_child(linked_image("Objects/a.svm"))
            .with_child(linked_image("Pictures/a.png"));
        let mut converter = ImageConverter::new(ImageOptions::default());
        let image = converter.extract_frame(&mut frame, &mut objects).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert!(image.is_accepted());
    }

    #[test]
    fn test_alternate_not_tried_when_primary_is_preferred() {
        let mut objects = embedded(&[
            ("Pictures/a.png", Some("image/png"), PNG),
            ("Pictures/b.gif", Some("image/gif"), b"GIF89a"),
        ]);
        let mut frame = Element::new(draw::FRAME)
            .with_child(linked_image("Pictures/a.png"))
            .with_child(linked_image("Pictures/b.gif"));
        let mut converter = ImageConverter::new(ImageOptions::default());
        let image = converter.extract_frame(&mut frame, &mut objects).unwrap();
        assert_eq!(image.file_name(), "img0.png");
        assert_eq!(converter.extracted_count(), 1);
    }

    #[test]
    fn test_fingerprint_includes_prefix() {
        let key = fingerprint(b"abc");
        assert_eq!(key.len(), 64 + 6);
        assert!(key.ends_with("616263"));
    }
}
