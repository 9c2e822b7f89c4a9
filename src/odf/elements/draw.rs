//! Helpers for `draw:image` and `draw:frame` nodes.

use super::element::{Element, Node};

/// Tag of image elements
pub const IMAGE: &str = "draw:image";
/// Tag of frame elements
pub const FRAME: &str = "draw:frame";
/// Tag of inline image data
pub const BINARY_DATA: &str = "office:binary-data";

/// Whether a node is an image
pub fn is_image(node: &Element) -> bool {
    node.is(IMAGE)
}

/// Link target of an image, if any
pub fn image_href(node: &Element) -> Option<&str> {
    node.non_empty_attribute("xlink:href")
}

/// Whether a link points outside the package.
///
/// Absolute paths, parent-relative paths and anything with a URI scheme
/// are external; everything else names a package entry.
pub fn is_external_href(href: &str) -> bool {
    if href.starts_with('/') || href.starts_with("../") {
        return true;
    }
    match href.find(':') {
        Some(colon) => {
            let scheme = &href[..colon];
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        },
        None => false,
    }
}

/// Index of the `office:binary-data` child of an image
pub fn binary_data_index(node: &Element) -> Option<usize> {
    node.children()
        .iter()
        .position(|child| matches!(child, Node::Element(e) if e.is(BINARY_DATA)))
}

/// Images directly inside a frame, in order
pub fn frame_images(frame: &Element) -> impl Iterator<Item = &Element> {
    frame.child_elements().filter(|child| is_image(child))
}

/// `svg:desc` or `svg:title` text of a frame or image
pub fn description(node: &Element) -> Option<String> {
    ["svg:desc", "svg:title"]
        .iter()
        .find_map(|tag| node.first_child_element(tag))
        .map(Element::text)
        .filter(|text| !text.trim().is_empty())
}
