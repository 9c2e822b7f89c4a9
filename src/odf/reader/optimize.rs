//! In-place paragraph optimization.
//!
//! Collaborative editing leaves paragraphs split into many spans that differ
//! only in revision markers. Before rendering, spans without formatting are
//! unwrapped, neighbouring spans with identical attributes are merged, and
//! neighbouring text nodes are joined.

use crate::odf::elements::element::{Element, Node};
use crate::odf::elements::family::StyleFamily;

const SPAN: &str = "text:span";
const LINK: &str = "text:a";
const STYLE_NAME: &str = "text:style-name";

/// Optimize the inline content of a paragraph or heading.
///
/// `text_styles` is the text (character) style family used to decide whether
/// a span carries formatting.
pub fn optimize_paragraph(paragraph: &mut Element, text_styles: &StyleFamily) {
    for child in paragraph.children_mut().iter_mut() {
        if let Node::Element(element) = child
            && (element.is(SPAN) || element.is(LINK))
        {
            optimize_paragraph(element, text_styles);
        }
    }

    for child in paragraph.take_children() {
        match child {
            Node::Element(mut span) if span.is(SPAN) && is_plain_span(&span, text_styles) => {
                for grandchild in span.take_children() {
                    append(paragraph, grandchild);
                }
            },
            other => append(paragraph, other),
        }
    }
}

fn is_plain_span(span: &Element, text_styles: &StyleFamily) -> bool {
    match span.non_empty_attribute(STYLE_NAME) {
        None => span.attributes().is_empty(),
        Some(name) => text_styles.get(name).is_some_and(|style| style.is_empty()),
    }
}

/// Append a node, merging it into a preceding span with the same attributes
fn append(parent: &mut Element, node: Node) {
    if let Node::Element(mut span) = node {
        if span.is(SPAN)
            && let Some(Node::Element(previous)) = parent.children_mut().last_mut()
            && previous.is(SPAN)
            && previous.attributes() == span.attributes()
        {
            for grandchild in span.take_children() {
                previous.push_node(grandchild);
            }
            return;
        }
        parent.push_node(Node::Element(span));
    } else {
        parent.push_node(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::elements::style::StyleFamilyKind;

    fn text_styles() -> StyleFamily {
        let xml = r#"<office:automatic-styles>
            <style:style style:name="T1" style:family="text"><style:text-properties officeooo:rsid="00aa11"/></style:style>
            <style:style style:name="T2" style:family="text"><style:text-properties fo:font-weight="bold" officeooo:rsid="00bb22"/></style:style>
        </office:automatic-styles>"#;
        let root = Element::from_bytes(xml.as_bytes()).unwrap();
        let mut family = StyleFamily::new(StyleFamilyKind::Text);
        for style in root.child_elements() {
            family.load_style(style, true);
        }
        family
    }

    fn span(style: Option<&str>, text: &str) -> Element {
        let span = Element::new(SPAN).with_text(text);
        match style {
            Some(style) => span.with_attribute(STYLE_NAME, style),
            None => span,
        }
    }

    #[test]
    fn test_unwrap_and_merge() {
        let mut paragraph = Element::new("text:p")
            .with_text("A")
            .with_child(span(Some("T1"), "B"))
            .with_child(span(None, "C"))
            .with_child(span(Some("T2"), "D"))
            .with_child(span(Some("T2"), "E"))
            .with_child(span(Some("Unknown"), "F"));
        optimize_paragraph(&mut paragraph, &text_styles());

        let children = paragraph.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].as_text(), Some("ABC"));
        let bold = children[1].as_element().unwrap();
        assert_eq!(bold.attribute(STYLE_NAME), Some("T2"));
        assert_eq!(bold.children().len(), 1);
        assert_eq!(bold.text(), "DE");
        assert_eq!(children[2].as_element().and_then(|e| e.attribute(STYLE_NAME)), Some("Unknown"));
        assert_eq!(paragraph.text(), "ABCDEF");
    }

    #[test]
    fn test_nested_spans_inside_links() {
        let mut paragraph = Element::new("text:p").with_child(
            Element::new(LINK)
                .with_attribute("xlink:href", "#x")
                .with_child(span(Some("T1"), "a"))
                .with_child(span(Some("T1"), "b")),
        );
        optimize_paragraph(&mut paragraph, &text_styles());
        let link = paragraph.children()[0].as_element().unwrap();
        assert_eq!(link.children().len(), 1);
        assert_eq!(link.children()[0].as_text(), Some("ab"));
    }

    #[test]
    fn test_spans_separated_by_other_content_stay_apart() {
        let mut paragraph = Element::new("text:p")
            .with_child(span(Some("T2"), "a"))
            .with_child(Element::new("text:line-break"))
            .with_child(span(Some("T2"), "b"));
        optimize_paragraph(&mut paragraph, &text_styles());
        assert_eq!(paragraph.children().len(), 3);
    }
}
