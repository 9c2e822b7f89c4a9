//! Forms declared in `office:forms`.

use super::element::Element;
use super::style::PropertySet;
use std::collections::HashMap;

/// One form control (`form:text`, `form:button`, …)
#[derive(Debug, Clone)]
pub struct FormControl {
    /// `form:id` or `xml:id`
    pub id: Option<String>,
    /// Control kind, the local element name (`text`, `checkbox`, …)
    pub kind: String,
    /// `form:name`
    pub name: Option<String>,
    /// All attributes of the control element
    pub attributes: PropertySet,
}

impl FormControl {
    fn from_element(node: &Element) -> Self {
        Self {
            id: node
                .non_empty_attribute("form:id")
                .or_else(|| node.non_empty_attribute("xml:id"))
                .map(str::to_string),
            kind: node.local_name().to_string(),
            name: node.non_empty_attribute("form:name").map(str::to_string),
            attributes: PropertySet::from_element(node),
        }
    }

    /// Label of buttons and check boxes
    pub fn label(&self) -> Option<&str> {
        self.attributes.get("form:label")
    }

    /// Initial value
    pub fn value(&self) -> Option<&str> {
        self.attributes
            .get("form:current-value")
            .or_else(|| self.attributes.get("form:value"))
    }
}

/// A `form:form` element
#[derive(Debug, Clone)]
pub struct Form {
    /// `form:name`
    pub name: Option<String>,
    /// Submission target (`xlink:href`)
    pub action: Option<String>,
    /// `form:method`
    pub method: Option<String>,
    /// Controls in document order
    pub controls: Vec<FormControl>,
}

/// All forms of a document with control lookup by id
#[derive(Debug, Clone, Default)]
pub struct Forms {
    forms: Vec<Form>,
    by_id: HashMap<String, (usize, usize)>,
}

impl Forms {
    /// Read an `office:forms` element. Nested forms are flattened.
    pub fn read(&mut self, node: &Element) {
        for child in node.child_elements().filter(|child| child.is("form:form")) {
            self.read_form(child);
        }
    }

    fn read_form(&mut self, node: &Element) {
        let index = self.forms.len();
        self.forms.push(Form {
            name: node.non_empty_attribute("form:name").map(str::to_string),
            action: node.non_empty_attribute("xlink:href").map(str::to_string),
            method: node.non_empty_attribute("form:method").map(str::to_string),
            controls: Vec::new(),
        });

        for child in node.child_elements() {
            match child.tag_name() {
                "form:form" => self.read_form(child),
                "form:properties" | "office:event-listeners" => {},
                tag if tag.starts_with("form:") => {
                    let control = FormControl::from_element(child);
                    let form = &mut self.forms[index];
                    if let Some(id) = &control.id {
                        self.by_id
                            .entry(id.clone())
                            .or_insert((index, form.controls.len()));
                    }
                    form.controls.push(control);
                },
                _ => {},
            }
        }
    }

    /// Forms in document order
    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    /// Control with the given id
    pub fn control(&self, id: &str) -> Option<&FormControl> {
        let &(form, control) = self.by_id.get(id)?;
        self.forms.get(form)?.controls.get(control)
    }

    /// Whether no form was read
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}
