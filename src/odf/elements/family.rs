//! Style families and inherited property resolution.
//!
//! Styles reference their parent by name. Chains are walked through
//! [`StyleFamily::chain`], which stops at unknown names, at the first repeated
//! name and after [`MAX_CHAIN_DEPTH`] links. A stopped chain behaves exactly
//! like a chain whose next parent does not exist.

use super::element::Element;
use super::style::{PropertyCategory, Style, StyleFamilyKind};
use crate::common::unit::{Length, normalize_unit_suffix, parse_percentage, scale_length};
use std::collections::{HashMap, HashSet};

/// Maximum number of styles visited when following parent links
pub const MAX_CHAIN_DEPTH: usize = 64;

const FONT_SIZE: &str = "fo:font-size";
const FONT_SIZE_REL: &str = "style:font-size-rel";

/// All styles of one family plus the optional default style.
#[derive(Debug, Clone)]
pub struct StyleFamily {
    kind: StyleFamilyKind,
    styles: HashMap<String, Style>,
    order: Vec<String>,
    default_style: Option<Style>,
}

impl StyleFamily {
    /// Create an empty family
    pub fn new(kind: StyleFamilyKind) -> Self {
        Self {
            kind,
            styles: HashMap::new(),
            order: Vec::new(),
            default_style: None,
        }
    }

    /// Family kind
    pub fn kind(&self) -> StyleFamilyKind {
        self.kind
    }

    /// Add a style. The first definition of a name wins; returns whether
    /// the style was stored.
    pub fn insert(&mut self, style: Style) -> bool {
        if self.styles.contains_key(style.name()) {
            return false;
        }
        self.order.push(style.name().to_string());
        self.styles.insert(style.name().to_string(), style);
        true
    }

    /// Load a `style:style` element into the family
    pub fn load_style(&mut self, node: &Element, automatic: bool) -> bool {
        self.insert(Style::from_element(node, self.kind, automatic))
    }

    /// Load a `style:default-style` element. Only the first one is kept.
    pub fn load_default_style(&mut self, node: &Element) {
        if self.default_style.is_none() {
            self.default_style = Some(Style::from_element(node, self.kind, false));
        }
    }

    /// Get a style by name
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Get a mutable style by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Style> {
        self.styles.get_mut(name)
    }

    /// Whether a style with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Default style of the family
    pub fn default_style(&self) -> Option<&Style> {
        self.default_style.as_ref()
    }

    /// Number of named styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the family holds no named styles
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterate styles in definition order
    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.order.iter().filter_map(|name| self.styles.get(name))
    }

    /// The style and its ancestors, nearest first.
    ///
    /// Empty for an unknown name.
    pub fn chain(&self, name: &str) -> Vec<&Style> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(name);

        while let Some(current) = next {
            if !visited.insert(current) {
                log::warn!(
                    "Style cycle in {} family at '{}', treating parent as missing",
                    self.kind.as_str(),
                    current
                );
                break;
            }
            if chain.len() >= MAX_CHAIN_DEPTH {
                log::warn!(
                    "Style chain of '{}' exceeds {} levels, truncating",
                    name,
                    MAX_CHAIN_DEPTH
                );
                break;
            }
            let Some(style) = self.styles.get(current) else {
                break;
            };
            chain.push(style);
            next = style.parent_name();
        }
        chain
    }

    /// Look up a property of a style.
    ///
    /// Without `inherit` only the style's own properties are consulted. With
    /// it, the parent chain is walked and then the default style.
    pub fn get_property(
        &self,
        name: &str,
        category: PropertyCategory,
        key: &str,
        inherit: bool,
    ) -> Option<&str> {
        if !inherit {
            return self.get(name)?.get_property(category, key);
        }
        let chain = self.chain(name);
        if chain.is_empty() {
            return None;
        }
        chain
            .iter()
            .find_map(|style| style.get_property(category, key))
            .or_else(|| self.default_style.as_ref()?.get_property(category, key))
    }

    /// Look up a property, resolving percentages against the inherited value.
    pub fn get_absolute_property(
        &self,
        name: &str,
        category: PropertyCategory,
        key: &str,
    ) -> Option<String> {
        let chain = self.chain(name);
        if chain.is_empty() {
            return None;
        }
        self.absolute_in(&chain, category, key)
    }

    fn absolute_in(&self, chain: &[&Style], category: PropertyCategory, key: &str) -> Option<String> {
        for (index, style) in chain.iter().enumerate() {
            if let Some(value) = style.get_property(category, key) {
                return match parse_percentage(value) {
                    Some(percent) => {
                        let base = self.absolute_in(&chain[index + 1..], category, key)?;
                        scale_length(&base, percent)
                    },
                    None => Some(normalize_unit_suffix(value)),
                };
            }
        }
        let value = self.default_style.as_ref()?.get_property(category, key)?;
        match parse_percentage(value) {
            Some(_) => None,
            None => Some(normalize_unit_suffix(value)),
        }
    }

    /// Resolve the absolute font size of a style.
    ///
    /// `style:font-size-rel` adds a delta to the inherited size and takes
    /// precedence over `fo:font-size`, which is either a percentage of the
    /// inherited size or an absolute length.
    pub fn get_absolute_font_size(&self, name: &str) -> Option<String> {
        let chain = self.chain(name);
        if chain.is_empty() {
            return None;
        }
        self.font_size_in(&chain)
    }

    fn font_size_in(&self, chain: &[&Style]) -> Option<String> {
        let Some((style, rest)) = chain.split_first() else {
            let value = self
                .default_style
                .as_ref()?
                .get_property(PropertyCategory::Text, FONT_SIZE)?;
            return match parse_percentage(value) {
                Some(_) => None,
                None => Some(normalize_unit_suffix(value)),
            };
        };

        if let Some(delta) = style.get_property(PropertyCategory::Text, FONT_SIZE_REL) {
            let base: Length = self.font_size_in(rest)?.parse().ok()?;
            let delta: Length = delta.parse().ok()?;
            return base.add(&delta).ok().map(|size| size.to_string());
        }
        match style.get_property(PropertyCategory::Text, FONT_SIZE) {
            Some(size) => match parse_percentage(size) {
                Some(percent) => scale_length(&self.font_size_in(rest)?, percent),
                None => Some(normalize_unit_suffix(size)),
            },
            None => self.font_size_in(rest),
        }
    }

    /// Name of the first non-automatic style in the chain.
    ///
    /// Automatic styles usually derive from a named style; callers that want
    /// the user-visible style follow one automatic link.
    pub fn resolve_automatic<'a>(&'a self, name: &'a str) -> &'a str {
        match self.get(name) {
            Some(style) if style.is_automatic() => style.parent_name().unwrap_or(name),
            _ => name,
        }
    }

    /// Display name of a style, if known
    pub fn display_name(&self, name: &str) -> Option<&str> {
        self.get(name).map(Style::display_name)
    }
}
