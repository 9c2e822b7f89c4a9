//! List and outline styles.
//!
//! `text:list-style` and `text:outline-style` both describe up to ten levels
//! of labelling rules. Levels are addressed 1-based; a level the style does
//! not define produces no label.

use super::element::Element;
use super::style::PropertySet;

/// Number of list levels an ODF list style can define
pub const LIST_LEVELS: usize = 10;

/// What a list level puts in front of its paragraphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    /// Numbered label
    Number,
    /// Bullet character
    Bullet,
    /// Bullet image
    Image,
    /// No label
    None,
}

/// Numeral system of a numbered level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumFormat {
    /// 1, 2, 3
    #[default]
    Arabic,
    /// i, ii, iii
    RomanLower,
    /// I, II, III
    RomanUpper,
    /// a, b, c
    AlphaLower,
    /// A, B, C
    AlphaUpper,
    /// No number
    None,
}

impl NumFormat {
    /// Parse a `style:num-format` value.
    ///
    /// Numeral systems without a dedicated variant are rendered arabic.
    pub fn from_odf(value: &str) -> Self {
        match value {
            "" => Self::None,
            "i" => Self::RomanLower,
            "I" => Self::RomanUpper,
            "a" => Self::AlphaLower,
            "A" => Self::AlphaUpper,
            _ => Self::Arabic,
        }
    }
}

/// What follows a label (`text:label-followed-by`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFollow {
    /// A single space
    #[default]
    Space,
    /// A tab stop
    Tab,
    /// Nothing
    Nothing,
}

impl LabelFollow {
    fn from_odf(value: &str) -> Self {
        match value {
            "listtab" => Self::Tab,
            "nothing" => Self::Nothing,
            _ => Self::Space,
        }
    }
}

/// Labelling rules of one list level
#[derive(Debug, Clone)]
pub struct ListLevel {
    /// Label kind
    pub kind: LevelKind,
    /// Numeral system
    pub format: NumFormat,
    /// Text before the number
    pub prefix: String,
    /// Text after the number
    pub suffix: String,
    /// First value of the level
    pub start_value: u32,
    /// How many levels, ending with this one, the label shows
    pub display_levels: usize,
    /// Alphabetic numbering repeats letters (aa, bb) instead of counting (aa, ab)
    pub letter_sync: bool,
    /// Bullet character for bullet levels
    pub bullet_char: Option<String>,
    /// Character style of the label
    pub text_style_name: Option<String>,
    /// What follows the label
    pub label_follow: LabelFollow,
    /// The level element of image levels, carrying the image reference
    pub image: Option<Element>,
    /// `style:list-level-properties` of the level
    pub properties: PropertySet,
}

impl ListLevel {
    fn from_element(node: &Element) -> Self {
        let format = NumFormat::from_odf(node.attribute("style:num-format").unwrap_or(""));
        let kind = match node.local_name() {
            "list-level-style-bullet" => LevelKind::Bullet,
            "list-level-style-image" => LevelKind::Image,
            _ if format == NumFormat::None => LevelKind::None,
            _ => LevelKind::Number,
        };

        let mut properties = PropertySet::new();
        let mut label_follow = LabelFollow::default();
        if let Some(level_properties) = node.first_child_element("style:list-level-properties") {
            properties.load(level_properties);
            if let Some(alignment) =
                level_properties.first_child_element("style:list-level-label-alignment")
                && let Some(follow) = alignment.attribute("text:label-followed-by")
            {
                label_follow = LabelFollow::from_odf(follow);
            }
        }

        Self {
            kind,
            format,
            prefix: node.attribute("style:num-prefix").unwrap_or_default().to_string(),
            suffix: node.attribute("style:num-suffix").unwrap_or_default().to_string(),
            start_value: node
                .int_attribute("text:start-value")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(1),
            display_levels: node
                .int_attribute("text:display-levels")
                .and_then(|v| usize::try_from(v).ok())
                .unwrap_or(1)
                .clamp(1, LIST_LEVELS),
            letter_sync: node.bool_attribute("style:num-letter-sync").unwrap_or(false),
            bullet_char: node.attribute("text:bullet-char").map(str::to_string),
            text_style_name: node.non_empty_attribute("text:style-name").map(str::to_string),
            label_follow,
            image: (kind == LevelKind::Image).then(|| node.clone()),
            properties,
        }
    }
}

/// A list style or the outline style
#[derive(Debug, Clone)]
pub struct ListStyle {
    name: String,
    display_name: Option<String>,
    outline: bool,
    automatic: bool,
    levels: [Option<ListLevel>; LIST_LEVELS],
}

impl ListStyle {
    /// Load from a `text:list-style` or `text:outline-style` element
    pub fn from_element(node: &Element, automatic: bool) -> Self {
        let mut levels: [Option<ListLevel>; LIST_LEVELS] = Default::default();
        for child in node.child_elements() {
            let is_level = matches!(
                child.tag_name(),
                "text:list-level-style-number"
                    | "text:list-level-style-bullet"
                    | "text:list-level-style-image"
                    | "text:outline-level-style"
            );
            if !is_level {
                continue;
            }
            let Some(slot) = child
                .int_attribute("text:level")
                .and_then(|level| usize::try_from(level).ok())
                .filter(|level| (1..=LIST_LEVELS).contains(level))
            else {
                log::debug!("Ignoring list level outside 1..=10 in '{}'", node.attribute("style:name").unwrap_or(""));
                continue;
            };
            levels[slot - 1].get_or_insert_with(|| ListLevel::from_element(child));
        }

        Self {
            name: node.attribute("style:name").unwrap_or_default().to_string(),
            display_name: node.non_empty_attribute("style:display-name").map(str::to_string),
            outline: node.is("text:outline-style"),
            automatic,
            levels,
        }
    }

    /// Style name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display name, falling back to the style name
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Whether this is the outline (heading numbering) style
    pub fn is_outline(&self) -> bool {
        self.outline
    }

    /// Whether the style is a content-local automatic style
    pub fn is_automatic(&self) -> bool {
        self.automatic
    }

    /// Rules of a 1-based level
    pub fn level(&self, level: usize) -> Option<&ListLevel> {
        level.checked_sub(1).and_then(|i| self.levels.get(i)?.as_ref())
    }

    /// Whether the level exists and is numbered
    pub fn is_number(&self, level: usize) -> bool {
        self.level(level).is_some_and(|l| l.kind == LevelKind::Number)
    }

    /// Whether the level exists and is a bullet
    pub fn is_bullet(&self, level: usize) -> bool {
        self.level(level).is_some_and(|l| l.kind == LevelKind::Bullet)
    }

    /// Whether the level exists and shows an image
    pub fn is_image(&self, level: usize) -> bool {
        self.level(level).is_some_and(|l| l.kind == LevelKind::Image)
    }

    /// Start value of a level (1 when unset or undefined)
    pub fn start_value(&self, level: usize) -> u32 {
        self.level(level).map_or(1, |l| l.start_value)
    }
}
