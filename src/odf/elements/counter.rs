//! Multi-level list numbering.

use super::list::{LIST_LEVELS, LabelFollow, LevelKind, ListStyle, NumFormat};

/// Numbering state of one list nesting context.
///
/// Slot 0 is unused so that levels index the array directly.
#[derive(Debug, Clone)]
pub struct ListCounter<'a> {
    style: Option<&'a ListStyle>,
    values: [u32; LIST_LEVELS + 1],
    level: usize,
}

impl<'a> ListCounter<'a> {
    /// Create a counter labelling with `style`; without a style all labels are empty
    pub fn new(style: Option<&'a ListStyle>) -> Self {
        let mut counter = Self {
            style,
            values: [0; LIST_LEVELS + 1],
            level: 0,
        };
        counter.reseed_from(1);
        counter
    }

    /// Set every level from `first` down so that its next step yields its start value
    fn reseed_from(&mut self, first: usize) {
        for level in first..=LIST_LEVELS {
            self.values[level] = self.start_value(level).saturating_sub(1);
        }
    }

    fn start_value(&self, level: usize) -> u32 {
        self.style.map_or(1, |style| style.start_value(level))
    }

    fn in_range(level: usize) -> bool {
        (1..=LIST_LEVELS).contains(&level)
    }

    /// Advance to the next item at `level`.
    ///
    /// Ancestor levels that were never stepped take their start value,
    /// deeper levels restart.
    pub fn step(&mut self, level: usize) -> &mut Self {
        if !Self::in_range(level) {
            return self;
        }
        for ancestor in 1..level {
            let start = self.start_value(ancestor).max(1);
            if self.values[ancestor] < start {
                self.values[ancestor] = start;
            }
        }
        self.values[level] += 1;
        self.reseed_from(level + 1);
        self.level = level;
        self
    }

    /// Restart `level` at its configured start value
    pub fn restart(&mut self, level: usize) -> &mut Self {
        let start = self.start_value(level);
        self.restart_with(level, start)
    }

    /// Restart `level` so that the next step yields `value`.
    ///
    /// Deeper levels go back to their start values; ancestors are kept.
    pub fn restart_with(&mut self, level: usize, value: u32) -> &mut Self {
        if !Self::in_range(level) {
            return self;
        }
        self.values[level] = value.saturating_sub(1);
        self.reseed_from(level + 1);
        self
    }

    /// Current value of a level
    pub fn value(&self, level: usize) -> u32 {
        if Self::in_range(level) { self.values[level] } else { 0 }
    }

    /// Level of the last step (0 before the first)
    pub fn level(&self) -> usize {
        self.level
    }

    /// Prefix configured for the current level
    pub fn prefix(&self) -> &str {
        self.current_level().map_or("", |l| l.prefix.as_str())
    }

    /// Suffix configured for the current level
    pub fn suffix(&self) -> &str {
        self.current_level().map_or("", |l| l.suffix.as_str())
    }

    fn current_level(&self) -> Option<&'a super::list::ListLevel> {
        self.style?.level(self.level)
    }

    /// Label of the current item
    pub fn label(&self) -> String {
        let Some(style) = self.style else {
            return String::new();
        };
        let Some(current) = style.level(self.level) else {
            return String::new();
        };

        match current.kind {
            LevelKind::Number => {
                let first = (self.level + 1).saturating_sub(current.display_levels).max(1);
                let numbers: Vec<String> = (first..=self.level)
                    .map(|level| {
                        let (format, letter_sync) = style
                            .level(level)
                            .map_or((current.format, current.letter_sync), |l| (l.format, l.letter_sync));
                        format_number(self.values[level], format, letter_sync)
                    })
                    .collect();

                let mut label = format!("{}{}{}", current.prefix, numbers.join("."), current.suffix);
                if current.label_follow == LabelFollow::Space {
                    label.push(' ');
                }
                label
            },
            LevelKind::Bullet => current.bullet_char.clone().unwrap_or_default(),
            LevelKind::Image | LevelKind::None => String::new(),
        }
    }
}

/// Format a number in the given numeral system.
///
/// Zero has no representation and yields an empty string.
///
/// # Examples
///
/// ```
/// use litchi_odf::odf::{NumFormat, format_number};
///
/// assert_eq!(format_number(28, NumFormat::AlphaLower, false), "ab");
/// assert_eq!(format_number(28, NumFormat::AlphaLower, true), "bb");
/// assert_eq!(format_number(9, NumFormat::RomanLower, false), "ix");
/// ```
pub fn format_number(number: u32, format: NumFormat, letter_sync: bool) -> String {
    if number == 0 {
        return String::new();
    }
    match format {
        NumFormat::Arabic => number.to_string(),
        NumFormat::RomanLower => to_roman(number),
        NumFormat::RomanUpper => to_roman(number).to_uppercase(),
        NumFormat::AlphaLower => to_alpha(number, letter_sync),
        NumFormat::AlphaUpper => to_alpha(number, letter_sync).to_uppercase(),
        NumFormat::None => String::new(),
    }
}

const ROMAN: [(u32, &str); 13] = [
    (1000, "m"),
    (900, "cm"),
    (500, "d"),
    (400, "cd"),
    (100, "c"),
    (90, "xc"),
    (50, "l"),
    (40, "xl"),
    (10, "x"),
    (9, "ix"),
    (5, "v"),
    (4, "iv"),
    (1, "i"),
];

fn to_roman(mut number: u32) -> String {
    let mut roman = String::new();
    for &(value, digits) in &ROMAN {
        while number >= value {
            roman.push_str(digits);
            number -= value;
        }
    }
    roman
}

fn to_alpha(number: u32, letter_sync: bool) -> String {
    if letter_sync {
        let letter = char::from(b'a' + ((number - 1) % 26) as u8);
        return std::iter::repeat_n(letter, ((number - 1) / 26 + 1) as usize).collect();
    }
    let mut letters = Vec::new();
    let mut rest = number;
    while rest > 0 {
        rest -= 1;
        letters.push(char::from(b'a' + (rest % 26) as u8));
        rest /= 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::elements::element::Element;
    use proptest::prelude::*;

    fn style(xml: &str) -> ListStyle {
        ListStyle::from_element(&Element::from_bytes(xml.as_bytes()).unwrap(), false)
    }

    #[test]
    fn test_numerals() {
        assert_eq!(format_number(4, NumFormat::RomanLower, false), "iv");
        assert_eq!(format_number(9, NumFormat::RomanLower, false), "ix");
        assert_eq!(format_number(1994, NumFormat::RomanUpper, false), "MCMXCIV");
        assert_eq!(format_number(26, NumFormat::AlphaLower, false), "z");
        assert_eq!(format_number(27, NumFormat::AlphaUpper, false), "AA");
        assert_eq!(format_number(28, NumFormat::AlphaLower, false), "ab");
        assert_eq!(format_number(28, NumFormat::AlphaLower, true), "bb");
        assert_eq!(format_number(53, NumFormat::AlphaLower, true), "aaa");
        assert_eq!(format_number(7, NumFormat::Arabic, false), "7");
        assert_eq!(format_number(7, NumFormat::None, false), "");
        assert_eq!(format_number(0, NumFormat::Arabic, false), "");
    }

    #[test]
    fn test_step_fills_ancestors() {
        let mut counter = ListCounter::new(None);
        for _ in 0..4 {
            counter.step(1);
        }
        counter.step(2).step(2);
        assert_eq!(counter.value(1), 4);
        assert_eq!(counter.value(2), 2);

        let mut counter = ListCounter::new(None);
        counter.step(3);
        assert_eq!((counter.value(1), counter.value(2), counter.value(3)), (1, 1, 1));
    }

    #[test]
    fn test_restart() {
        let mut counter = ListCounter::new(None);
        counter.step(1).step(2).step(3).step(3);
        counter.restart(1);
        assert_eq!(counter.value(1), 0);
        assert!((2..=LIST_LEVELS).all(|level| counter.value(level) == 0));

        counter.step(1).step(1).step(2);
        counter.restart_with(2, 5);
        assert_eq!(counter.value(1), 2);
        counter.step(2);
        assert_eq!(counter.value(2), 5);

        counter.restart(0).restart(11);
        assert_eq!(counter.value(11), 0);
    }

    #[test]
    fn test_start_values_apply_to_first_step() {
        let style = style(
            r#"<text:list-style style:name="L3">
                <text:list-level-style-number text:level="1" style:num-suffix="." style:num-format="1" text:start-value="5"/>
                <text:list-level-style-number text:level="2" style:num-suffix="." style:num-format="1" text:start-value="3"/>
            </text:list-style>"#,
        );
        assert_eq!(ListCounter::new(Some(&style)).step(1).label(), "5. ");

        let mut counter = ListCounter::new(Some(&style));
        counter.step(2);
        assert_eq!(counter.value(1), 5);
        assert_eq!(counter.value(2), 3);

        counter.step(1).step(1).step(2);
        assert_eq!((counter.value(1), counter.value(2)), (7, 3));
        counter.restart(1).step(1).step(2);
        assert_eq!((counter.value(1), counter.value(2)), (5, 3));
    }

    #[test]
    fn test_nested_labels() {
        let style = style(
            r#"<text:list-style style:name="L1">
                <text:list-level-style-number text:level="1" style:num-suffix="." style:num-format="1">
                    <style:list-level-properties><style:list-level-label-alignment text:label-followed-by="listtab"/></style:list-level-properties>
                </text:list-level-style-number>
                <text:list-level-style-number text:level="2" style:num-suffix="." style:num-format="1" text:display-levels="2">
                    <style:list-level-properties><style:list-level-label-alignment text:label-followed-by="listtab"/></style:list-level-properties>
                </text:list-level-style-number>
                <text:list-level-style-number text:level="3" style:num-suffix="." style:num-format="1" text:display-levels="3">
                    <style:list-level-properties><style:list-level-label-alignment text:label-followed-by="listtab"/></style:list-level-properties>
                </text:list-level-style-number>
            </text:list-style>"#,
        );
        let mut counter = ListCounter::new(Some(&style));
        let labels: Vec<String> = [1, 2, 2, 1]
            .iter()
            .map(|&level| counter.step(level).label())
            .collect();
        assert_eq!(labels, ["1.", "1.1.", "1.2.", "2."]);
        assert_eq!(counter.suffix(), ".");
    }

    #[test]
    fn test_mixed_formats_and_follow() {
        let style = style(
            r#"<text:list-style style:name="L2">
                <text:list-level-style-number text:level="1" style:num-format="I"/>
                <text:list-level-style-number text:level="2" style:num-prefix="(" style:num-suffix=")" style:num-format="a" text:display-levels="2" text:start-value="2"/>
                <text:list-level-style-bullet text:level="3" text:bullet-char="-"/>
            </text:list-style>"#,
        );
        let mut counter = ListCounter::new(Some(&style));
        assert_eq!(counter.label(), "");
        assert_eq!(counter.step(1).label(), "I ");
        assert_eq!(counter.step(2).label(), "(I.b) ");
        assert_eq!(counter.prefix(), "(");
        assert_eq!(counter.step(3).label(), "-");
        assert_eq!(counter.step(4).label(), "");
    }

    proptest! {
        #[test]
        fn prop_step_never_leaves_zero_ancestors(levels in proptest::collection::vec(1usize..=LIST_LEVELS, 1..40)) {
            let mut counter = ListCounter::new(None);
            for level in levels {
                counter.step(level);
                for ancestor in 1..=level {
                    prop_assert!(counter.value(ancestor) >= 1);
                }
                for deeper in level + 1..=LIST_LEVELS {
                    prop_assert_eq!(counter.value(deeper), 0);
                }
            }
        }

        #[test]
        fn prop_alpha_matches_letter_count(number in 1u32..2000) {
            let positional = format_number(number, NumFormat::AlphaLower, false);
            prop_assert!(positional.chars().all(|c| c.is_ascii_lowercase()));
            let synced = format_number(number, NumFormat::AlphaLower, true);
            prop_assert_eq!(synced.len() as u32, (number - 1) / 26 + 1);
        }

        #[test]
        fn prop_roman_uses_roman_digits(number in 1u32..4000) {
            let roman = format_number(number, NumFormat::RomanLower, false);
            prop_assert!(roman.chars().all(|c| "ivxlcdm".contains(c)));
        }
    }
}
