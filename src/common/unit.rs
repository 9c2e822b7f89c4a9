//! Unit conversion utilities.
//!
//! ODF expresses lengths as a number immediately followed by a unit suffix
//! (`12pt`, `2.5cm`, `0.7in`). Style resolution needs to scale such lengths by
//! a percentage and to add relative deltas (`style:font-size-rel`), which is
//! what [`Length`] is for.

use crate::common::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Supported length units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Millimeter
    Millimeter,
    /// Centimeter
    Centimeter,
    /// Meter
    Meter,
    /// Point (1/72 inch)
    Point,
    /// Pica (1/6 inch)
    Pica,
    /// Inch
    Inch,
    /// Pixel
    Pixel,
    /// Font-relative em
    Em,
}

impl LengthUnit {
    /// Get the unit abbreviation
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Point => "pt",
            Self::Pica => "pc",
            Self::Inch => "in",
            Self::Pixel => "px",
            Self::Em => "em",
        }
    }

    fn from_str_internal(s: &str) -> Option<Self> {
        match s {
            "mm" => Some(Self::Millimeter),
            "cm" => Some(Self::Centimeter),
            "m" => Some(Self::Meter),
            "pt" => Some(Self::Point),
            "pc" => Some(Self::Pica),
            "in" | "inch" => Some(Self::Inch),
            "px" => Some(Self::Pixel),
            "em" => Some(Self::Em),
            _ => None,
        }
    }

    /// Inches per unit, for units with a fixed physical size
    fn inches_per_unit(&self) -> Option<f64> {
        match self {
            Self::Millimeter => Some(1.0 / 25.4),
            Self::Centimeter => Some(1.0 / 2.54),
            Self::Meter => Some(1.0 / 0.0254),
            Self::Point => Some(1.0 / 72.0),
            Self::Pica => Some(1.0 / 6.0),
            Self::Inch => Some(1.0),
            Self::Pixel | Self::Em => None,
        }
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_internal(s).ok_or_else(|| Error::Other(format!("Unknown length unit '{}'", s)))
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Length value with unit
///
/// # Examples
///
/// ```
/// use litchi_odf::common::unit::{Length, LengthUnit};
///
/// let length = "12pt".parse::<Length>().unwrap();
/// assert_eq!(length.unit(), LengthUnit::Point);
/// assert_eq!(length.scale(150.0).to_string(), "18pt");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Length {
    value: f64,
    unit: LengthUnit,
}

impl Length {
    /// Create a new length measurement
    #[inline]
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Get the numeric value
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get the unit
    #[inline]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Multiply by a percentage (`150.0` means 150%)
    pub fn scale(&self, percent: f64) -> Self {
        Self::new(self.value * percent / 100.0, self.unit)
    }

    /// Convert into another unit.
    ///
    /// Pixels and ems have no fixed physical size and only convert to themselves.
    pub fn to_unit(&self, unit: LengthUnit) -> Result<Self> {
        if unit == self.unit {
            return Ok(*self);
        }
        match (self.unit.inches_per_unit(), unit.inches_per_unit()) {
            (Some(from), Some(to)) => Ok(Self::new(self.value * from / to, unit)),
            _ => Err(Error::Other(format!(
                "Cannot convert {} to {} without device information",
                self.unit, unit
            ))),
        }
    }

    /// Add another length, expressed in this length's unit.
    pub fn add(&self, other: &Length) -> Result<Self> {
        let other = other.to_unit(self.unit)?;
        Ok(Self::new(self.value + other.value, self.unit))
    }

    /// Convert to inches
    pub fn to_inches(&self) -> Result<Self> {
        self.to_unit(LengthUnit::Inch)
    }
}

impl FromStr for Length {
    type Err = Error;

    /// Parse length from string (e.g., "2.5cm", "10pt", "-1pt")
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0)))
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        let (digits, suffix) = s.split_at(split);

        if digits.is_empty() || digits == "-" || digits == "+" {
            return Err(Error::Other(format!("No numeric value found in '{}'", s)));
        }

        let value: f64 = digits
            .parse()
            .map_err(|_| Error::Other(format!("Failed to parse numeric value from '{}'", s)))?;

        let unit = if suffix.is_empty() {
            LengthUnit::Centimeter
        } else {
            LengthUnit::from_str(suffix.trim())?
        };

        Ok(Self::new(value, unit))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_decimal(self.value), self.unit.as_str())
    }
}

impl PartialEq for Length {
    fn eq(&self, other: &Self) -> bool {
        match other.to_unit(self.unit) {
            Ok(other) => (self.value - other.value).abs() < 1e-9,
            Err(_) => false,
        }
    }
}

impl PartialOrd for Length {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let other = other.to_unit(self.unit).ok()?;
        self.value.partial_cmp(&other.value)
    }
}

/// Format a decimal with at most four fractional digits and no trailing zeros.
pub fn format_decimal(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    let mut text = format!("{:.4}", rounded);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Parse a percentage value such as `150%` into `150.0`.
pub fn parse_percentage(value: &str) -> Option<f64> {
    value.trim().strip_suffix('%')?.trim().parse().ok()
}

/// Normalize the verbose `inch` suffix to the canonical `in`.
pub fn normalize_unit_suffix(value: &str) -> String {
    match value.strip_suffix("inch") {
        Some(number) => format!("{}in", number),
        None => value.to_string(),
    }
}

/// Scale a length string by a percentage, e.g. (`12pt`, 150.0) → `18pt`.
pub fn scale_length(length: &str, percent: f64) -> Option<String> {
    let length: Length = length.parse().ok()?;
    Some(length.scale(percent).to_string())
}
