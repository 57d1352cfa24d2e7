//! # Length Units
//!
//! The planner works on plain numbers; the unit is purely a display concern.
//! A job records which unit its lengths are in so renderers can label them.
//!
//! ## Example
//!
//! ```rust
//! use cut_core::units::LengthUnit;
//!
//! assert_eq!(LengthUnit::Inches.format(56.75, 3), "56.75\"");
//! assert_eq!(LengthUnit::Millimeters.format(2440.0, 1), "2440 mm");
//! ```

use serde::{Deserialize, Serialize};

/// Unit the lengths of a job are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "cm")]
    Centimeters,
}

impl LengthUnit {
    /// All units, for help text and pickers
    pub const ALL: [LengthUnit; 4] = [
        LengthUnit::Inches,
        LengthUnit::Feet,
        LengthUnit::Millimeters,
        LengthUnit::Centimeters,
    ];

    /// Short code used in job files
    pub fn code(&self) -> &'static str {
        match self {
            LengthUnit::Inches => "in",
            LengthUnit::Feet => "ft",
            LengthUnit::Millimeters => "mm",
            LengthUnit::Centimeters => "cm",
        }
    }

    /// Suffix appended to formatted lengths
    pub fn suffix(&self) -> &'static str {
        match self {
            LengthUnit::Inches => "\"",
            LengthUnit::Feet => "'",
            LengthUnit::Millimeters => " mm",
            LengthUnit::Centimeters => " cm",
        }
    }

    /// Parse a unit code ("in", "ft", "mm", "cm").
    pub fn from_code(code: &str) -> Option<Self> {
        LengthUnit::ALL
            .into_iter()
            .find(|u| u.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Format a length with at most `precision` decimals, trailing zeros trimmed.
    pub fn format(&self, value: f64, precision: usize) -> String {
        format!("{}{}", format_number(value, precision), self.suffix())
    }
}

/// Format a number with at most `precision` decimals, trimming trailing zeros.
pub fn format_number(value: f64, precision: usize) -> String {
    let fixed = format!("{:.*}", precision, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    match trimmed {
        // Rounding can produce a negative zero
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
