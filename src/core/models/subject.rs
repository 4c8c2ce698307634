//! Subject entry model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of a semester: a subject name plus the grade and units exactly as typed.
///
/// Grade and units stay raw text at rest so in-progress input such as `"3."` or
/// `""` survives a save. The numeric view is computed on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectEntry {
    /// Subject name (free text)
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,

    /// Grade as typed (e.g., "1.75")
    #[serde(default, deserialize_with = "lenient_text")]
    pub grade: String,

    /// Units as typed (e.g., "3")
    #[serde(default, deserialize_with = "lenient_text")]
    pub units: String,
}

/// The editable fields of a [`SubjectEntry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectField {
    /// Subject name
    Name,
    /// Grade text
    Grade,
    /// Units text
    Units,
}

impl SubjectEntry {
    /// Create a blank entry (all fields empty)
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            name: String::new(),
            grade: String::new(),
            units: String::new(),
        }
    }

    /// Create an entry from its three raw fields
    #[must_use]
    pub fn new(name: &str, grade: &str, units: &str) -> Self {
        Self {
            name: name.to_string(),
            grade: grade.to_string(),
            units: units.to_string(),
        }
    }

    /// Overwrite one field with `value`
    pub fn set(&mut self, field: SubjectField, value: String) {
        match field {
            SubjectField::Name => self.name = value,
            SubjectField::Grade => self.grade = value,
            SubjectField::Units => self.units = value,
        }
    }

    /// Read one field
    #[must_use]
    pub fn get(&self, field: SubjectField) -> &str {
        match field {
            SubjectField::Name => &self.name,
            SubjectField::Grade => &self.grade,
            SubjectField::Units => &self.units,
        }
    }

    /// Numeric view of the grade, `None` when the text holds no number
    #[must_use]
    pub fn grade_value(&self) -> Option<f64> {
        parse_number(&self.grade)
    }

    /// Numeric view of the units, `None` when the text holds no number
    #[must_use]
    pub fn units_value(&self) -> Option<f64> {
        parse_number(&self.units)
    }

    /// Grade × units when the grade parses and the units parse to a positive number
    #[must_use]
    pub fn grade_units(&self) -> Option<f64> {
        let grade = self.grade_value()?;
        let units = self.units_value().filter(|u| *u > 0.0)?;
        Some(grade * units)
    }
}

impl SubjectField {
    /// Lowercase field name as used on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Grade => "grade",
            Self::Units => "units",
        }
    }
}

impl FromStr for SubjectField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" | "subject" => Ok(Self::Name),
            "grade" => Ok(Self::Grade),
            "units" | "unit" => Ok(Self::Units),
            _ => Err(format!("Unknown subject field: {s}")),
        }
    }
}

impl fmt::Display for SubjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse the longest leading decimal literal of `raw`.
///
/// Leading whitespace is skipped, then `[+-]digits[.digits][e[+-]digits]` is
/// matched greedily; trailing text is ignored (`"3.5 (INC)"` reads as 3.5).
/// Returns `None` when no digits are found or the value is not finite.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accept a string, number, boolean or null for a text field.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}
