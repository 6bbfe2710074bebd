//! Primitive style values.

use std::fmt;

/// A primitive value assigned to a style property.
///
/// Values are passed through opaquely: the compiler never checks that a
/// string is legal CSS, it only writes it out.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// A string value such as `"red"`, `"20px"` or `"1px solid #fff"`.
    Str(String),
    /// A bare number such as `0`, `1.5` or `400`.
    Number(f64),
}

impl StyleValue {
    /// Returns the string contents if this is a [`StyleValue::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Str(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }

    /// Returns the number if this is a [`StyleValue::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Str(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    /// Writes the value as it appears in CSS text.
    ///
    /// Integral numbers print without a fractional part (`400`, not `400.0`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Str(s) => f.write_str(s),
            StyleValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            StyleValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Str(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Str(s)
    }
}

impl From<&String> for StyleValue {
    fn from(s: &String) -> Self {
        StyleValue::Str(s.clone())
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<f32> for StyleValue {
    fn from(n: f32) -> Self {
        StyleValue::Number(f64::from(n))
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(f64::from(n))
    }
}

impl From<u32> for StyleValue {
    fn from(n: u32) -> Self {
        StyleValue::Number(f64::from(n))
    }
}
