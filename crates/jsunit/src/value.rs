//! Dynamically typed values checked by assertions.
//!
//! Assertions compare what a test author hands them using the coercion rules of
//! a scripting host: truthiness (ES2024 7.1.2 ToBoolean), numeric conversion
//! (7.1.3 ToNumber), loose equality (7.2.14 IsLooselyEqual) and strict equality
//! (7.2.15 IsStrictlyEqual). Only primitive values are modelled.

use serde::{Serialize, Serializer};
use std::fmt;

/// A primitive value as seen by an assertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// undefined
    #[default]
    Undefined,
    /// null
    Null,
    /// A boolean
    Boolean(bool),
    /// A floating-point number (including -0.0, NaN, Infinity)
    Number(f64),
    /// A string
    String(String),
}

impl Value {
    /// Shorthand for the not-a-number value.
    pub const NAN: Value = Value::Number(f64::NAN);

    /// The `typeof` name of the value.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            // typeof null is "object" in the host language
            Value::Null => "object",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }

    /// Convert to boolean (ToBoolean)
    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
        }
    }

    /// Convert to number (ToNumber)
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::String(s) => string_to_number(s),
        }
    }

    /// Strict equality (`===`)
    pub fn strictly_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            // IEEE comparison: NaN != NaN, +0 == -0
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }

    /// Loose equality (`==`)
    pub fn loosely_equals(&self, other: &Value) -> bool {
        // Same type: use strict equality
        if self.type_of() == other.type_of() {
            return self.strictly_equals(other);
        }

        match (self, other) {
            (Value::Null, Value::Undefined) | (Value::Undefined, Value::Null) => true,
            (Value::Number(a), Value::String(_)) => *a == other.to_number(),
            (Value::String(_), Value::Number(b)) => self.to_number() == *b,
            (Value::Boolean(_), _) => Value::Number(self.to_number()).loosely_equals(other),
            (_, Value::Boolean(_)) => self.loosely_equals(&Value::Number(other.to_number())),
            _ => false,
        }
    }

    /// True when the value coerces to NaN (the global `isNaN`)
    pub fn coerces_to_nan(&self) -> bool {
        self.to_number().is_nan()
    }
}

/// StringToNumber (ES2024 7.1.4.1.1)
fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Non-decimal integer literals take no sign
    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&trimmed[2..], radix);
    }

    // Rust accepts "inf", "nan" and friends; the host grammar does not.
    let is_decimal_literal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !is_decimal_literal || !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut result = 0.0f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => result = result * radix as f64 + d as f64,
            None => return f64::NAN,
        }
    }
    result
}

/// WhiteSpace and LineTerminator code points of the host grammar.
/// Unlike `char::is_whitespace`, U+0085 is not included.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Format a number the way the host's Number::toString does
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        }
        .to_string();
    }
    if n == 0.0 {
        // -0 prints as 0
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{}", n);
    }

    // Exponent form: 1e+21, 1.5e-7
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            // JSON has no NaN/Infinity; keep their textual form
            Value::Number(n) if !n.is_finite() => serializer.serialize_str(&format_number(*n)),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n as f64)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}
