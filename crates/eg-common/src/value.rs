//! Validated environment values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Map of variable name to validated value.
///
/// Absent variables are simply missing from the map.
pub type EnvMap = BTreeMap<String, EnvValue>;

/// A single validated (and possibly coerced) environment value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl EnvValue {
    /// Short type label used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            EnvValue::Bool(_) => "boolean",
            EnvValue::Number(_) => "number",
            EnvValue::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnvValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            EnvValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Integral view of a number. Returns None for fractional or out of range values.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            EnvValue::Number(n)
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64 =>
            {
                Some(*n as i64)
            }
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EnvValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::Bool(b) => write!(f, "{}", b),
            EnvValue::Number(n) => write!(f, "{}", n),
            EnvValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for EnvValue {
    fn from(s: &str) -> Self {
        EnvValue::String(s.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(s: String) -> Self {
        EnvValue::String(s)
    }
}

impl From<f64> for EnvValue {
    fn from(n: f64) -> Self {
        EnvValue::Number(n)
    }
}

impl From<i64> for EnvValue {
    fn from(n: i64) -> Self {
        EnvValue::Number(n as f64)
    }
}

impl From<bool> for EnvValue {
    fn from(b: bool) -> Self {
        EnvValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_view() {
        assert_eq!(EnvValue::Number(8080.0).as_i64(), Some(8080));
        assert_eq!(EnvValue::Number(1.5).as_i64(), None);
        assert_eq!(EnvValue::from("8080").as_i64(), None);
        // i64::MAX rounds up to 2^63 as f64, which is out of range
        assert_eq!(EnvValue::Number(9_223_372_036_854_775_808.0).as_i64(), None);
        assert_eq!(EnvValue::Number(i64::MIN as f64).as_i64(), Some(i64::MIN));
    }

    #[test]
    fn test_display_matches_raw_form() {
        assert_eq!(EnvValue::from(true).to_string(), "true");
        assert_eq!(EnvValue::from(3000_i64).to_string(), "3000");
        assert_eq!(EnvValue::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_untagged_serialization() {
        let mut map = EnvMap::new();
        map.insert("PORT".into(), EnvValue::from(3000_i64));
        map.insert("DEBUG".into(), EnvValue::from(false));
        map.insert("HOST".into(), EnvValue::from("localhost"));
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["PORT"], 3000.0);
        assert_eq!(json["DEBUG"], false);
        assert_eq!(json["HOST"], "localhost");
    }
}
