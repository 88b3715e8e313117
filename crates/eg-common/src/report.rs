//! Aggregated per-field validation failures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Structured validation failure: every failing field with all of its messages.
///
/// Serializes as `{ "FIELD": ["message", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field. Messages accumulate in insertion order.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Record several messages for one field.
    pub fn extend_field<I, S>(&mut self, field: impl Into<String>, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.field_errors.entry(field.into()).or_default();
        entry.extend(messages.into_iter().map(Into::into));
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Number of failing fields (not messages).
    pub fn len(&self) -> usize {
        self.field_errors.len()
    }

    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.field_errors.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.field_errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.field_errors
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The `{ field: [messages] }` form.
    pub fn flatten(&self) -> &BTreeMap<String, Vec<String>> {
        &self.field_errors
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, messages)) in self.field_errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_accumulate_per_field() {
        let mut report = ValidationReport::new();
        report.push("PORT", "Expected number, received \"abc\"");
        report.push("PORT", "Number must be greater than or equal to 1");
        report.push("DATABASE_URL", "Required");

        assert_eq!(report.len(), 2);
        assert_eq!(report.messages("PORT").map(<[String]>::len), Some(2));
        assert_eq!(
            report.fields().collect::<Vec<_>>(),
            vec!["DATABASE_URL", "PORT"]
        );
    }

    #[test]
    fn test_display_one_line_per_field() {
        let mut report = ValidationReport::new();
        report.push("A", "Required");
        report.extend_field("B", ["too short", "bad format"]);
        assert_eq!(report.to_string(), "  A: Required\n  B: too short, bad format");
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut report = ValidationReport::new();
        report.push("SECRET", "Required");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({ "SECRET": ["Required"] }));
    }
}
