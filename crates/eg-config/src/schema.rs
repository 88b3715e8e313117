//! Object schemas: named collections of field descriptors.

use crate::field::FieldDescriptor;
use crate::source::RuntimeSource;
use eg_common::{EnvMap, ValidationReport};
use std::collections::BTreeMap;
use tracing::trace;

/// Mapping from variable name to [`FieldDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, FieldDescriptor>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Schema::insert`].
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.insert(name, descriptor);
        self
    }

    /// Add or replace a field. Returns the descriptor it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        descriptor: FieldDescriptor,
    ) -> Option<FieldDescriptor> {
        self.fields.insert(name.into(), descriptor)
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Union of two schemas. On a name collision the descriptor from `other` wins.
    pub fn merge(&self, other: &Schema) -> Schema {
        let mut fields = self.fields.clone();
        for (name, descriptor) in &other.fields {
            fields.insert(name.clone(), descriptor.clone());
        }
        Schema { fields }
    }

    /// Validate every declared field against `source`.
    ///
    /// Keys in `source` that the schema does not declare are ignored and do
    /// not appear in the output. Failures are collected for all fields before
    /// returning.
    pub fn validate(&self, source: &RuntimeSource) -> Result<EnvMap, ValidationReport> {
        let mut parsed = EnvMap::new();
        let mut report = ValidationReport::new();

        for (name, descriptor) in &self.fields {
            match descriptor.validate(source.get(name)) {
                Ok(Some(value)) => {
                    parsed.insert(name.clone(), value);
                }
                Ok(None) => trace!(field = %name, "optional field absent"),
                Err(messages) => report.extend_field(name.clone(), messages),
            }
        }

        if report.is_empty() {
            Ok(parsed)
        } else {
            Err(report)
        }
    }
}

impl<S: Into<String>> FromIterator<(S, FieldDescriptor)> for Schema {
    fn from_iter<T: IntoIterator<Item = (S, FieldDescriptor)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use eg_common::EnvValue;

    #[test]
    fn merge_is_right_biased() {
        let left = Schema::new()
            .field("PORT", FieldDescriptor::string())
            .field("HOST", FieldDescriptor::string());
        let right = Schema::new().field("PORT", FieldDescriptor::number());

        let merged = left.merge(&right);
        assert_eq!(merged.len(), 2);
        assert!(matches!(
            merged.get("PORT").map(FieldDescriptor::kind),
            Some(FieldKind::Number(_))
        ));
        assert!(matches!(
            merged.get("HOST").map(FieldDescriptor::kind),
            Some(FieldKind::String(_))
        ));
    }

    #[test]
    fn merge_leaves_inputs_untouched() {
        let left = Schema::new().field("A", FieldDescriptor::string());
        let right = Schema::new().field("B", FieldDescriptor::string());
        let _ = left.merge(&right);
        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 1);
    }

    #[test]
    fn validate_strips_undeclared_keys() {
        let schema = Schema::new().field("PORT", FieldDescriptor::integer());
        let source = RuntimeSource::new().with("PORT", "8080").with("EXTRA", "x");
        let parsed = schema.validate(&source).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("PORT"), Some(&EnvValue::Number(8080.0)));
    }

    #[test]
    fn validate_aggregates_all_failures() {
        let schema = Schema::new()
            .field("DATABASE_URL", FieldDescriptor::url())
            .field("PORT", FieldDescriptor::integer())
            .field("LOG_LEVEL", FieldDescriptor::string().optional());
        let source = RuntimeSource::new().with("PORT", "eighty");

        let report = schema.validate(&source).unwrap_err();
        assert_eq!(report.len(), 2);
        assert_eq!(report.messages("DATABASE_URL"), Some(&["Required".to_string()][..]));
        assert!(report.messages("PORT").is_some());
        assert!(report.messages("LOG_LEVEL").is_none());
    }

    #[test]
    fn absent_optional_fields_are_omitted() {
        let schema = Schema::new().field("A", FieldDescriptor::string().optional());
        let parsed = schema.validate(&RuntimeSource::new()).unwrap();
        assert!(parsed.get("A").is_none());
    }
}
