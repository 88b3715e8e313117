//! Schema declaration files.
//!
//! Schemas can be written down as JSON or TOML instead of being assembled in
//! code. A declaration names an optional public prefix and three tables of
//! fields:
//!
//! ```toml
//! schema_version = "1.0.0"
//! client_prefix = "PUBLIC_"
//!
//! [server.DATABASE_URL]
//! type = "url"
//!
//! [client.PUBLIC_API_BASE]
//! type = "url"
//! optional = true
//!
//! [shared.NODE_ENV]
//! type = "enum"
//! values = ["development", "test", "production"]
//! default = "development"
//! ```
//!
//! Defaults are written in raw string form and run through the field's own
//! rule when the declaration is converted, so an invalid default is a load
//! error rather than a surprise at validation time.

use crate::field::FieldDescriptor;
use crate::schema::Schema;
use eg_common::schema::{is_compatible, SCHEMA_VERSION};
use eg_common::{EnvError, Result, SchemaSlot};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// A complete declaration file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SchemaDeclaration {
    /// Declaration format version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Prefix that marks a variable as safe to expose to clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_prefix: Option<String>,

    /// Server-only variables.
    #[serde(default)]
    pub server: BTreeMap<String, FieldDeclaration>,

    /// Client-visible variables; names must carry the client prefix.
    #[serde(default)]
    pub client: BTreeMap<String, FieldDeclaration>,

    /// Variables visible in both contexts regardless of prefix.
    #[serde(default)]
    pub shared: BTreeMap<String, FieldDeclaration>,
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// One declared field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FieldDeclaration {
    #[serde(flatten)]
    pub kind: KindDeclaration,

    #[serde(default)]
    pub optional: bool,

    /// Raw value used when the variable is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Every flattened key; checked against the kind's known keys.
    #[serde(flatten, skip_serializing)]
    #[schemars(skip)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Field kind with its kind-specific limits, selected by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KindDeclaration {
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    Url,
    Email,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Integer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean,
    Enum { values: Vec<String> },
}

impl KindDeclaration {
    pub fn type_name(&self) -> &'static str {
        match self {
            KindDeclaration::String { .. } => "string",
            KindDeclaration::Url => "url",
            KindDeclaration::Email => "email",
            KindDeclaration::Number { .. } => "number",
            KindDeclaration::Integer { .. } => "integer",
            KindDeclaration::Boolean => "boolean",
            KindDeclaration::Enum { .. } => "enum",
        }
    }

    /// Keys this kind accepts besides `type`.
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            KindDeclaration::String { .. } => &["min_length", "max_length", "pattern"],
            KindDeclaration::Number { .. } | KindDeclaration::Integer { .. } => &["min", "max"],
            KindDeclaration::Enum { .. } => &["values"],
            KindDeclaration::Url | KindDeclaration::Email | KindDeclaration::Boolean => &[],
        }
    }
}

impl FieldDeclaration {
    /// Build the runtime descriptor for the field called `name`.
    pub fn to_descriptor(&self, name: &str) -> Result<FieldDescriptor> {
        if let Some(key) = self
            .extra
            .keys()
            .find(|key| key.as_str() != "type" && !self.kind.keys().contains(&key.as_str()))
        {
            return Err(EnvError::Declaration(format!(
                "field '{}' has unknown key '{}' for type {}",
                name,
                key,
                self.kind.type_name()
            )));
        }

        let mut descriptor = match &self.kind {
            KindDeclaration::String {
                min_length,
                max_length,
                pattern,
            } => {
                let mut d = FieldDescriptor::string();
                if let Some(min) = min_length {
                    d = d.min_len(*min);
                }
                if let Some(max) = max_length {
                    d = d.max_len(*max);
                }
                if let Some(pattern) = pattern {
                    let re = Regex::new(pattern).map_err(|e| {
                        EnvError::Declaration(format!("pattern for '{}' is invalid: {}", name, e))
                    })?;
                    d = d.pattern(re);
                }
                d
            }
            KindDeclaration::Url => FieldDescriptor::url(),
            KindDeclaration::Email => FieldDescriptor::email(),
            KindDeclaration::Number { min, max } => {
                with_bounds(name, FieldDescriptor::number(), *min, *max)?
            }
            KindDeclaration::Integer { min, max } => {
                with_bounds(name, FieldDescriptor::integer(), *min, *max)?
            }
            KindDeclaration::Boolean => FieldDescriptor::boolean(),
            KindDeclaration::Enum { values } => {
                if values.is_empty() {
                    return Err(EnvError::Declaration(format!(
                        "enum '{}' declares no values",
                        name
                    )));
                }
                FieldDescriptor::enumeration(values.iter().cloned())
            }
        };

        if self.optional {
            descriptor = descriptor.optional();
        }
        if let Some(description) = &self.description {
            descriptor = descriptor.describe(description.clone());
        }
        if let Some(raw) = &self.default {
            let value = descriptor.check(raw).map_err(|messages| {
                EnvError::Declaration(format!(
                    "default for '{}' is invalid: {}",
                    name,
                    messages.join(", ")
                ))
            })?;
            descriptor = descriptor.default_value(value);
        }
        Ok(descriptor)
    }
}

fn with_bounds(
    name: &str,
    mut descriptor: FieldDescriptor,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<FieldDescriptor> {
    for (label, bound) in [("min", min), ("max", max)] {
        if bound.is_some_and(|b| !b.is_finite()) {
            return Err(EnvError::Declaration(format!(
                "{} for '{}' must be a finite number",
                label, name
            )));
        }
    }
    if let Some(min) = min {
        descriptor = descriptor.min(min);
    }
    if let Some(max) = max {
        descriptor = descriptor.max(max);
    }
    Ok(descriptor)
}

impl SchemaDeclaration {
    /// Load a declaration, choosing the parser from the file extension
    /// (`.toml` → TOML, anything else → JSON).
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        debug!(path = %path.display(), toml = is_toml, "loading schema declaration");
        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let declaration: SchemaDeclaration = serde_json::from_str(json)?;
        declaration.check_version()?;
        Ok(declaration)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let declaration: SchemaDeclaration =
            toml::from_str(text).map_err(|e| EnvError::Declaration(e.to_string()))?;
        declaration.check_version()?;
        Ok(declaration)
    }

    fn check_version(&self) -> Result<()> {
        if is_compatible(&self.schema_version) {
            Ok(())
        } else {
            Err(EnvError::IncompatibleVersion {
                version: self.schema_version.clone(),
                supported: SCHEMA_VERSION.to_string(),
            })
        }
    }

    /// Convert one of the three tables into a runtime [`Schema`].
    pub fn schema(&self, slot: SchemaSlot) -> Result<Schema> {
        let table = match slot {
            SchemaSlot::Server => &self.server,
            SchemaSlot::Client => &self.client,
            SchemaSlot::Shared => &self.shared,
        };
        table
            .iter()
            .map(|(name, decl)| -> Result<(String, FieldDescriptor)> {
                Ok((name.clone(), decl.to_descriptor(name)?))
            })
            .collect()
    }

    /// Total number of declared fields across all tables.
    pub fn field_count(&self) -> usize {
        self.server.len() + self.client.len() + self.shared.len()
    }
}

/// JSON Schema describing the declaration file format.
pub fn declaration_json_schema() -> Result<serde_json::Value> {
    let schema = schemars::schema_for!(SchemaDeclaration);
    Ok(serde_json::to_value(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RuntimeSource;
    use eg_common::EnvValue;
    use std::io::Write;

    const TOML_DECL: &str = r#"
client_prefix = "NEXT_PUBLIC_"

[server.DATABASE_URL]
type = "url"

[server.PORT]
type = "integer"
min = 1
max = 65535
default = "3000"

[client.NEXT_PUBLIC_API]
type = "string"
min_length = 3
optional = true

[shared.NODE_ENV]
type = "enum"
values = ["development", "test", "production"]
default = "development"
"#;

    #[test]
    fn parse_toml_declaration() {
        let decl = SchemaDeclaration::from_toml_str(TOML_DECL).unwrap();
        assert_eq!(decl.schema_version, SCHEMA_VERSION);
        assert_eq!(decl.client_prefix.as_deref(), Some("NEXT_PUBLIC_"));
        assert_eq!(decl.field_count(), 4);
        assert_eq!(
            decl.server["PORT"].kind,
            KindDeclaration::Integer {
                min: Some(1.0),
                max: Some(65535.0)
            }
        );
    }

    #[test]
    fn defaults_are_coerced_through_the_rule() {
        let decl = SchemaDeclaration::from_toml_str(TOML_DECL).unwrap();
        let server = decl.schema(SchemaSlot::Server).unwrap();
        assert_eq!(
            server.get("PORT").and_then(FieldDescriptor::fallback),
            Some(&EnvValue::Number(3000.0))
        );

        let parsed = server
            .validate(&RuntimeSource::new().with("DATABASE_URL", "postgres://db/app"))
            .unwrap();
        assert_eq!(parsed.get("PORT"), Some(&EnvValue::Number(3000.0)));
    }

    #[test]
    fn invalid_default_is_rejected_at_load() {
        let json = r#"{ "shared": { "MODE": { "type": "enum", "values": ["a"], "default": "b" } } }"#;
        let decl = SchemaDeclaration::from_json_str(json).unwrap();
        let err = decl.schema(SchemaSlot::Shared).unwrap_err();
        assert!(matches!(err, EnvError::Declaration(_)));
        assert!(err.to_string().contains("default for 'MODE'"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let json = r#"{ "server": { "KEY": { "type": "string", "pattern": "([" } } }"#;
        let decl = SchemaDeclaration::from_json_str(json).unwrap();
        assert!(decl.schema(SchemaSlot::Server).is_err());
    }

    #[test]
    fn empty_enum_is_rejected() {
        let json = r#"{ "server": { "KEY": { "type": "enum", "values": [] } } }"#;
        let decl = SchemaDeclaration::from_json_str(json).unwrap();
        assert!(decl.schema(SchemaSlot::Server).is_err());
    }

    #[test]
    fn misspelled_field_key_is_rejected() {
        let json = r#"{ "server": { "LOG": { "type": "string", "optinal": true } } }"#;
        let decl = SchemaDeclaration::from_json_str(json).unwrap();
        let err = decl.schema(SchemaSlot::Server).unwrap_err();
        assert!(matches!(err, EnvError::Declaration(_)));
        assert!(err.to_string().contains("unknown key 'optinal'"));

        let json = r#"{ "server": { "LOG": { "type": "string", "min_lenght": 5 } } }"#;
        let decl = SchemaDeclaration::from_json_str(json).unwrap();
        assert!(decl.schema(SchemaSlot::Server).is_err());
    }

    #[test]
    fn limit_for_another_kind_is_rejected() {
        let json = r#"{ "server": { "U": { "type": "url", "min_length": 99 } } }"#;
        let decl = SchemaDeclaration::from_json_str(json).unwrap();
        let err = decl.schema(SchemaSlot::Server).unwrap_err();
        assert!(err.to_string().contains("for type url"));
    }

    #[test]
    fn known_keys_still_load() {
        let decl = SchemaDeclaration::from_toml_str(TOML_DECL).unwrap();
        for slot in [SchemaSlot::Server, SchemaSlot::Client, SchemaSlot::Shared] {
            assert!(decl.schema(slot).is_ok());
        }
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        let toml = "[server.PORT]\ntype = \"number\"\nmax = nan\n";
        let decl = SchemaDeclaration::from_toml_str(toml).unwrap();
        let err = decl.schema(SchemaSlot::Server).unwrap_err();
        assert!(err.to_string().contains("max for 'PORT' must be a finite number"));

        let toml = "[server.PORT]\ntype = \"integer\"\nmin = -inf\n";
        let decl = SchemaDeclaration::from_toml_str(toml).unwrap();
        assert!(decl.schema(SchemaSlot::Server).is_err());
    }

    #[test]
    fn incompatible_version_rejected() {
        let json = r#"{ "schema_version": "2.0.0" }"#;
        let err = SchemaDeclaration::from_json_str(json).unwrap_err();
        assert_eq!(err.code(), 41);
    }

    #[test]
    fn unknown_top_level_key_rejected() {
        let json = r#"{ "servers": {} }"#;
        assert!(SchemaDeclaration::from_json_str(json).is_err());
    }

    #[test]
    fn from_path_picks_parser_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("envguard.toml");
        std::fs::File::create(&toml_path)
            .unwrap()
            .write_all(TOML_DECL.as_bytes())
            .unwrap();
        assert_eq!(SchemaDeclaration::from_path(&toml_path).unwrap().field_count(), 4);

        let json_path = dir.path().join("envguard.json");
        std::fs::write(&json_path, r#"{ "server": { "SECRET": { "type": "string" } } }"#)
            .unwrap();
        assert_eq!(SchemaDeclaration::from_path(&json_path).unwrap().field_count(), 1);
    }

    #[test]
    fn json_schema_describes_tables() {
        let schema = declaration_json_schema().unwrap();
        let props = &schema["properties"];
        assert!(props.get("server").is_some());
        assert!(props.get("client").is_some());
        assert!(props.get("shared").is_some());
    }
}
