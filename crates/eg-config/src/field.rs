//! Field descriptors: per-variable validation rules.
//!
//! A [`FieldDescriptor`] accepts or rejects one raw string and may coerce it
//! into a typed [`EnvValue`]. Every failing check contributes a message, so a
//! single value can report several problems at once.

use eg_common::EnvValue;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Closure type backing [`FieldKind::Custom`].
pub type CustomCheck = dyn Fn(&str) -> Result<EnvValue, String> + Send + Sync;

/// Built-in string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Url,
    Email,
}

/// Constraints applied to string fields.
#[derive(Debug, Clone, Default)]
pub struct StringRules {
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub pattern: Option<Regex>,
    pub format: Option<StringFormat>,
}

/// Constraints applied to number fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberRules {
    pub integer: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Caller-supplied check with a display label.
#[derive(Clone)]
pub struct CustomRule {
    label: String,
    check: Arc<CustomCheck>,
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule").field("label", &self.label).finish()
    }
}

/// What kind of value a field holds and how it is checked.
#[derive(Debug, Clone)]
pub enum FieldKind {
    String(StringRules),
    Number(NumberRules),
    Boolean,
    Enum(Vec<String>),
    Custom(CustomRule),
}

impl FieldKind {
    pub fn label(&self) -> &str {
        match self {
            FieldKind::String(rules) => match rules.format {
                Some(StringFormat::Url) => "url",
                Some(StringFormat::Email) => "email",
                None => "string",
            },
            FieldKind::Number(rules) if rules.integer => "integer",
            FieldKind::Number(_) => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum(_) => "enum",
            FieldKind::Custom(rule) => &rule.label,
        }
    }
}

/// Validation rule for a single environment variable.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    kind: FieldKind,
    optional: bool,
    default: Option<EnvValue>,
    description: Option<String>,
}

impl FieldDescriptor {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            optional: false,
            default: None,
            description: None,
        }
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String(StringRules::default()))
    }

    pub fn url() -> Self {
        Self::new(FieldKind::String(StringRules {
            format: Some(StringFormat::Url),
            ..StringRules::default()
        }))
    }

    pub fn email() -> Self {
        Self::new(FieldKind::String(StringRules {
            format: Some(StringFormat::Email),
            ..StringRules::default()
        }))
    }

    /// Number coerced from its decimal string form.
    pub fn number() -> Self {
        Self::new(FieldKind::Number(NumberRules::default()))
    }

    pub fn integer() -> Self {
        Self::new(FieldKind::Number(NumberRules {
            integer: true,
            ..NumberRules::default()
        }))
    }

    /// Boolean accepting `true`/`false`/`1`/`0` (case-insensitive).
    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FieldKind::Enum(values.into_iter().map(Into::into).collect()))
    }

    pub fn custom<F>(label: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> Result<EnvValue, String> + Send + Sync + 'static,
    {
        Self::new(FieldKind::Custom(CustomRule {
            label: label.into(),
            check: Arc::new(check),
        }))
    }

    /// Mark the field as optional: absence is acceptable.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Value used when the variable is absent.
    pub fn default_value(mut self, value: impl Into<EnvValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn min_len(mut self, min: usize) -> Self {
        if let FieldKind::String(rules) = &mut self.kind {
            rules.min_len = Some(min);
        }
        self
    }

    pub fn max_len(mut self, max: usize) -> Self {
        if let FieldKind::String(rules) = &mut self.kind {
            rules.max_len = Some(max);
        }
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        if let FieldKind::String(rules) = &mut self.kind {
            rules.pattern = Some(pattern);
        }
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        if let FieldKind::Number(rules) = &mut self.kind {
            rules.min = Some(min);
        }
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        if let FieldKind::Number(rules) = &mut self.kind {
            rules.max = Some(max);
        }
        self
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Value substituted when the variable is absent.
    pub fn fallback(&self) -> Option<&EnvValue> {
        self.default.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Validate a raw value.
    ///
    /// `Ok(None)` means the variable is absent and that is acceptable.
    pub fn validate(&self, raw: Option<&str>) -> Result<Option<EnvValue>, Vec<String>> {
        match raw {
            None => match (&self.default, self.optional) {
                (Some(default), _) => Ok(Some(default.clone())),
                (None, true) => Ok(None),
                (None, false) => Err(vec!["Required".to_string()]),
            },
            Some(raw) => self.check(raw).map(Some),
        }
    }

    /// Run the kind-specific checks against a present value.
    pub fn check(&self, raw: &str) -> Result<EnvValue, Vec<String>> {
        match &self.kind {
            FieldKind::String(rules) => check_string(rules, raw),
            FieldKind::Number(rules) => check_number(rules, raw),
            FieldKind::Boolean => check_boolean(raw),
            FieldKind::Enum(values) => check_enum(values, raw),
            FieldKind::Custom(rule) => (rule.check)(raw).map_err(|msg| vec![msg]),
        }
    }
}

fn check_string(rules: &StringRules, raw: &str) -> Result<EnvValue, Vec<String>> {
    let mut errors = Vec::new();
    let len = raw.chars().count();

    if let Some(min) = rules.min_len {
        if len < min {
            errors.push(format!(
                "String must contain at least {} character(s)",
                min
            ));
        }
    }
    if let Some(max) = rules.max_len {
        if len > max {
            errors.push(format!("String must contain at most {} character(s)", max));
        }
    }
    if let Some(pattern) = &rules.pattern {
        if !pattern.is_match(raw) {
            errors.push(format!("String must match pattern /{}/", pattern.as_str()));
        }
    }
    match rules.format {
        Some(StringFormat::Url) if !url_regex().is_match(raw) => {
            errors.push("Invalid url".to_string())
        }
        Some(StringFormat::Email) if !email_regex().is_match(raw) => {
            errors.push("Invalid email".to_string())
        }
        _ => {}
    }

    if errors.is_empty() {
        Ok(EnvValue::String(raw.to_string()))
    } else {
        Err(errors)
    }
}

fn check_number(rules: &NumberRules, raw: &str) -> Result<EnvValue, Vec<String>> {
    let n = match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => return Err(vec![format!("Expected number, received \"{}\"", raw)]),
    };

    let mut errors = Vec::new();
    if rules.integer && n.fract() != 0.0 {
        errors.push("Expected integer, received float".to_string());
    }
    if let Some(min) = rules.min {
        if n < min {
            errors.push(format!("Number must be greater than or equal to {}", min));
        }
    }
    if let Some(max) = rules.max {
        if n > max {
            errors.push(format!("Number must be less than or equal to {}", max));
        }
    }

    if errors.is_empty() {
        Ok(EnvValue::Number(n))
    } else {
        Err(errors)
    }
}

fn check_boolean(raw: &str) -> Result<EnvValue, Vec<String>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(EnvValue::Bool(true)),
        "false" | "0" => Ok(EnvValue::Bool(false)),
        _ => Err(vec![format!("Expected boolean, received \"{}\"", raw)]),
    }
}

fn check_enum(values: &[String], raw: &str) -> Result<EnvValue, Vec<String>> {
    if values.iter().any(|v| v == raw) {
        return Ok(EnvValue::String(raw.to_string()));
    }
    let expected = values
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(" | ");
    Err(vec![format!(
        "Invalid enum value. Expected {}, received '{}'",
        expected, raw
    )])
}

fn url_regex() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+[^\s]*$").expect("url regex is valid")
    })
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}
