//! Error types for envguard.

use crate::report::ValidationReport;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for envguard operations.
pub type Result<T> = std::result::Result<T, EnvError>;

/// Which of the three declared schemas a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaSlot {
    Server,
    Client,
    Shared,
}

impl fmt::Display for SchemaSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSlot::Server => write!(f, "server"),
            SchemaSlot::Client => write!(f, "client"),
            SchemaSlot::Shared => write!(f, "shared"),
        }
    }
}

/// A single field name that breaks the public-prefix rule of its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractViolation {
    pub name: String,
    pub slot: SchemaSlot,
    pub prefix: String,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            SchemaSlot::Client => write!(
                f,
                "client variable '{}' must be prefixed with '{}'",
                self.name, self.prefix
            ),
            _ => write!(
                f,
                "{} variable '{}' must not be prefixed with '{}'",
                self.slot, self.name, self.prefix
            ),
        }
    }
}

/// Unified error type for envguard.
#[derive(Error, Debug)]
pub enum EnvError {
    // Schema contract errors (10-19)
    #[error("schema contract violated: {}", join_violations(.violations))]
    SchemaContract { violations: Vec<ContractViolation> },

    #[error("invalid public prefix: {0}")]
    InvalidPrefix(String),

    // Validation errors (20-29)
    #[error("Invalid environment variables")]
    InvalidEnvironment(ValidationReport),

    #[error("variable '{name}' has type {actual}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("variable '{name}' is not set")]
    Missing { name: String },

    // Access errors (30-39)
    #[error("❌ Attempted to access a server-side environment variable on the client")]
    InvalidAccess { name: String },

    // Declaration errors (40-49)
    #[error("invalid schema declaration: {0}")]
    Declaration(String),

    #[error("incompatible declaration version {version} (supported: {supported})")]
    IncompatibleVersion { version: String, supported: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EnvError {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            EnvError::SchemaContract { .. } => 10,
            EnvError::InvalidPrefix(_) => 11,
            EnvError::InvalidEnvironment(_) => 20,
            EnvError::TypeMismatch { .. } => 21,
            EnvError::Missing { .. } => 22,
            EnvError::InvalidAccess { .. } => 30,
            EnvError::Declaration(_) => 40,
            EnvError::IncompatibleVersion { .. } => 41,
            EnvError::Io(_) => 60,
            EnvError::Json(_) => 61,
        }
    }

    /// The per-field report carried by a validation failure, if any.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            EnvError::InvalidEnvironment(report) => Some(report),
            _ => None,
        }
    }
}

fn join_violations(violations: &[ContractViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
