//! envguard common types and errors.
//!
//! This crate provides foundational types shared across the envguard crates:
//! - Validated values and the map type that holds them
//! - The unified error type with stable error codes
//! - Declaration format versioning
//! - Output format selection for the CLI

pub mod error;
pub mod output;
pub mod report;
pub mod schema;
pub mod value;

pub use error::{ContractViolation, EnvError, Result, SchemaSlot};
pub use output::OutputFormat;
pub use report::ValidationReport;
pub use schema::SCHEMA_VERSION;
pub use value::{EnvMap, EnvValue};
