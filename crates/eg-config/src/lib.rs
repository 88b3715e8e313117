//! envguard schema engine and configuration sources.
//!
//! This crate provides:
//! - Field descriptors that validate and coerce single raw values
//! - Object schemas with right-biased merging and aggregated validation
//! - Runtime sources (process environment or in-memory snapshots)
//! - JSON/TOML schema declaration files with a generated JSON Schema

pub mod declaration;
pub mod field;
pub mod schema;
pub mod source;

pub use declaration::{declaration_json_schema, FieldDeclaration, KindDeclaration, SchemaDeclaration};
pub use field::{FieldDescriptor, FieldKind, NumberRules, StringFormat, StringRules};
pub use schema::Schema;
pub use source::{ReadEnv, RuntimeSource, SystemEnv};
