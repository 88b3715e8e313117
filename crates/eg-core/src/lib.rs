//! envguard core: schema composition, validation and the access-policed
//! environment.
//!
//! ```ignore
//! use eg_core::{EnvOptions, FieldDescriptor, Schema};
//!
//! let env = EnvOptions::new()
//!     .server(Schema::new().field("DATABASE_URL", FieldDescriptor::url()))
//!     .client(Schema::new().field("PUBLIC_API_BASE", FieldDescriptor::url()))
//!     .shared(Schema::new().field("NODE_ENV", FieldDescriptor::enumeration(["development", "production"])))
//!     .create()?;
//!
//! let url = env.require::<String>("DATABASE_URL")?;
//! ```

pub mod access;
pub mod cli;
pub mod composer;
pub mod context;
pub mod exit_codes;
pub mod hooks;
pub mod merge;
pub mod prefix;
pub mod presets;
pub mod typed;

pub use access::{is_ignored_property, Env, IGNORED_PROPERTIES};
pub use composer::{create_env, EnvOptions};
pub use context::{ContextResolver, ExecutionContext, FixedContext, TargetContext};
pub use hooks::{InvalidAccessHook, ValidationErrorHook};
pub use prefix::PublicPrefix;
pub use typed::FromEnvValue;

pub use eg_common::{EnvError, EnvMap, EnvValue, Result, ValidationReport};
pub use eg_config::{FieldDescriptor, RuntimeSource, Schema, SchemaDeclaration};
