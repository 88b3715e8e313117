//! Failure hooks and their default implementations.
//!
//! Both hooks are terminal by default. A caller recovers by installing a hook
//! that returns `Ok` with a substitute instead of an error.

use eg_common::{EnvError, EnvMap, EnvValue, Result, ValidationReport};
use std::sync::Arc;
use tracing::error;

/// Called with the aggregated report when validation fails.
///
/// `Ok(map)` substitutes `map` for the parsed data; `Err` ends the invocation.
pub type ValidationErrorHook = Arc<dyn Fn(&ValidationReport) -> Result<EnvMap> + Send + Sync>;

/// Called with the variable name when a client reads a server-only variable.
///
/// `Ok(value)` is handed to the reader in place of the real value.
pub type InvalidAccessHook = Arc<dyn Fn(&str) -> Result<Option<EnvValue>> + Send + Sync>;

/// Logs one line per failing field, then fails with "Invalid environment variables".
///
/// The report travels in the error; read it with [`EnvError::report`].
pub fn report_validation_error(report: &ValidationReport) -> Result<EnvMap> {
    error!(fields = report.len(), "❌ Invalid environment variables");
    for (field, messages) in report.iter() {
        error!(field, messages = %messages.join(", "), "invalid environment variable");
    }
    Err(EnvError::InvalidEnvironment(report.clone()))
}

/// Fails with the access-violation error.
pub fn reject_invalid_access(name: &str) -> Result<Option<EnvValue>> {
    Err(EnvError::InvalidAccess {
        name: name.to_string(),
    })
}

pub fn default_validation_error_hook() -> ValidationErrorHook {
    Arc::new(report_validation_error)
}

pub fn default_invalid_access_hook() -> InvalidAccessHook {
    Arc::new(reject_invalid_access)
}
