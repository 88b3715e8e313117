//! The access-policed environment view.
//!
//! [`Env`] is the artifact a composition returns. Its backing map is private:
//! every read goes through [`Env::get`], which applies the visibility policy
//! fixed at construction. The check runs on every read, not once, because an
//! `Env` built on a server may be handed to client code as a value.

use crate::context::ExecutionContext;
use crate::hooks::InvalidAccessHook;
use crate::prefix::PublicPrefix;
use crate::typed::FromEnvValue;
use eg_common::{EnvError, EnvMap, EnvValue, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Property names some module loaders probe on any object. Reads of these
/// answer "absent" without consulting the policy.
pub const IGNORED_PROPERTIES: [&str; 2] = ["__esModule", "$$typeof"];

pub fn is_ignored_property(name: &str) -> bool {
    IGNORED_PROPERTIES.contains(&name)
}

/// Visibility rules for one [`Env`].
#[derive(Clone)]
pub(crate) struct AccessPolicy {
    context: ExecutionContext,
    prefix: PublicPrefix,
    shared: BTreeSet<String>,
    on_invalid_access: InvalidAccessHook,
}

impl AccessPolicy {
    pub(crate) fn new(
        context: ExecutionContext,
        prefix: PublicPrefix,
        shared: BTreeSet<String>,
        on_invalid_access: InvalidAccessHook,
    ) -> Self {
        Self {
            context,
            prefix,
            shared,
            on_invalid_access,
        }
    }

    /// Neither client-prefixed nor declared shared.
    fn is_server_only(&self, name: &str) -> bool {
        !self.prefix.matches(name) && !self.shared.contains(name)
    }

    fn permits(&self, name: &str) -> bool {
        self.context.is_server() || !self.is_server_only(name)
    }
}

/// Validated, read-only environment.
///
/// Cloning is cheap; clones share the same data and policy.
#[derive(Clone)]
pub struct Env {
    values: Arc<EnvMap>,
    policy: Option<Arc<AccessPolicy>>,
}

impl Env {
    pub(crate) fn protected(values: EnvMap, policy: AccessPolicy) -> Self {
        Self {
            values: Arc::new(values),
            policy: Some(Arc::new(policy)),
        }
    }

    /// No policy at all; produced only by the skip-validation path.
    pub(crate) fn unprotected(values: EnvMap) -> Self {
        Self {
            values: Arc::new(values),
            policy: None,
        }
    }

    /// Read a variable.
    ///
    /// In client context a server-only name is routed to the invalid-access
    /// hook, whose result is returned instead of the stored value.
    pub fn get(&self, name: &str) -> Result<Option<EnvValue>> {
        if is_ignored_property(name) {
            return Ok(None);
        }
        if let Some(policy) = &self.policy {
            if !policy.permits(name) {
                warn!(context = %policy.context, "server-only variable read on the client");
                return (policy.on_invalid_access)(name);
            }
        }
        Ok(self.values.get(name).cloned())
    }

    /// Read a variable converted to `T`.
    pub fn get_as<T: FromEnvValue>(&self, name: &str) -> Result<Option<T>> {
        match self.get(name)? {
            None => Ok(None),
            Some(value) => T::from_env_value(&value)
                .map(Some)
                .ok_or_else(|| EnvError::TypeMismatch {
                    name: name.to_string(),
                    expected: T::EXPECTED,
                    actual: value.type_name(),
                }),
        }
    }

    /// Like [`Env::get_as`], but absence is an error.
    pub fn require<T: FromEnvValue>(&self, name: &str) -> Result<T> {
        self.get_as(name)?.ok_or_else(|| EnvError::Missing {
            name: name.to_string(),
        })
    }

    /// Variable names held by this environment. Names are not secret; values
    /// are only reachable through the read methods.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Context the policy was built for. `None` when unprotected.
    pub fn context(&self) -> Option<ExecutionContext> {
        self.policy.as_ref().map(|p| p.context)
    }

    /// False only for environments returned by the skip-validation path.
    pub fn is_protected(&self) -> bool {
        self.policy.is_some()
    }

    /// Whether `name` is hidden from clients under this environment's policy.
    pub fn is_server_only(&self, name: &str) -> bool {
        self.policy
            .as_ref()
            .is_some_and(|p| p.is_server_only(name))
    }

    /// Every client-visible variable, for embedding in client code.
    ///
    /// Server-only variables are left out rather than reported, so this never
    /// calls the invalid-access hook. `None` for an unprotected environment,
    /// which has no visibility rules to filter by.
    pub fn client_snapshot(&self) -> Option<EnvMap> {
        let policy = self.policy.as_ref()?;
        Some(
            self.values
                .iter()
                .filter(|(name, _)| !policy.is_server_only(name))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }

    /// Backing values, for folding into a later composition as an extension.
    pub(crate) fn extension_values(&self) -> &EnvMap {
        &self.values
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // values stay out of logs
        f.debug_struct("Env")
            .field("context", &self.context())
            .field("names", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}
