//! Execution context: whether the current invocation may see server secrets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trust context of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionContext {
    /// Trusted: every declared variable is validated and readable.
    Server,
    /// Untrusted: only client-prefixed and shared variables are validated and readable.
    Client,
}

impl ExecutionContext {
    pub fn from_is_server(is_server: bool) -> Self {
        if is_server {
            ExecutionContext::Server
        } else {
            ExecutionContext::Client
        }
    }

    pub fn is_server(self) -> bool {
        self == ExecutionContext::Server
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionContext::Server => write!(f, "server"),
            ExecutionContext::Client => write!(f, "client"),
        }
    }
}

/// Host-specific default for the execution context.
///
/// Used only when the caller does not pass an explicit context.
pub trait ContextResolver: Send + Sync {
    fn resolve(&self) -> ExecutionContext;
}

/// Resolves from the compilation target: browser builds
/// (`wasm32-unknown-unknown`) are clients, everything else is a server.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetContext;

impl ContextResolver for TargetContext {
    fn resolve(&self) -> ExecutionContext {
        if cfg!(all(target_arch = "wasm32", target_os = "unknown")) {
            ExecutionContext::Client
        } else {
            ExecutionContext::Server
        }
    }
}

/// Always answers the same context.
#[derive(Debug, Clone, Copy)]
pub struct FixedContext(pub ExecutionContext);

impl ContextResolver for FixedContext {
    fn resolve(&self) -> ExecutionContext {
        self.0
    }
}

impl<F> ContextResolver for F
where
    F: Fn() -> ExecutionContext + Send + Sync,
{
    fn resolve(&self) -> ExecutionContext {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_target_is_server() {
        assert_eq!(TargetContext.resolve(), ExecutionContext::Server);
    }

    #[test]
    fn closures_resolve() {
        let resolver = || ExecutionContext::Client;
        assert_eq!(resolver.resolve(), ExecutionContext::Client);
        assert_eq!(FixedContext(ExecutionContext::Server).resolve(), ExecutionContext::Server);
    }

    #[test]
    fn from_is_server_roundtrip() {
        assert!(ExecutionContext::from_is_server(true).is_server());
        assert!(!ExecutionContext::from_is_server(false).is_server());
        assert_eq!(ExecutionContext::Client.to_string(), "client");
    }
}
