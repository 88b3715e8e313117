//! Public prefix: the name marker that makes a variable safe for clients.

use eg_common::{ContractViolation, EnvError, Result, SchemaSlot};
use eg_config::Schema;
use std::fmt;

/// Prefix required on client variable names and forbidden on server ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicPrefix(String);

impl PublicPrefix {
    /// Next.js.
    pub const NEXT_PUBLIC: &'static str = "NEXT_PUBLIC_";
    /// Nuxt.
    pub const NUXT_PUBLIC: &'static str = "NUXT_PUBLIC_";
    /// Vite.
    pub const VITE: &'static str = "VITE_";
    /// SvelteKit, Astro, and the default.
    pub const PUBLIC: &'static str = "PUBLIC_";

    /// An empty prefix would mark every variable public, so it is rejected.
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(EnvError::InvalidPrefix("prefix must not be empty".into()));
        }
        if prefix.chars().any(char::is_whitespace) {
            return Err(EnvError::InvalidPrefix(format!(
                "prefix '{}' contains whitespace",
                prefix
            )));
        }
        Ok(Self(prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, name: &str) -> bool {
        name.starts_with(&self.0)
    }
}

impl Default for PublicPrefix {
    fn default() -> Self {
        Self(Self::PUBLIC.to_string())
    }
}

impl fmt::Display for PublicPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check every client name carries the prefix and no server name does.
///
/// All offending names are reported together.
pub fn check_contract(prefix: &PublicPrefix, server: &Schema, client: &Schema) -> Result<()> {
    let mut violations = Vec::new();

    violations.extend(
        client
            .names()
            .filter(|name| !prefix.matches(name))
            .map(|name| violation(name, SchemaSlot::Client, prefix)),
    );
    violations.extend(
        server
            .names()
            .filter(|name| prefix.matches(name))
            .map(|name| violation(name, SchemaSlot::Server, prefix)),
    );

    if violations.is_empty() {
        Ok(())
    } else {
        Err(EnvError::SchemaContract { violations })
    }
}

fn violation(name: &str, slot: SchemaSlot, prefix: &PublicPrefix) -> ContractViolation {
    ContractViolation {
        name: name.to_string(),
        slot,
        prefix: prefix.to_string(),
    }
}
