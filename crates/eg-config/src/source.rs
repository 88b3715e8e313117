//! Runtime sources: where raw variable values come from.
//!
//! | Type | Backing | Use |
//! |------|---------|-----|
//! | [`SystemEnv`] | `std::env` | production reads |
//! | [`RuntimeSource`] | `BTreeMap` snapshot | composition input, tests |

use std::collections::BTreeMap;
use std::env;

/// Read access to a key/value variable source.
///
/// Does **not** require `Send + Sync`; add the bounds at your call site.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}

/// Zero-sized type that delegates to `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

/// In-memory snapshot of raw variable values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeSource {
    vars: BTreeMap<String, String>,
}

impl RuntimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Entries whose key or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Snapshot only the named keys from a reader.
    pub fn pick<R, I, S>(reader: &R, keys: I) -> Self
    where
        R: ReadEnv + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter()
            .filter_map(|key| {
                let key = key.as_ref();
                reader.var(key).ok().map(|value| (key.to_string(), value))
            })
            .collect()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of this source with every empty-string value removed.
    pub fn normalized(&self) -> Self {
        self.vars
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl ReadEnv for RuntimeSource {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        self.vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RuntimeSource {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for RuntimeSource {
    fn from(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }
}
