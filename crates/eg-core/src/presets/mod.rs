//! Hosting platform presets.
//!
//! A preset is an ordinary composition: every variable the platform defines
//! is declared `shared`, string-typed and optional, validated in server
//! context. The resulting [`Env`] is meant to be passed to
//! [`EnvOptions::extend`](crate::EnvOptions::extend).
//!
//! ```ignore
//! let env = EnvOptions::new()
//!     .server(server_schema)
//!     .extend(presets::vercel()?)
//!     .create()?;
//! ```

mod platforms;

use crate::access::Env;
use crate::composer::EnvOptions;
use eg_common::Result;
use eg_config::{FieldDescriptor, ReadEnv, RuntimeSource, Schema, SystemEnv};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from preset lookup.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("unknown preset '{name}' (available: {available})")]
    Unknown { name: String, available: String },
}

/// Known hosting platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetName {
    Vercel,
    NeonVercel,
    SupabaseVercel,
    Render,
    Railway,
    FlyIo,
    Netlify,
    UpstashRedis,
    Uploadthing,
    Coolify,
}

impl PresetName {
    pub const ALL: [PresetName; 10] = [
        PresetName::Vercel,
        PresetName::NeonVercel,
        PresetName::SupabaseVercel,
        PresetName::Render,
        PresetName::Railway,
        PresetName::FlyIo,
        PresetName::Netlify,
        PresetName::UpstashRedis,
        PresetName::Uploadthing,
        PresetName::Coolify,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PresetName::Vercel => "vercel",
            PresetName::NeonVercel => "neon-vercel",
            PresetName::SupabaseVercel => "supabase-vercel",
            PresetName::Render => "render",
            PresetName::Railway => "railway",
            PresetName::FlyIo => "fly-io",
            PresetName::Netlify => "netlify",
            PresetName::UpstashRedis => "upstash-redis",
            PresetName::Uploadthing => "uploadthing",
            PresetName::Coolify => "coolify",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PresetName::Vercel => "Vercel system environment variables",
            PresetName::NeonVercel => "Neon Postgres via the Vercel integration",
            PresetName::SupabaseVercel => "Supabase via the Vercel integration",
            PresetName::Render => "Render default environment variables",
            PresetName::Railway => "Railway-provided variables",
            PresetName::FlyIo => "Fly.io runtime environment",
            PresetName::Netlify => "Netlify build environment variables",
            PresetName::UpstashRedis => "Upstash Redis REST credentials",
            PresetName::Uploadthing => "Uploadthing API token",
            PresetName::Coolify => "Coolify predefined variables",
        }
    }

    pub fn variables(self) -> &'static [&'static str] {
        match self {
            PresetName::Vercel => platforms::VERCEL,
            PresetName::NeonVercel => platforms::NEON_VERCEL,
            PresetName::SupabaseVercel => platforms::SUPABASE_VERCEL,
            PresetName::Render => platforms::RENDER,
            PresetName::Railway => platforms::RAILWAY,
            PresetName::FlyIo => platforms::FLY_IO,
            PresetName::Netlify => platforms::NETLIFY,
            PresetName::UpstashRedis => platforms::UPSTASH_REDIS,
            PresetName::Uploadthing => platforms::UPLOADTHING,
            PresetName::Coolify => platforms::COOLIFY,
        }
    }

    /// Declared schema: every variable `string, optional`, all shared.
    pub fn schema(self) -> Schema {
        self.variables()
            .iter()
            .map(|name| (*name, FieldDescriptor::string().optional()))
            .collect()
    }

    /// Build from the process environment.
    pub fn build(self) -> Result<Env> {
        self.build_from_reader(&SystemEnv)
    }

    /// Build from any reader, picking only this preset's variables.
    pub fn build_from_reader<R: ReadEnv + ?Sized>(self, reader: &R) -> Result<Env> {
        self.build_from(RuntimeSource::pick(reader, self.variables()))
    }

    pub fn build_from(self, source: RuntimeSource) -> Result<Env> {
        EnvOptions::new()
            .shared(self.schema())
            .runtime_env(source)
            .is_server(true)
            .create()
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetName {
    type Err = PresetError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        PresetName::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| PresetError::Unknown {
                name: s.to_string(),
                available: PresetName::ALL.map(PresetName::as_str).join(", "),
            })
    }
}

/// Summary of one preset.
#[derive(Debug, Clone, Serialize)]
pub struct PresetInfo {
    pub name: PresetName,
    pub description: &'static str,
    pub variables: &'static [&'static str],
}

impl From<PresetName> for PresetInfo {
    fn from(name: PresetName) -> Self {
        Self {
            name,
            description: name.description(),
            variables: name.variables(),
        }
    }
}

pub fn list_presets() -> Vec<PresetInfo> {
    PresetName::ALL.into_iter().map(PresetInfo::from).collect()
}

pub fn get_preset(name: &str) -> std::result::Result<PresetName, PresetError> {
    name.parse()
}

pub fn vercel() -> Result<Env> {
    PresetName::Vercel.build()
}

pub fn neon_vercel() -> Result<Env> {
    PresetName::NeonVercel.build()
}

pub fn supabase_vercel() -> Result<Env> {
    PresetName::SupabaseVercel.build()
}

pub fn render() -> Result<Env> {
    PresetName::Render.build()
}

pub fn railway() -> Result<Env> {
    PresetName::Railway.build()
}

pub fn fly_io() -> Result<Env> {
    PresetName::FlyIo.build()
}

pub fn netlify() -> Result<Env> {
    PresetName::Netlify.build()
}

pub fn upstash_redis() -> Result<Env> {
    PresetName::UpstashRedis.build()
}

pub fn uploadthing() -> Result<Env> {
    PresetName::Uploadthing.build()
}

pub fn coolify() -> Result<Env> {
    PresetName::Coolify.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ExecutionContext;
    use eg_common::EnvValue;

    #[test]
    fn every_preset_listed_once() {
        let presets = list_presets();
        assert_eq!(presets.len(), PresetName::ALL.len());
        for info in &presets {
            assert!(!info.variables.is_empty(), "{} has no variables", info.name);
        }
    }

    #[test]
    fn names_roundtrip_through_parse() {
        for preset in PresetName::ALL {
            assert_eq!(get_preset(preset.as_str()).unwrap(), preset);
        }
        assert_eq!(get_preset("FLY_IO").unwrap(), PresetName::FlyIo);
    }

    #[test]
    fn unknown_preset_lists_available() {
        let err = get_preset("heroku").unwrap_err();
        assert!(err.to_string().contains("vercel"));
    }

    #[test]
    fn presets_build_with_nothing_set() {
        for preset in PresetName::ALL {
            let env = preset.build_from(RuntimeSource::new()).unwrap();
            assert!(env.is_empty());
            assert_eq!(env.context(), Some(ExecutionContext::Server));
        }
    }

    #[test]
    fn preset_keeps_only_its_variables() {
        let backing = RuntimeSource::new()
            .with("VERCEL_URL", "my-app.vercel.app")
            .with("VERCEL_ENV", "")
            .with("DATABASE_URL", "postgres://secret");
        let env = PresetName::Vercel.build_from_reader(&backing).unwrap();
        assert_eq!(
            env.get("VERCEL_URL").unwrap(),
            Some(EnvValue::from("my-app.vercel.app"))
        );
        // empty values normalize to absent
        assert_eq!(env.get("VERCEL_ENV").unwrap(), None);
        assert_eq!(env.names().collect::<Vec<_>>(), vec!["VERCEL_URL"]);
    }

    #[test]
    fn preset_variables_are_shared_within_the_preset() {
        let env = PresetName::UpstashRedis
            .build_from(RuntimeSource::new().with("UPSTASH_REDIS_REST_TOKEN", "tok"))
            .unwrap();
        assert!(!env.is_server_only("UPSTASH_REDIS_REST_TOKEN"));
    }
}
