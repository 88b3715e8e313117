//! Composition entry point.
//!
//! [`EnvOptions`] collects the declarations; [`EnvOptions::create`] runs one
//! pass:
//!
//! 1. Check the public-prefix contract of the server and client schemas.
//! 2. With `skip_validation`, return the raw source as an unprotected [`Env`].
//! 3. Drop empty-string values from the source.
//! 4. Resolve the execution context.
//! 5. Validate the source against the context's merged schema.
//! 6. On failure, hand the report to the validation-error hook.
//! 7. On success, lay the extension results over the parsed values.
//! 8. Wrap the result in the access policy.

use crate::access::{AccessPolicy, Env};
use crate::context::{ContextResolver, ExecutionContext, TargetContext};
use crate::hooks::{
    default_invalid_access_hook, default_validation_error_hook, InvalidAccessHook,
    ValidationErrorHook,
};
use crate::merge::{fold_extensions, DeclaredSchemas};
use crate::prefix::{check_contract, PublicPrefix};
use eg_common::{EnvMap, EnvValue, Result, SchemaSlot, ValidationReport};
use eg_config::{RuntimeSource, Schema, SchemaDeclaration};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Declarations and options for one composition.
pub struct EnvOptions {
    server: Schema,
    client: Schema,
    shared: Schema,
    client_prefix: Option<String>,
    extends: Vec<Env>,
    runtime_env: Option<RuntimeSource>,
    is_server: Option<bool>,
    context_resolver: Arc<dyn ContextResolver>,
    skip_validation: bool,
    on_validation_error: ValidationErrorHook,
    on_invalid_access: InvalidAccessHook,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self {
            server: Schema::new(),
            client: Schema::new(),
            shared: Schema::new(),
            client_prefix: None,
            extends: Vec::new(),
            runtime_env: None,
            is_server: None,
            context_resolver: Arc::new(TargetContext),
            skip_validation: false,
            on_validation_error: default_validation_error_hook(),
            on_invalid_access: default_invalid_access_hook(),
        }
    }
}

impl EnvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options pre-filled from a declaration file.
    pub fn from_declaration(declaration: &SchemaDeclaration) -> Result<Self> {
        let mut options = Self::new()
            .server(declaration.schema(SchemaSlot::Server)?)
            .client(declaration.schema(SchemaSlot::Client)?)
            .shared(declaration.schema(SchemaSlot::Shared)?);
        if let Some(prefix) = &declaration.client_prefix {
            options = options.client_prefix(prefix.clone());
        }
        Ok(options)
    }

    pub fn server(mut self, schema: Schema) -> Self {
        self.server = schema;
        self
    }

    pub fn client(mut self, schema: Schema) -> Self {
        self.client = schema;
        self
    }

    pub fn shared(mut self, schema: Schema) -> Self {
        self.shared = schema;
        self
    }

    /// Defaults to [`PublicPrefix::PUBLIC`].
    pub fn client_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.client_prefix = Some(prefix.into());
        self
    }

    /// Append one extension result. Later extensions win on collisions.
    pub fn extend(mut self, extension: Env) -> Self {
        self.extends.push(extension);
        self
    }

    pub fn extends<I: IntoIterator<Item = Env>>(mut self, extensions: I) -> Self {
        self.extends.extend(extensions);
        self
    }

    /// Defaults to a snapshot of the process environment.
    pub fn runtime_env(mut self, source: RuntimeSource) -> Self {
        self.runtime_env = Some(source);
        self
    }

    /// Explicit context; overrides the resolver.
    pub fn is_server(mut self, is_server: bool) -> Self {
        self.is_server = Some(is_server);
        self
    }

    pub fn context_resolver<R: ContextResolver + 'static>(mut self, resolver: R) -> Self {
        self.context_resolver = Arc::new(resolver);
        self
    }

    pub fn skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }

    pub fn on_validation_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ValidationReport) -> Result<EnvMap> + Send + Sync + 'static,
    {
        self.on_validation_error = Arc::new(hook);
        self
    }

    pub fn on_invalid_access<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) -> Result<Option<EnvValue>> + Send + Sync + 'static,
    {
        self.on_invalid_access = Arc::new(hook);
        self
    }

    /// Run the composition.
    ///
    /// With the default validation hook, a failure is
    /// [`EnvError::InvalidEnvironment`](eg_common::EnvError::InvalidEnvironment).
    /// Its message is only "Invalid environment variables"; the per-field
    /// messages are in [`EnvError::report`](eg_common::EnvError::report) and
    /// are also logged at `error` level.
    pub fn create(self) -> Result<Env> {
        let prefix = match &self.client_prefix {
            Some(prefix) => PublicPrefix::new(prefix.clone())?,
            None => PublicPrefix::default(),
        };
        check_contract(&prefix, &self.server, &self.client)?;

        let source = self.runtime_env.unwrap_or_else(RuntimeSource::from_process);

        if self.skip_validation {
            debug!(vars = source.len(), "validation skipped; returning raw source");
            let raw = source
                .iter()
                .map(|(name, value)| (name.to_string(), EnvValue::from(value)))
                .collect();
            return Ok(Env::unprotected(raw));
        }

        let normalized = source.normalized();
        let context = match self.is_server {
            Some(is_server) => ExecutionContext::from_is_server(is_server),
            None => self.context_resolver.resolve(),
        };

        let declared = DeclaredSchemas {
            server: &self.server,
            client: &self.client,
            shared: &self.shared,
        };
        let scope = declared.scope(context);
        debug!(%context, fields = scope.len(), source_vars = normalized.len(), "validating environment");

        let shared: BTreeSet<String> = self.shared.names().map(str::to_string).collect();
        let policy = AccessPolicy::new(context, prefix, shared, self.on_invalid_access);

        match scope.validate(&normalized) {
            Ok(parsed) => {
                let combined = fold_extensions(
                    parsed,
                    self.extends.iter().map(Env::extension_values),
                );
                info!(
                    %context,
                    vars = combined.len(),
                    extensions = self.extends.len(),
                    "environment validated"
                );
                Ok(Env::protected(combined, policy))
            }
            Err(report) => {
                let substitute = (self.on_validation_error)(&report)?;
                warn!(
                    failed_fields = report.len(),
                    "environment invalid; continuing with substitute values"
                );
                Ok(Env::protected(substitute, policy))
            }
        }
    }
}

/// Free-function form of [`EnvOptions::create`].
pub fn create_env(options: EnvOptions) -> Result<Env> {
    options.create()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eg_common::EnvError;
    use eg_config::FieldDescriptor;

    fn source() -> RuntimeSource {
        RuntimeSource::new()
            .with("SECRET", "s3cr3t")
            .with("PUBLIC_X", "visible")
            .with("NODE_ENV", "test")
    }

    fn options() -> EnvOptions {
        EnvOptions::new()
            .server(Schema::new().field("SECRET", FieldDescriptor::string()))
            .client(Schema::new().field("PUBLIC_X", FieldDescriptor::string()))
            .shared(Schema::new().field("NODE_ENV", FieldDescriptor::string()))
            .runtime_env(source())
    }

    #[test]
    fn server_context_validates_everything() {
        let env = options().is_server(true).create().unwrap();
        assert_eq!(env.context(), Some(ExecutionContext::Server));
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn client_context_validates_only_client_scope() {
        // SECRET is absent, but the client scope never looks at it
        let env = options()
            .is_server(false)
            .runtime_env(RuntimeSource::new().with("PUBLIC_X", "v").with("NODE_ENV", "test"))
            .create()
            .unwrap();
        assert_eq!(env.names().collect::<Vec<_>>(), vec!["NODE_ENV", "PUBLIC_X"]);
    }

    #[test]
    fn resolver_used_when_no_explicit_context() {
        let env = options()
            .context_resolver(|| ExecutionContext::Client)
            .create()
            .unwrap();
        assert_eq!(env.context(), Some(ExecutionContext::Client));

        let env = options()
            .context_resolver(|| ExecutionContext::Client)
            .is_server(true)
            .create()
            .unwrap();
        assert_eq!(env.context(), Some(ExecutionContext::Server));
    }

    #[test]
    fn contract_checked_before_validation() {
        let err = EnvOptions::new()
            .client(Schema::new().field("API_URL", FieldDescriptor::string()))
            .runtime_env(RuntimeSource::new())
            .on_validation_error(|_| panic!("validation must not run"))
            .create()
            .unwrap_err();
        assert!(matches!(err, EnvError::SchemaContract { .. }));
    }

    #[test]
    fn default_hook_failure_carries_field_messages() {
        let err = options()
            .runtime_env(RuntimeSource::new().with("PUBLIC_X", "v"))
            .is_server(true)
            .create()
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid environment variables");
        let report = err.report().expect("report attached");
        assert_eq!(report.messages("SECRET"), Some(&["Required".to_string()][..]));
        assert_eq!(report.messages("NODE_ENV"), Some(&["Required".to_string()][..]));
    }

    #[test]
    fn custom_prefix_applies() {
        let env = EnvOptions::new()
            .client_prefix(PublicPrefix::VITE)
            .client(Schema::new().field("VITE_API", FieldDescriptor::string()))
            .runtime_env(RuntimeSource::new().with("VITE_API", "x"))
            .is_server(false)
            .create()
            .unwrap();
        assert!(env.get("VITE_API").unwrap().is_some());

        let err = EnvOptions::new()
            .client_prefix("")
            .runtime_env(RuntimeSource::new())
            .create()
            .unwrap_err();
        assert!(matches!(err, EnvError::InvalidPrefix(_)));
    }

    #[test]
    fn substitute_from_validation_hook_is_policed() {
        let env = options()
            .runtime_env(RuntimeSource::new())
            .is_server(false)
            .on_validation_error(|report| {
                assert!(report.messages("PUBLIC_X").is_some());
                let mut fallback = EnvMap::new();
                fallback.insert("PUBLIC_X".into(), EnvValue::from("fallback"));
                fallback.insert("SECRET".into(), EnvValue::from("fallback-secret"));
                Ok(fallback)
            })
            .create()
            .unwrap();
        assert_eq!(env.get("PUBLIC_X").unwrap(), Some(EnvValue::from("fallback")));
        assert!(env.get("SECRET").is_err());
    }

    #[test]
    fn from_declaration_carries_prefix_and_tables() {
        let declaration = SchemaDeclaration::from_json_str(
            r#"{
                "client_prefix": "NEXT_PUBLIC_",
                "server": { "SECRET": { "type": "string" } },
                "client": { "NEXT_PUBLIC_URL": { "type": "url" } }
            }"#,
        )
        .unwrap();
        let env = EnvOptions::from_declaration(&declaration)
            .unwrap()
            .runtime_env(
                RuntimeSource::new()
                    .with("SECRET", "x")
                    .with("NEXT_PUBLIC_URL", "https://example.com"),
            )
            .is_server(true)
            .create()
            .unwrap();
        assert_eq!(env.len(), 2);
        assert!(env.is_server_only("SECRET"));
        assert!(!env.is_server_only("NEXT_PUBLIC_URL"));
    }
}
