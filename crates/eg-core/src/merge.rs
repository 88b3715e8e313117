//! Context-dependent schema merging.
//!
//! The validation scope for each context is the ordered union of the
//! declared schemas, with later schemas overriding earlier ones on a name
//! collision.

use crate::context::ExecutionContext;
use eg_common::{EnvMap, SchemaSlot};
use eg_config::Schema;

/// Client scope: client fields, then shared fields.
pub const CLIENT_MERGE_ORDER: [SchemaSlot; 2] = [SchemaSlot::Client, SchemaSlot::Shared];

/// Server scope: every declared field.
pub const SERVER_MERGE_ORDER: [SchemaSlot; 3] =
    [SchemaSlot::Server, SchemaSlot::Shared, SchemaSlot::Client];

/// The three declared schemas of one invocation.
#[derive(Debug, Clone, Copy)]
pub struct DeclaredSchemas<'a> {
    pub server: &'a Schema,
    pub client: &'a Schema,
    pub shared: &'a Schema,
}

impl<'a> DeclaredSchemas<'a> {
    pub fn slot(&self, slot: SchemaSlot) -> &'a Schema {
        match slot {
            SchemaSlot::Server => self.server,
            SchemaSlot::Client => self.client,
            SchemaSlot::Shared => self.shared,
        }
    }

    /// The schema validated in `context`.
    pub fn scope(&self, context: ExecutionContext) -> Schema {
        merge_in_order(self, merge_order(context))
    }
}

pub fn merge_order(context: ExecutionContext) -> &'static [SchemaSlot] {
    match context {
        ExecutionContext::Server => &SERVER_MERGE_ORDER,
        ExecutionContext::Client => &CLIENT_MERGE_ORDER,
    }
}

/// Right-biased merge of the named slots, in the given order.
pub fn merge_in_order(schemas: &DeclaredSchemas<'_>, order: &[SchemaSlot]) -> Schema {
    order
        .iter()
        .fold(Schema::new(), |acc, slot| acc.merge(schemas.slot(*slot)))
}

/// Fold extension results over parsed data.
///
/// Extensions are merged among themselves first (later wins), then laid over
/// `parsed`, so an extension value replaces a schema-parsed value for the
/// same name.
pub fn fold_extensions<'a, I>(parsed: EnvMap, extensions: I) -> EnvMap
where
    I: IntoIterator<Item = &'a EnvMap>,
{
    let mut from_extensions = EnvMap::new();
    for extension in extensions {
        for (name, value) in extension {
            from_extensions.insert(name.clone(), value.clone());
        }
    }

    let mut combined = parsed;
    combined.extend(from_extensions);
    combined
}
