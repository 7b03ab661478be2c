use crate::{Error, Params, Registry, Result, Rule, RuleMeta};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Lookup capability behind the [`Exists`] rule.
///
/// Implementations may block on I/O; the validator calls them synchronously.
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Whether a record with `field == value` exists
    fn exists(&self, field: &str, value: &Value) -> bool;
}

/// In-memory [`RecordStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: IndexMap<String, Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value for a field
    pub fn with_record(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.records.entry(field.into()).or_default().push(value.into());
        self
    }
}

impl RecordStore for MemoryStore {
    fn exists(&self, field: &str, value: &Value) -> bool {
        self.records
            .get(field)
            .is_some_and(|values| values.contains(value))
    }
}

/// Passes when the value exists in the record store named by `model`,
/// looked up by the `field` column
#[derive(Debug, Clone)]
pub struct Exists {
    meta: RuleMeta,
    store: Arc<dyn RecordStore>,
    field: String,
}

impl Exists {
    pub const NAME: &'static str = "Exists";
    pub const DEFAULT_ERROR: &'static str = "VALUE_NOT_EXIST_ERROR";

    pub fn new(store: Arc<dyn RecordStore>, params: Params) -> Result<Self> {
        let field = params
            .get_str("field")
            .ok_or_else(|| Error::invalid_param(Self::NAME, "field", "field name is required"))?
            .to_string();

        Ok(Self {
            meta: RuleMeta::new(params, Self::DEFAULT_ERROR),
            store,
            field,
        })
    }

    /// Resolve the `model` parameter against the registry's stores
    pub fn from_registry(registry: &Registry, params: Params) -> Result<Self> {
        let model = params
            .get_str("model")
            .ok_or_else(|| Error::invalid_param(Self::NAME, "model", "store name is required"))?;
        let store = registry
            .store(model)
            .ok_or_else(|| Error::UnknownStore(model.to_string()))?;

        Self::new(store, params)
    }
}

impl Rule for Exists {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RuleMeta {
        &mut self.meta
    }

    fn validate(&self, value: &Value) -> bool {
        let found = self.store.exists(&self.field, value);
        tracing::trace!("Record lookup {}={} found={}", self.field, value, found);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users() -> Arc<dyn RecordStore> {
        Arc::new(
            MemoryStore::new()
                .with_record("email", "ann@example.com")
                .with_record("id", 7),
        )
    }

    #[test]
    fn test_lookup() {
        let rule = Exists::new(users(), Params::new().with("field", "email")).unwrap();
        assert!(rule.validate(&json!("ann@example.com")));
        assert!(!rule.validate(&json!("bob@example.com")));
        assert_eq!(rule.error(), "VALUE_NOT_EXIST_ERROR");
    }

    #[test]
    fn test_numeric_lookup() {
        let rule = Exists::new(users(), Params::new().with("field", "id")).unwrap();
        assert!(rule.validate(&json!(7)));
        assert!(!rule.validate(&json!(8)));
    }

    #[test]
    fn test_missing_field_param() {
        assert!(Exists::new(users(), Params::new()).is_err());
    }

    #[test]
    fn test_resolves_named_store() {
        let registry = Registry::new().with_store("users", users());
        let params = Params::new().with("model", "users").with("field", "email");
        assert!(Exists::from_registry(&registry, params).is_ok());

        let params = Params::new().with("model", "orders").with("field", "email");
        let err = Exists::from_registry(&registry, params).unwrap_err();
        assert!(matches!(err, Error::UnknownStore(name) if name == "orders"));
    }
}
