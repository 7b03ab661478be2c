//! Class-name registry for rules and filters
//!
//! Maps the capitalized identifier of a descriptor (`Regexp`, `HtmlTags`,
//! `UpperCase`, ...) to a factory building a fresh instance from a
//! [`Params`] bag. Record stores used by the `Exists` rule are registered
//! here by name as well.
//!
//! ```
//! use sieve_validation::{CallbackRule, Registry};
//!
//! let registry = Registry::new().with_rule("Even", |_, params| {
//!     Ok(Box::new(CallbackRule::with_params("Even", "NOT_EVEN_ERROR", params, |value| {
//!         value.as_i64().is_some_and(|n| n % 2 == 0)
//!     })))
//! });
//!
//! assert!(registry.has_rule("Even"));
//! assert!(registry.has_rule("Regexp"));
//! ```

use crate::rules::RecordStore;
use crate::{Error, Filter, Params, Result, Rule};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a rule from its parameters
pub type RuleFactory = Arc<dyn Fn(&Registry, Params) -> Result<Box<dyn Rule>> + Send + Sync>;

/// Builds a filter from its parameters
pub type FilterFactory = Arc<dyn Fn(Params) -> Result<Box<dyn Filter>> + Send + Sync>;

static SHARED: Lazy<Arc<Registry>> = Lazy::new(|| Arc::new(Registry::new()));

#[derive(Clone, Default)]
pub struct Registry {
    rules: HashMap<String, RuleFactory>,
    filters: HashMap<String, FilterFactory>,
    stores: HashMap<String, Arc<dyn RecordStore>>,
}

impl Registry {
    /// Registry holding the built-in rule and filter catalog
    pub fn new() -> Self {
        let mut registry = Self::empty();
        crate::rules::register_builtin(&mut registry);
        crate::filters::register_builtin(&mut registry);
        registry
    }

    /// Registry without any rules, filters or stores
    pub fn empty() -> Self {
        Self::default()
    }

    /// Process-wide registry with the built-in catalog
    pub fn shared() -> Arc<Registry> {
        Arc::clone(&SHARED)
    }

    /// Register a rule factory, replacing any factory with the same name
    pub fn register_rule<F>(&mut self, class_name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&Registry, Params) -> Result<Box<dyn Rule>> + Send + Sync + 'static,
    {
        self.rules.insert(class_name.into(), Arc::new(factory));
        self
    }

    pub fn with_rule<F>(mut self, class_name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Registry, Params) -> Result<Box<dyn Rule>> + Send + Sync + 'static,
    {
        self.register_rule(class_name, factory);
        self
    }

    /// Register a filter factory, replacing any factory with the same name
    pub fn register_filter<F>(&mut self, class_name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(Params) -> Result<Box<dyn Filter>> + Send + Sync + 'static,
    {
        self.filters.insert(class_name.into(), Arc::new(factory));
        self
    }

    pub fn with_filter<F>(mut self, class_name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Params) -> Result<Box<dyn Filter>> + Send + Sync + 'static,
    {
        self.register_filter(class_name, factory);
        self
    }

    /// Register a named record store
    pub fn register_store(
        &mut self,
        name: impl Into<String>,
        store: Arc<dyn RecordStore>,
    ) -> &mut Self {
        self.stores.insert(name.into(), store);
        self
    }

    pub fn with_store(mut self, name: impl Into<String>, store: Arc<dyn RecordStore>) -> Self {
        self.register_store(name, store);
        self
    }

    pub fn store(&self, name: &str) -> Option<Arc<dyn RecordStore>> {
        self.stores.get(name).cloned()
    }

    pub fn has_rule(&self, class_name: &str) -> bool {
        self.rules.contains_key(class_name)
    }

    pub fn has_filter(&self, class_name: &str) -> bool {
        self.filters.contains_key(class_name)
    }

    /// Registered rule names, sorted
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered filter names, sorted
    pub fn filter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build a fresh rule instance
    pub fn create_rule(&self, class_name: &str, params: Params) -> Result<Box<dyn Rule>> {
        let factory = self
            .rules
            .get(class_name)
            .ok_or_else(|| Error::UnknownRule(class_name.to_string()))?;
        factory(self, params)
    }

    /// Build a fresh filter instance
    pub fn create_filter(&self, class_name: &str, params: Params) -> Result<Box<dyn Filter>> {
        let factory = self
            .filters
            .get(class_name)
            .ok_or_else(|| Error::UnknownFilter(class_name.to_string()))?;
        factory(params)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stores: Vec<&str> = self.stores.keys().map(String::as_str).collect();
        stores.sort_unstable();

        f.debug_struct("Registry")
            .field("rules", &self.rule_names())
            .field("filters", &self.filter_names())
            .field("stores", &stores)
            .finish()
    }
}
