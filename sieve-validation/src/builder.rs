// Rule and filter builders

use crate::{Descriptor, Filter, Params, Registry, Result, Rule};
use std::sync::Arc;

/// Builds rules from descriptors or class names
///
/// ```
/// use sieve_validation::RuleBuilder;
/// use serde_json::json;
///
/// let builder = RuleBuilder::default();
/// let rule = builder.create_rule("regexp:exp=/^[0-9]+$/", None).unwrap();
/// assert!(rule.validate(&json!("123")));
/// assert!(!rule.validate(&json!("12a")));
/// assert_eq!(rule.error(), "REGEXP_NOT_VALID_ERROR");
/// ```
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    registry: Arc<Registry>,
}

impl RuleBuilder {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Parse a descriptor without building the rule
    pub fn parse_descriptor(&self, descriptor: &str) -> Result<Descriptor> {
        Descriptor::parse(descriptor)
    }

    /// Build a rule from a descriptor, overriding its error code when `error`
    /// is given and non-empty
    pub fn create_rule(&self, descriptor: &str, error: Option<&str>) -> Result<Box<dyn Rule>> {
        let parsed = Descriptor::parse(descriptor).inspect_err(|e| {
            tracing::warn!("Rejected rule descriptor: {}", e);
        })?;

        let mut rule = self.build(&parsed.class_name, parsed.params)?;
        if let Some(code) = error {
            rule.set_error(code);
        }

        Ok(rule)
    }

    /// Build one rule per descriptor, failing on the first invalid one
    pub fn create_rules<I, S>(&self, descriptors: I) -> Result<Vec<Box<dyn Rule>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        descriptors
            .into_iter()
            .map(|descriptor| self.create_rule(descriptor.as_ref(), None))
            .collect()
    }

    /// Build a rule from a class name and parameters
    pub fn build(&self, class_name: &str, params: Params) -> Result<Box<dyn Rule>> {
        self.registry.create_rule(class_name, params)
    }
}

impl Default for RuleBuilder {
    fn default() -> Self {
        Self::new(Registry::shared())
    }
}

/// Builds filters from descriptors or class names
#[derive(Debug, Clone)]
pub struct FilterBuilder {
    registry: Arc<Registry>,
}

impl FilterBuilder {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Build a filter from a descriptor such as `sanitize:tags=script,style`
    pub fn create_filter(&self, descriptor: &str) -> Result<Box<dyn Filter>> {
        let parsed = Descriptor::parse(descriptor).inspect_err(|e| {
            tracing::warn!("Rejected filter descriptor: {}", e);
        })?;

        self.build(&parsed.class_name, parsed.params)
    }

    /// Build a filter from a class name and parameters
    pub fn build(&self, class_name: &str, params: Params) -> Result<Box<dyn Filter>> {
        self.registry.create_filter(class_name, params)
    }
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self::new(Registry::shared())
    }
}
