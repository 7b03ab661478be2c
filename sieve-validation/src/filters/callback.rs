use crate::{Filter, Params};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Filter backed by a closure
#[derive(Clone)]
pub struct FnFilter {
    name: String,
    params: Params,
    transform: Transform,
}

impl FnFilter {
    pub fn new<F>(name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: Params::new(),
            transform: Arc::new(transform),
        }
    }
}

impl fmt::Debug for FnFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFilter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Filter for FnFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn filter_value(&self, value: Value) -> Value {
        (self.transform)(value)
    }
}
