use super::map_text;
use crate::traits::is_empty_value;
use crate::{Filter, Params};
use serde_json::Value;

/// Strips surrounding whitespace
#[derive(Debug, Clone, Default)]
pub struct Trim {
    params: Params,
}

impl Trim {
    pub fn new(params: Params) -> Self {
        Self { params }
    }
}

impl Filter for Trim {
    fn name(&self) -> &str {
        "Trim"
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn filter_value(&self, value: Value) -> Value {
        map_text(value, |text| text.trim().to_string())
    }
}

/// Trims, then upper-cases
#[derive(Debug, Clone, Default)]
pub struct UpperCase {
    params: Params,
}

impl UpperCase {
    pub fn new(params: Params) -> Self {
        Self { params }
    }
}

impl Filter for UpperCase {
    fn name(&self) -> &str {
        "UpperCase"
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn filter_value(&self, value: Value) -> Value {
        map_text(value, |text| text.trim().to_uppercase())
    }
}

/// Trims, then lower-cases
#[derive(Debug, Clone, Default)]
pub struct LowerCase {
    params: Params,
}

impl LowerCase {
    pub fn new(params: Params) -> Self {
        Self { params }
    }
}

impl Filter for LowerCase {
    fn name(&self) -> &str {
        "LowerCase"
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn filter_value(&self, value: Value) -> Value {
        map_text(value, |text| text.trim().to_lowercase())
    }
}

/// Replaces empty values (`""`, `[]`, `false`, `0`, ...) with `null`
#[derive(Debug, Clone, Default)]
pub struct EmptyToNull {
    params: Params,
}

impl EmptyToNull {
    pub fn new(params: Params) -> Self {
        Self { params }
    }
}

impl Filter for EmptyToNull {
    fn name(&self) -> &str {
        "EmptyToNull"
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn filter_value(&self, value: Value) -> Value {
        if is_empty_value(&value) {
            Value::Null
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trim() {
        let filter = Trim::default();
        assert_eq!(filter.filter_value(json!("  bob  ")), json!("bob"));
        assert_eq!(filter.filter_value(json!([" a ", 1])), json!(["a", 1]));
        assert_eq!(filter.filter_value(json!(5)), json!(5));
    }

    #[test]
    fn test_case_filters() {
        assert_eq!(UpperCase::default().filter_value(json!(" bob ")), json!("BOB"));
        assert_eq!(LowerCase::default().filter_value(json!("BoB")), json!("bob"));
    }

    #[test]
    fn test_case_filters_are_idempotent() {
        let filter = UpperCase::default();
        let once = filter.filter_value(json!(" MiXed "));
        assert_eq!(filter.filter_value(once.clone()), once);
    }

    #[test]
    fn test_empty_to_null() {
        let filter = EmptyToNull::default();
        assert_eq!(filter.filter_value(json!("")), json!(null));
        assert_eq!(filter.filter_value(json!([])), json!(null));
        assert_eq!(filter.filter_value(json!("0")), json!(null));
        assert_eq!(filter.filter_value(json!("x")), json!("x"));
    }
}
