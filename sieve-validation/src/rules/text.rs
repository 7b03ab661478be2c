use super::{check_text, usize_param};
use crate::traits::is_empty_value;
use crate::{Error, Params, Result, Rule, RuleMeta};
use serde_json::Value;

/// Character length bounds on text
#[derive(Debug, Clone)]
pub struct Text {
    meta: RuleMeta,
    min: Option<usize>,
    max: Option<usize>,
}

impl Text {
    pub const NAME: &'static str = "Text";
    pub const DEFAULT_ERROR: &'static str = "TEXT_NOT_VALID_ERROR";

    pub fn new(params: Params) -> Result<Self> {
        let min = usize_param(Self::NAME, &params, "min")?;
        let max = usize_param(Self::NAME, &params, "max")?;
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(Error::invalid_param(Self::NAME, "min", "min is greater than max"));
            }
        }

        Ok(Self {
            meta: RuleMeta::new(params, Self::DEFAULT_ERROR),
            min,
            max,
        })
    }
}

impl Rule for Text {
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
        check_text(value, |text| {
            let length = text.chars().count();
            self.min.is_none_or(|min| length >= min) && self.max.is_none_or(|max| length <= max)
        })
    }
}

/// Rejects empty values. Always evaluated, with or without the `required` flag.
#[derive(Debug, Clone)]
pub struct Required {
    meta: RuleMeta,
}

impl Required {
    pub const NAME: &'static str = "Required";
    pub const DEFAULT_ERROR: &'static str = "FIELD_REQUIRED_ERROR";

    pub fn new(params: Params) -> Self {
        Self {
            meta: RuleMeta::new(params, Self::DEFAULT_ERROR).required(true),
        }
    }
}

impl Rule for Required {
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
        !is_empty_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_length_bounds() {
        let rule = Text::new(Params::new().with("min", "2").with("max", "4")).unwrap();
        assert!(rule.validate(&json!("abc")));
        assert!(!rule.validate(&json!("a")));
        assert!(!rule.validate(&json!("abcde")));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let rule = Text::new(Params::new().with("max", "3")).unwrap();
        assert!(rule.validate(&json!("äöü")));
    }

    #[test]
    fn test_unbounded_text() {
        let rule = Text::new(Params::new()).unwrap();
        assert!(rule.validate(&json!("anything")));
        assert!(!rule.validate(&json!({"nested": true})));
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(Text::new(Params::new().with("min", "two")).is_err());
        assert!(Text::new(Params::new().with("min", true)).is_err());
        assert!(Text::new(Params::new().with("min", "5").with("max", "2")).is_err());
    }

    #[test]
    fn test_required_rule() {
        let rule = Required::new(Params::new());
        assert!(rule.is_required());
        assert!(rule.validate(&json!("x")));
        assert!(!rule.validate(&json!("")));
        assert!(!rule.validate(&json!(null)));
        assert!(!rule.validate(&json!([])));
    }
}
