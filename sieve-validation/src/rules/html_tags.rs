use super::check_text;
use crate::{Params, Rule, RuleMeta, html};
use serde_json::Value;

/// Passes when the value contains no HTML tags other than the allowed `tags`
#[derive(Debug, Clone)]
pub struct HtmlTags {
    meta: RuleMeta,
    allowed: Vec<String>,
}

impl HtmlTags {
    pub const NAME: &'static str = "HtmlTags";
    pub const DEFAULT_ERROR: &'static str = "TEXT_NOT_VALID_ERROR";

    pub fn new(params: Params) -> Self {
        let allowed = params
            .get("tags")
            .map(|tags| html::tag_names(tags.as_list()))
            .unwrap_or_default();

        Self {
            meta: RuleMeta::new(params, Self::DEFAULT_ERROR),
            allowed,
        }
    }
}

impl Rule for HtmlTags {
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
        check_text(value, |text| html::strip_tags(text, &self.allowed) == text)
    }
}
