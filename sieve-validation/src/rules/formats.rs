use crate::{Format, Params, Rule, RuleKind, RuleMeta};
use serde_json::Value;

/// A rule evaluated by one of the built-in [`Format`] checks
#[derive(Debug, Clone)]
pub struct FormatRule {
    name: &'static str,
    format: Format,
    meta: RuleMeta,
}

impl FormatRule {
    pub fn new(name: &'static str, format: Format, params: Params, default_error: &str) -> Self {
        Self {
            name,
            format,
            meta: RuleMeta::new(params, default_error),
        }
    }

    /// IP address. `v4` or `v6` restricts the family.
    pub fn ip(params: Params) -> Self {
        let format = match (params.get_bool("v4"), params.get_bool("v6")) {
            (true, false) => Format::Ipv4,
            (false, true) => Format::Ipv6,
            _ => Format::Ip,
        };
        Self::new("Ip", format, params, "IP_NOT_VALID_ERROR")
    }

    pub fn email(params: Params) -> Self {
        Self::new("Email", Format::Email, params, "EMAIL_NOT_VALID_ERROR")
    }

    pub fn url(params: Params) -> Self {
        Self::new("Url", Format::Url, params, "URL_NOT_VALID_ERROR")
    }

    pub fn integer(params: Params) -> Self {
        Self::new("Integer", Format::Int, params, "INT_NOT_VALID_ERROR")
    }

    pub fn number(params: Params) -> Self {
        Self::new("Number", Format::Float, params, "NUMBER_NOT_VALID_ERROR")
    }

    pub fn boolean(params: Params) -> Self {
        Self::new("Boolean", Format::Boolean, params, "BOOLEAN_NOT_VALID_ERROR")
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

impl Rule for FormatRule {
    fn name(&self) -> &str {
        self.name
    }

    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RuleMeta {
        &mut self.meta
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Format(self.format)
    }

    fn validate(&self, value: &Value) -> bool {
        self.format.check(value)
    }
}
