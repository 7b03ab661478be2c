use super::check_text;
use crate::params::PATTERN_PARAM;
use crate::{Error, Params, Result, Rule, RuleMeta};
use regex::Regex;
use serde_json::Value;

/// Matches the value against the `exp` pattern.
///
/// Patterns may be written bare (`^[0-9]+$`) or delimited with trailing
/// flags (`/^[a-z]+$/i`). Supported flags: `i`, `m`, `s`, `x`, `U`; `u` is
/// accepted and ignored since matching is always Unicode-aware.
#[derive(Debug, Clone)]
pub struct Regexp {
    meta: RuleMeta,
    regex: Regex,
}

impl Regexp {
    pub const NAME: &'static str = "Regexp";
    pub const DEFAULT_ERROR: &'static str = "REGEXP_NOT_VALID_ERROR";

    pub fn new(params: Params) -> Result<Self> {
        let exp = params
            .get_str(PATTERN_PARAM)
            .ok_or_else(|| Error::invalid_param(Self::NAME, PATTERN_PARAM, "pattern is required"))?;
        let regex = compile(exp)
            .map_err(|reason| Error::invalid_param(Self::NAME, PATTERN_PARAM, reason))?;

        Ok(Self {
            meta: RuleMeta::new(params, Self::DEFAULT_ERROR),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Rule for Regexp {
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
        check_text(value, |text| self.regex.is_match(text))
    }
}

/// Delimiters recognized around a pattern
const DELIMITERS: &[char] = &['/', '#', '~', '%', '@', '!', ';', '+', '{', '<'];

fn closing_delimiter(open: char) -> char {
    match open {
        '{' => '}',
        '<' => '>',
        other => other,
    }
}

/// Compile a bare or delimited pattern
fn compile(exp: &str) -> std::result::Result<Regex, String> {
    let Some(open) = exp.chars().next() else {
        return Err("pattern is empty".to_string());
    };

    if !DELIMITERS.contains(&open) {
        return Regex::new(exp).map_err(|e| e.to_string());
    }

    let close = closing_delimiter(open);
    let body_start = open.len_utf8();
    let end = exp[body_start..]
        .rfind(close)
        .map(|offset| body_start + offset)
        .ok_or_else(|| format!("missing closing delimiter '{}'", close))?;

    let body = &exp[body_start..end];
    let mut inline = String::new();
    for flag in exp[end + close.len_utf8()..].chars() {
        match flag {
            'i' | 'm' | 's' | 'x' | 'U' => inline.push(flag),
            'u' => {}
            other => return Err(format!("unsupported pattern flag '{}'", other)),
        }
    }

    let pattern = if inline.is_empty() {
        body.to_string()
    } else {
        format!("(?{}){}", inline, body)
    };

    Regex::new(&pattern).map_err(|e| e.to_string())
}
