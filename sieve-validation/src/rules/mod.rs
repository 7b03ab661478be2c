//! Built-in rule catalog
//!
//! | Class      | Kind      | Parameters          | Default error             |
//! |------------|-----------|---------------------|---------------------------|
//! | `Regexp`   | predicate | `exp`               | `REGEXP_NOT_VALID_ERROR`  |
//! | `Ip`       | format    | `v4`, `v6`          | `IP_NOT_VALID_ERROR`      |
//! | `HtmlTags` | predicate | `tags`              | `TEXT_NOT_VALID_ERROR`    |
//! | `Exists`   | predicate | `model`, `field`    | `VALUE_NOT_EXIST_ERROR`   |
//! | `Email`    | format    |                     | `EMAIL_NOT_VALID_ERROR`   |
//! | `Url`      | format    |                     | `URL_NOT_VALID_ERROR`     |
//! | `Integer`  | format    |                     | `INT_NOT_VALID_ERROR`     |
//! | `Number`   | format    |                     | `NUMBER_NOT_VALID_ERROR`  |
//! | `Boolean`  | format    |                     | `BOOLEAN_NOT_VALID_ERROR` |
//! | `Text`     | predicate | `min`, `max`        | `TEXT_NOT_VALID_ERROR`    |
//! | `Required` | predicate |                     | `FIELD_REQUIRED_ERROR`    |
//!
//! Every rule also accepts the `required` flag.

mod callback;
mod exists;
mod formats;
mod html_tags;
mod regexp;
mod text;

pub use callback::CallbackRule;
pub use exists::{Exists, MemoryStore, RecordStore};
pub use formats::FormatRule;
pub use html_tags::HtmlTags;
pub use regexp::Regexp;
pub use text::{Required, Text};

use crate::{Error, Params, Result, Rule};
use serde_json::Value;

fn boxed<R: Rule + 'static>(rule: R) -> Result<Box<dyn Rule>> {
    Ok(Box::new(rule))
}

pub(crate) fn register_builtin(registry: &mut crate::Registry) {
    registry
        .register_rule("Regexp", |_, params| boxed(Regexp::new(params)?))
        .register_rule("Ip", |_, params| boxed(FormatRule::ip(params)))
        .register_rule("HtmlTags", |_, params| boxed(HtmlTags::new(params)))
        .register_rule("Exists", |registry, params| {
            boxed(Exists::from_registry(registry, params)?)
        })
        .register_rule("Email", |_, params| boxed(FormatRule::email(params)))
        .register_rule("Url", |_, params| boxed(FormatRule::url(params)))
        .register_rule("Integer", |_, params| boxed(FormatRule::integer(params)))
        .register_rule("Number", |_, params| boxed(FormatRule::number(params)))
        .register_rule("Boolean", |_, params| boxed(FormatRule::boolean(params)))
        .register_rule("Text", |_, params| boxed(Text::new(params)?))
        .register_rule("Required", |_, params| boxed(Required::new(params)));
}

/// Read an optional non-negative integer parameter
fn usize_param(rule: &str, params: &Params, key: &str) -> Result<Option<usize>> {
    match params.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .and_then(|text| text.trim().parse::<usize>().ok())
            .map(Some)
            .ok_or_else(|| Error::invalid_param(rule, key, "expected a non-negative integer")),
    }
}

/// Text form of a scalar value, `None` for null, lists and objects
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Apply a text check to a scalar, or to every item of a non-empty list
fn check_text(value: &Value, check: impl Fn(&str) -> bool) -> bool {
    match value {
        Value::Array(items) => {
            !items.is_empty()
                && items
                    .iter()
                    .all(|item| scalar_text(item).is_some_and(|text| check(&text)))
        }
        other => scalar_text(other).is_some_and(|text| check(&text)),
    }
}
