//! Built-in filter catalog
//!
//! String filters transform text values and every text item of a list;
//! other values pass through unchanged.
//!
//! | Class                | Effect                                         |
//! |----------------------|------------------------------------------------|
//! | `Trim`               | strip surrounding whitespace                   |
//! | `UpperCase`          | trim, then upper-case                          |
//! | `LowerCase`          | trim, then lower-case                          |
//! | `EmptyToNull`        | empty values become `null`                     |
//! | `HtmlChars`          | escape `& < > " '`                             |
//! | `SpecialcharsDecode` | decode the entities `HtmlChars` produces       |
//! | `Sanitize`           | drop `script`, `iframe`, `style`, `embed`, `applet` elements |

mod callback;
mod html;
mod text;

pub use callback::FnFilter;
pub use html::{HtmlChars, Sanitize, SpecialcharsDecode};
pub use text::{EmptyToNull, LowerCase, Trim, UpperCase};

use crate::{Filter, Result};
use serde_json::Value;

fn boxed<F: Filter + 'static>(filter: F) -> Result<Box<dyn Filter>> {
    Ok(Box::new(filter))
}

pub(crate) fn register_builtin(registry: &mut crate::Registry) {
    registry
        .register_filter("Trim", |params| boxed(Trim::new(params)))
        .register_filter("UpperCase", |params| boxed(UpperCase::new(params)))
        .register_filter("LowerCase", |params| boxed(LowerCase::new(params)))
        .register_filter("EmptyToNull", |params| boxed(EmptyToNull::new(params)))
        .register_filter("HtmlChars", |params| boxed(HtmlChars::new(params)))
        .register_filter("SpecialcharsDecode", |params| {
            boxed(SpecialcharsDecode::new(params))
        })
        .register_filter("Sanitize", |params| boxed(Sanitize::new(params)?));
}

/// Apply `f` to a text value or to each text item of a list
fn map_text(value: Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(text) => Value::String(f(&text)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(text) => Value::String(f(&text)),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}
