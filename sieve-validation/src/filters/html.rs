use super::map_text;
use crate::{Error, Filter, Params, Result, html};
use regex::Regex;
use serde_json::Value;

/// Escapes HTML special characters
#[derive(Debug, Clone, Default)]
pub struct HtmlChars {
    params: Params,
}

impl HtmlChars {
    pub fn new(params: Params) -> Self {
        Self { params }
    }
}

impl Filter for HtmlChars {
    fn name(&self) -> &str {
        "HtmlChars"
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn filter_value(&self, value: Value) -> Value {
        map_text(value, html::escape)
    }
}

/// Decodes the entities produced by [`HtmlChars`]
#[derive(Debug, Clone, Default)]
pub struct SpecialcharsDecode {
    params: Params,
}

impl SpecialcharsDecode {
    pub fn new(params: Params) -> Self {
        Self { params }
    }
}

impl Filter for SpecialcharsDecode {
    fn name(&self) -> &str {
        "SpecialcharsDecode"
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn filter_value(&self, value: Value) -> Value {
        map_text(value, html::decode)
    }
}

/// Removes dangerous elements together with their content.
///
/// The element list comes from the `tags` parameter, or from bare flag
/// parameters (`sanitize:script|object`). Without parameters it removes
/// `script`, `iframe`, `style`, `embed` and `applet`.
#[derive(Debug, Clone)]
pub struct Sanitize {
    params: Params,
    tags: Vec<String>,
    patterns: Vec<Regex>,
}

impl Sanitize {
    pub const DEFAULT_TAGS: [&'static str; 5] = ["script", "iframe", "style", "embed", "applet"];

    pub fn new(params: Params) -> Result<Self> {
        let tags = if let Some(tags) = params.get("tags") {
            html::tag_names(tags.as_list())
        } else if params.is_empty() {
            html::tag_names(Self::DEFAULT_TAGS)
        } else {
            html::tag_names(params.iter().map(|(name, _)| name))
        };

        let patterns = html::element_patterns(&tags)
            .map_err(|e| Error::invalid_param("Sanitize", "tags", e.to_string()))?;

        Ok(Self {
            params,
            tags,
            patterns,
        })
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Filter for Sanitize {
    fn name(&self) -> &str {
        "Sanitize"
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn filter_value(&self, value: Value) -> Value {
        map_text(value, |text| html::remove_elements(text, &self.patterns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_html_chars() {
        let filter = HtmlChars::default();
        assert_eq!(
            filter.filter_value(json!("<b>\"hi\"</b>")),
            json!("&lt;b&gt;&quot;hi&quot;&lt;/b&gt;")
        );
        assert_eq!(filter.filter_value(json!(["<", 3])), json!(["&lt;", 3]));
    }

    #[test]
    fn test_specialchars_decode() {
        let filter = SpecialcharsDecode::default();
        assert_eq!(filter.filter_value(json!("&lt;p&gt; &amp; &#039;")), json!("<p> & '"));
    }

    #[test]
    fn test_sanitize_defaults() {
        let filter = Sanitize::new(Params::new()).unwrap();
        assert_eq!(filter.tags().len(), 5);
        assert_eq!(
            filter.filter_value(json!("<p>Hello</p><script>alert('XSS')</script>")),
            json!("<p>Hello</p>")
        );
    }

    #[test]
    fn test_sanitize_custom_tags() {
        let filter = Sanitize::new(Params::new().with("tags", vec!["b", "i"])).unwrap();
        assert_eq!(filter.filter_value(json!("a<b>x</b><i>y</i>c")), json!("ac"));

        let filter = Sanitize::new(Params::new().with("object", true)).unwrap();
        assert_eq!(filter.tags(), ["object".to_string()]);
        assert_eq!(filter.filter_value(json!("<object data=x></object>ok")), json!("ok"));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let filter = Sanitize::new(Params::new()).unwrap();
        let once = filter.filter_value(json!("<style>p{}</style>text<embed src=x>"));
        assert_eq!(once, json!("text"));
        assert_eq!(filter.filter_value(once.clone()), once);
    }
}
