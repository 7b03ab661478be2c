// HTML text helpers shared by rules and filters

use once_cell::sync::Lazy;
use regex::Regex;

// Tags left open at the end of the text are stripped too
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)<!--.*?-->|<\?.*?\?>|</?([a-zA-Z][a-zA-Z0-9:-]*)[^>]*>",
        r"|<[a-zA-Z/!?][^>]*$",
    ))
    .unwrap()
});

/// Escape HTML special characters (HTML5, both quote styles)
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Decode the entities produced by [`escape`] and their numeric forms
pub(crate) fn decode(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&") // Must be last
}

/// Normalize tag names given as `b`, `<b>` or `<b><i>`
pub(crate) fn tag_names<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    items
        .into_iter()
        .flat_map(|item| item.split(['<', '>']))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

/// Remove every tag and comment except the allowed tags
pub(crate) fn strip_tags(text: &str, allowed: &[String]) -> String {
    TAG_REGEX
        .replace_all(text, |caps: &regex::Captures<'_>| match caps.get(1) {
            Some(name) if allowed.contains(&name.as_str().to_ascii_lowercase()) => {
                caps[0].to_string()
            }
            _ => String::new(),
        })
        .into_owned()
}

/// Patterns removing whole elements (with content) for each tag, then any
/// stray opening or closing tag of the same name
pub(crate) fn element_patterns(tags: &[String]) -> Result<Vec<Regex>, regex::Error> {
    let mut patterns = Vec::with_capacity(tags.len() * 2);
    for tag in tags {
        let tag = regex::escape(tag);
        patterns.push(Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))?);
        patterns.push(Regex::new(&format!(r"(?is)</?{tag}\b[^>]*>"))?);
    }
    Ok(patterns)
}

pub(crate) fn remove_elements(text: &str, patterns: &[Regex]) -> String {
    patterns.iter().fold(text.to_string(), |current, pattern| {
        pattern.replace_all(&current, "").into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &apos;Jerry&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_decode_roundtrip() {
        let original = r#"<div class="test">Hello & "goodbye"</div>"#;
        assert_eq!(decode(&escape(original)), original);
    }

    #[test]
    fn test_decode_does_not_double_decode() {
        assert_eq!(decode("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(tag_names(["<b><I>", " p "]), vec!["b", "i", "p"]);
    }

    #[test]
    fn test_strip_tags() {
        let allowed = tag_names(["b"]);
        assert_eq!(strip_tags("<p>Hi <b>there</b></p>", &allowed), "Hi <b>there</b>");
        assert_eq!(strip_tags("a <!-- note --> b", &[]), "a  b");
        assert_eq!(strip_tags("1 < 2", &[]), "1 < 2");
    }

    #[test]
    fn test_strip_unclosed_tags() {
        let allowed = tag_names(["b"]);
        assert_eq!(strip_tags("hello <script src=x", &[]), "hello ");
        assert_eq!(strip_tags("<b>ok</b> <b class=x", &allowed), "<b>ok</b> ");
        assert_eq!(strip_tags("a <!-- open", &[]), "a ");
    }

    #[test]
    fn test_remove_elements() {
        let patterns = element_patterns(&tag_names(["script", "iframe"])).unwrap();
        let text = r#"<p>ok</p><script type="x">alert(1)</script><iframe src="y">"#;
        assert_eq!(remove_elements(text, &patterns), "<p>ok</p>");
    }
}
