// Built-in format checks

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
    .unwrap()
});

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s/$.?#][^\s]*$").unwrap());

static INT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?(?:0|[1-9][0-9]*)$").unwrap());

static FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap()
});

/// Format checks the validator runs itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// IPv4 or IPv6 address
    Ip,
    Ipv4,
    Ipv6,
    Email,
    /// Absolute URL with a scheme
    Url,
    /// Integer fitting in 64 bits, no leading zeros
    Int,
    Float,
    /// `true/false`, `1/0`, `yes/no`, `on/off`
    Boolean,
}

impl Format {
    /// Check a value. Lists pass when non-empty and every item passes.
    pub fn check(&self, value: &Value) -> bool {
        match value {
            Value::String(text) => self.check_str(text),
            Value::Number(number) => match self {
                Format::Int => number.is_i64() || number.is_u64(),
                Format::Float => true,
                Format::Boolean => matches!(number.as_i64(), Some(0 | 1)),
                _ => false,
            },
            Value::Bool(_) => *self == Format::Boolean,
            Value::Array(items) => !items.is_empty() && items.iter().all(|item| self.check(item)),
            Value::Null | Value::Object(_) => false,
        }
    }

    /// Check a textual value
    pub fn check_str(&self, text: &str) -> bool {
        match self {
            Format::Ip => text.parse::<IpAddr>().is_ok(),
            Format::Ipv4 => text.parse::<Ipv4Addr>().is_ok(),
            Format::Ipv6 => text.parse::<Ipv6Addr>().is_ok(),
            Format::Email => EMAIL_REGEX.is_match(text),
            Format::Url => URL_REGEX.is_match(text),
            Format::Int => INT_REGEX.is_match(text) && text.parse::<i64>().is_ok(),
            Format::Float => FLOAT_REGEX.is_match(text),
            Format::Boolean => matches!(
                text.to_ascii_lowercase().as_str(),
                "1" | "0" | "true" | "false" | "yes" | "no" | "on" | "off"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ip_formats() {
        assert!(Format::Ip.check_str("192.168.0.1"));
        assert!(Format::Ip.check_str("::1"));
        assert!(!Format::Ip.check_str("256.1.1.1"));
        assert!(!Format::Ip.check_str("localhost"));

        assert!(Format::Ipv4.check_str("10.0.0.1"));
        assert!(!Format::Ipv4.check_str("fe80::1"));
        assert!(Format::Ipv6.check_str("fe80::1"));
        assert!(!Format::Ipv6.check_str("10.0.0.1"));
    }

    #[test]
    fn test_email_variations() {
        assert!(Format::Email.check_str("user+tag@example.com"));
        assert!(Format::Email.check_str("user.name@example.co.uk"));
        assert!(!Format::Email.check_str("@example.com"));
        assert!(!Format::Email.check_str("user@"));
    }

    #[test]
    fn test_url_variations() {
        assert!(Format::Url.check_str("https://example.com"));
        assert!(Format::Url.check_str("ftp://files.example.com/a.txt"));
        assert!(!Format::Url.check_str("//example.com"));
        assert!(!Format::Url.check_str("not a url"));
    }

    #[test]
    fn test_int() {
        assert!(Format::Int.check_str("42"));
        assert!(Format::Int.check_str("-7"));
        assert!(Format::Int.check_str("0"));
        assert!(!Format::Int.check_str("007"));
        assert!(!Format::Int.check_str("1.5"));
        assert!(!Format::Int.check_str("99999999999999999999"));
        assert!(Format::Int.check(&json!(12)));
        assert!(!Format::Int.check(&json!(1.5)));
    }

    #[test]
    fn test_float() {
        assert!(Format::Float.check_str("1.5"));
        assert!(Format::Float.check_str("-.5"));
        assert!(Format::Float.check_str("2e10"));
        assert!(!Format::Float.check_str("1.2.3"));
        assert!(!Format::Float.check_str("inf"));
        assert!(Format::Float.check(&json!(3)));
    }

    #[test]
    fn test_boolean() {
        assert!(Format::Boolean.check_str("Yes"));
        assert!(Format::Boolean.check_str("off"));
        assert!(!Format::Boolean.check_str("maybe"));
        assert!(Format::Boolean.check(&json!(false)));
        assert!(Format::Boolean.check(&json!(1)));
        assert!(!Format::Boolean.check(&json!(2)));
    }

    #[test]
    fn test_lists_are_checked_per_item() {
        assert!(Format::Ipv4.check(&json!(["10.0.0.1", "10.0.0.2"])));
        assert!(!Format::Ipv4.check(&json!(["10.0.0.1", "nope"])));
        assert!(!Format::Ipv4.check(&json!([])));
    }

    #[test]
    fn test_null_and_objects_fail() {
        assert!(!Format::Email.check(&json!(null)));
        assert!(!Format::Email.check(&json!({"a": "b"})));
    }
}
