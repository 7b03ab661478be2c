//! Property tests for descriptor parsing and the validation passes

use proptest::prelude::*;
use serde_json::{Value, json};
use sieve_validation::{CallbackRule, Data, Descriptor, FnFilter, Validator, descriptor};
use std::collections::BTreeMap;

fn arb_params() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{1,6}", 0..5)
}

fn arb_empty_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("")),
        Just(json!("0")),
        Just(json!(0)),
        Just(json!(false)),
        Just(json!([])),
        Just(json!({})),
        "[ \t]{1,4}".prop_map(Value::String),
    ]
}

fn single(field: &str, value: Value) -> Data {
    let mut data = Data::new();
    data.insert(field.to_string(), value);
    data
}

proptest! {
    #[test]
    fn descriptor_params_survive_parsing(
        name in "[a-z][a-zA-Z]{0,10}",
        params in arb_params(),
    ) {
        let mut text = name.clone();
        if !params.is_empty() {
            let joined: Vec<String> =
                params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            text.push(':');
            text.push_str(&joined.join("|"));
        }

        let parsed = Descriptor::parse(&text).unwrap();
        prop_assert_eq!(parsed.class_name, descriptor::class_name(&name));
        prop_assert_eq!(parsed.params.len(), params.len());
        for (key, value) in &params {
            prop_assert_eq!(parsed.params.get_str(key), Some(value.as_str()));
        }
    }

    #[test]
    fn optional_rules_skip_empty_values(value in arb_empty_value()) {
        let mut validator = Validator::new(single("field", value.clone()));
        validator.add_rule(
            Some("field"),
            Box::new(CallbackRule::new("Never", "NEVER_ERROR", |_| false)),
        );
        prop_assert!(validator.validate(None));

        let mut validator = Validator::new(single("field", value));
        validator.add_rule(
            Some("field"),
            Box::new(CallbackRule::new("Never", "NEVER_ERROR", |_| false).required()),
        );
        prop_assert!(!validator.validate(None));
    }

    #[test]
    fn every_failing_rule_is_reported(failing in 0usize..6, passing in 0usize..6) {
        let mut validator = Validator::new(single("field", json!("value")));
        for _ in 0..passing {
            validator.add_rule(
                Some("field"),
                Box::new(CallbackRule::new("Always", "ALWAYS_ERROR", |_| true)),
            );
        }
        for _ in 0..failing {
            validator.add_rule(
                Some("field"),
                Box::new(CallbackRule::new("Never", "NEVER_ERROR", |_| false)),
            );
        }

        prop_assert_eq!(validator.validate(None), failing == 0);
        prop_assert_eq!(validator.errors_count(), failing);
    }

    #[test]
    fn wildcard_filters_run_before_field_filters(text in "[a-z]{0,12}") {
        let mut validator = Validator::new(single("field", json!(text.clone())));
        let field = FnFilter::new("Field", |v| {
            json!(format!("{}b", v.as_str().unwrap_or_default()))
        });
        let any = FnFilter::new("Any", |v| json!(format!("{}a", v.as_str().unwrap_or_default())));
        validator
            .add_filter(Some("field"), Box::new(field))
            .add_filter(None, Box::new(any));

        validator.apply_filters(None);
        prop_assert_eq!(&validator.data()["field"], &json!(format!("{}ab", text)));
    }
}
