// tests/property/navigator_test.rs

//! Property-based tests for path resolution invariants:
//! read-after-write, index bounds, garbage index rejection and create-mode building.

use proptest::prelude::*;
use spineljson::core::path::Path;
use spineljson::core::{JsonContainer, SpinelJsonError, TypeTag, Value};

use super::roundtrip_test::arb_value;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_read_after_write(key in "[a-z]{1,8}", old in arb_value(), new in arb_value()) {
        let mut doc = JsonContainer::empty_object();
        doc.set(&key, old).unwrap();
        doc.set(&key, new.clone()).unwrap();
        let (value, tag) = doc.get(&key).unwrap();
        prop_assert_eq!(value, &new);
        prop_assert_eq!(tag, TypeTag::of(&new));
    }

    #[test]
    fn test_index_bounds_and_append(
        items in prop::collection::vec(arb_value(), 0..10),
        extra in arb_value(),
    ) {
        let len = items.len();
        let mut doc = JsonContainer::empty_object();
        doc.set("arr", Value::Array(items)).unwrap();

        let at_len = format!("arr.[{len}]");
        let is_out_of_range =
            |e: &SpinelJsonError| matches!(e, SpinelJsonError::IndexOutOfRange { .. });
        prop_assert!(is_out_of_range(&doc.get(&at_len).unwrap_err()));
        prop_assert!(is_out_of_range(&doc.set(&at_len, Value::Null).unwrap_err()));

        doc.set("arr.[]", extra.clone()).unwrap();
        prop_assert_eq!(doc.get(&at_len).unwrap().0, &extra);
    }

    #[test]
    fn test_garbage_indices_never_parse(garbage in "-[0-9]{1,5}|[a-z]{1,5}|[0-9]{1,3}[a-z]{1,3}") {
        let text = format!("arr.[{garbage}]");
        let is_malformed = |e: SpinelJsonError| matches!(e, SpinelJsonError::MalformedPath { .. });
        prop_assert!(is_malformed(Path::parse(&text).unwrap_err()));

        let mut doc = JsonContainer::from_text(r#"{"arr":[1,2,3]}"#).unwrap();
        prop_assert!(is_malformed(doc.get(&text).unwrap_err()));
        prop_assert!(is_malformed(doc.set(&text, Value::Null).unwrap_err()));
    }

    #[test]
    fn test_create_builds_chain(
        keys in prop::collection::vec("[a-z]{1,6}", 1..6),
        leaf in arb_value(),
    ) {
        let path = format!("root.{}", keys.join("."));
        let mut doc = JsonContainer::from_text(r#"{"root":{}}"#).unwrap();

        if keys.len() > 1 {
            prop_assert!(doc.clone().set(&path, leaf.clone()).is_err());
        }
        doc.set_creating(&path, leaf.clone()).unwrap();
        prop_assert_eq!(doc.get(&path).unwrap().0, &leaf);
    }

    #[test]
    fn test_fresh_containers_are_independent(key in "[a-z]{1,8}", value in arb_value()) {
        let mut first = JsonContainer::empty_object();
        let second = JsonContainer::empty_object();
        first.set(&key, value).unwrap();
        prop_assert!(second.is_empty());
        prop_assert!(!second.contains(&key));
    }
}
