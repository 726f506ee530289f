// tests/property/roundtrip_test.rs

//! Property-based tests for roundtrip operations
//! Tests that encode/decode and driver store/load preserve documents.

use proptest::prelude::*;
use spineljson::core::codec;
use spineljson::core::{ColumnValue, JsonContainer, Value};

/// Any finite number, with integral values weighted in so both encodings are exercised.
fn arb_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<i64>().prop_map(|i| i as f64),
        any::<f64>().prop_filter("finite", |f| f.is_finite()),
    ]
}

pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        arb_number().prop_map(Value::Number),
        any::<String>().prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((any::<String>(), inner), 0..6)
                .prop_map(|fields| fields.into_iter().collect::<Value>()),
        ]
    })
}

pub fn arb_document() -> impl Strategy<Value = JsonContainer> {
    arb_value().prop_map(|v| match v {
        Value::Object(_) | Value::Array(_) => JsonContainer::from_value(v).unwrap(),
        scalar => JsonContainer::from_array(vec![scalar]),
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_encode_decode_roundtrip(value in arb_value()) {
        let text = codec::encode(&value).unwrap();
        let decoded = codec::decode(text.as_bytes()).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn test_number_and_string_roundtrip(n in arb_number(), s in any::<String>()) {
        let value = Value::Array(vec![Value::Number(n), Value::String(s)]);
        let decoded = codec::decode(codec::encode(&value).unwrap().as_bytes()).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn test_text_roundtrip(doc in arb_document()) {
        let text = doc.to_text().unwrap();
        let back = JsonContainer::from_text(&text).unwrap();
        prop_assert_eq!(back, doc);
    }

    #[test]
    fn test_driver_roundtrip(doc in arb_document()) {
        let raw = doc.to_driver_value().unwrap();
        let back = JsonContainer::from_driver_value(raw).unwrap();
        prop_assert_eq!(back.is_top_level_array(), doc.is_top_level_array());
        prop_assert_eq!(back, doc);
    }
}
