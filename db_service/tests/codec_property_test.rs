//! Round-trip properties of the storage codec.

use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use serde_json::{Number, Value};

use db_service::codec::{decode_map, decode_value, encode_map, encode_value};
use shared_lib::webhook_structs::FieldMap;

fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

/// Number literals that do not fit any machine type: wide integers, long
/// fractions and exponents beyond the f64 range. The parser spells exponents
/// as `e+N`/`e-N`, so comparisons go through `Value::to_string`.
fn wide_number() -> impl Strategy<Value = Value> {
    "-?[1-9][0-9]{20,40}(\\.[0-9]{1,30})?([eE][+-]?[1-9][0-9]{2,4})?".prop_map(|literal| {
        let number: Number = literal.parse().unwrap();
        Value::Number(number)
    })
}

/// Bodies reach the codec through the JSON parser, which spells exponents as
/// `e+N`; float literals are put in that form before round-tripping.
fn as_parsed(value: Value) -> Value {
    serde_json::from_str(&value.to_string()).unwrap()
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        wide_number(),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("json numbers are finite", |f| f.is_finite())
            .prop_map(|f| as_parsed(Value::from(f))),
        ".*".prop_map(Value::String),
    ];

    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::btree_map(".*", inner, 0..8)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn field_map() -> impl Strategy<Value = FieldMap> {
    prop::collection::btree_map(".*", ".*", 0..16)
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn any_json_value_round_trips(value in json_value()) {
        let encoded = encode_value(&value).unwrap();
        prop_assert_eq!(decode_value(&encoded).unwrap(), value);
    }

    #[test]
    fn encoding_is_stable(value in json_value()) {
        let encoded = encode_value(&value).unwrap();
        let reencoded = encode_value(&decode_value(&encoded).unwrap()).unwrap();
        prop_assert_eq!(encoded, reencoded);
    }

    #[test]
    fn wide_numbers_are_stored_verbatim(value in wide_number()) {
        let encoded = encode_value(&value).unwrap();
        prop_assert_eq!(&encoded, &value.to_string());
        prop_assert_eq!(decode_value(&encoded).unwrap(), value);
    }

    #[test]
    fn any_field_map_round_trips(map in field_map()) {
        let encoded = encode_map(&map).unwrap();
        prop_assert_eq!(decode_map(&encoded).unwrap(), map);
    }
}
