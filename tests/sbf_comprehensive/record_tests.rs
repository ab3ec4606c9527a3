//! Record round-trips through the facade.

use crate::fixtures::{canonical, InnerEnum, TestClass};
use sbf::{deserialize, serialize, Mapper, Serializer, Value, WireTag};
use std::collections::HashMap;

#[test]
fn test_record_round_trip_not_compressed() {
    let instance = TestClass::initialize();
    let before = canonical(&instance);

    let bytes = serialize(&instance, false).unwrap();
    let decoded: TestClass = deserialize(&bytes).unwrap();

    assert_eq!(canonical(&decoded), before);
}

#[test]
fn test_record_round_trip_compressed() {
    let instance = TestClass::initialize();
    let before = canonical(&instance);

    let bytes = serialize(&instance, true).unwrap();
    assert_eq!(bytes[5], 1);
    let decoded: TestClass = deserialize(&bytes).unwrap();

    assert_eq!(canonical(&decoded), before);
    assert_eq!(decoded, instance);
}

#[test]
fn test_record_decodes_as_generic_container() {
    let bytes = serialize(&TestClass::initialize(), false).unwrap();
    let root = sbf::deserialize_raw(&bytes).unwrap();
    let map = root.as_map().unwrap();

    assert!(map.is_container());
    assert_eq!(map.get_str("FunnyByte"), Some(&Value::Byte(0x69)));
    assert_eq!(map.get_str("FunnyNumber"), Some(&Value::Int(69420)));

    let strings = map.get_str("StringArray").unwrap().as_array().unwrap();
    assert_eq!(strings.element_tag(), WireTag::String);

    let inner = map.get_str("Inner").unwrap().as_map().unwrap();
    assert_eq!(inner.get_str("Whatever2"), Some(&Value::from("\"Whatever2\"")));

    let private = map.get_str("Private").unwrap().as_map().unwrap();
    assert!(private.get_str("CurrentTime").is_some());
    assert!(private.get_str("TimeSpan").is_some());
}

#[test]
fn test_collections_of_records() {
    let mut by_name = HashMap::new();
    by_name.insert("first".to_string(), TestClass::initialize());
    by_name.insert("second".to_string(), TestClass::default());

    let bytes = serialize(&by_name, true).unwrap();
    let decoded: HashMap<String, TestClass> = deserialize(&bytes).unwrap();
    assert_eq!(decoded, by_name);

    let list = vec![TestClass::default(), TestClass::initialize()];
    let bytes = serialize(&list, false).unwrap();
    let decoded: Vec<TestClass> = deserialize(&bytes).unwrap();
    assert_eq!(decoded, list);
}

#[test]
fn test_default_record_round_trip() {
    let bytes = serialize(&TestClass::default(), false).unwrap();
    let decoded: TestClass = deserialize(&bytes).unwrap();
    assert_eq!(decoded, TestClass::default());
    assert_eq!(*decoded.inner.whatever3, InnerEnum::Whatever1);
}

#[test]
fn test_record_into_any_target() {
    let bytes = serialize(&TestClass::initialize(), false).unwrap();
    let as_value: Value = deserialize(&bytes).unwrap();
    assert_eq!(as_value, sbf::deserialize_raw(&bytes).unwrap());
}

#[test]
fn test_serializer_is_shareable_across_threads() {
    let serializer = Serializer::default().with_mapper(Mapper::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let serializer = serializer.clone();
            std::thread::spawn(move || {
                let mut instance = TestClass::initialize();
                instance.funny_number = i;
                let bytes = serializer.serialize(&instance, i % 2 == 0).unwrap();
                serializer.deserialize::<TestClass>(&bytes).unwrap().funny_number
            })
        })
        .collect();

    let mut results: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    results.sort();
    assert_eq!(results, vec![0, 1, 2, 3]);
}
