//! Envelope contract through the facade.

use sbf::{
    deserialize_raw, peek_header, read_envelope, serialize_raw, write_envelope, Array, Error, Map,
    Value, WireTag, SBF_FORMAT_VERSION, SBF_MAGIC,
};

fn scenario() -> Value {
    let mut map = Map::container();
    map.insert("a".into(), Value::Byte(255)).unwrap();
    map.insert("b".into(), Value::from(vec![1i32, 2, 3])).unwrap();
    Value::Map(map)
}

#[test]
fn test_concrete_scenario_bytes() {
    let bytes = serialize_raw(&scenario(), false).unwrap();

    #[rustfmt::skip]
    let expected: Vec<u8> = vec![
        b'S', b'B', b'F', 0, 0, 0,      // header
        11, 2, 0, 0, 0, 9, 255,         // Dictionary, 2 entries, String keys, Dynamic values
        1, b'a', 0, 255,                // "a" -> Byte 255
        1, b'b', 10, 3, 0, 0, 0, 4,     // "b" -> Array of 3 Int
        1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0,
    ];
    assert_eq!(bytes, expected);
    assert_eq!(deserialize_raw(&bytes).unwrap(), scenario());
}

#[test]
fn test_header_fields() {
    let bytes = serialize_raw(&scenario(), true).unwrap();
    assert_eq!(&bytes[..3], SBF_MAGIC);

    let header = peek_header(&bytes).unwrap();
    assert_eq!(header.version, SBF_FORMAT_VERSION);
    assert!(header.compressed);
}

#[test]
fn test_header_rejections() {
    let good = serialize_raw(&scenario(), false).unwrap();

    let mut bad = good.clone();
    bad[..3].copy_from_slice(b"ZIP");
    assert!(matches!(deserialize_raw(&bad), Err(Error::BadMagic { .. })));

    let mut bad = good.clone();
    bad[4] = 1;
    assert!(matches!(
        deserialize_raw(&bad),
        Err(Error::VersionMismatch { found: 256, .. })
    ));

    let mut bad = good;
    bad[5] = 7;
    assert!(matches!(
        deserialize_raw(&bad),
        Err(Error::InvalidCompressionFlag(7))
    ));
}

#[test]
fn test_truncated_payload_never_panics() {
    let bytes = serialize_raw(&scenario(), false).unwrap();
    for len in 0..bytes.len() {
        assert!(deserialize_raw(&bytes[..len]).is_err(), "prefix {} decoded", len);
    }
}

#[test]
fn test_heterogeneous_tree() {
    let mut keyed = Map::new(WireTag::Dynamic, WireTag::Dynamic);
    keyed.insert(Value::Byte(u8::MAX), Value::Byte(u8::MAX)).unwrap();
    keyed.insert(Value::Float(f32::MAX), Value::Float(f32::MAX)).unwrap();
    keyed.insert("nested".into(), scenario()).unwrap();

    let tree = Value::Array(Array::dynamic(vec![
        Value::Map(keyed),
        Value::Bool(false),
        Value::from("ÜÜÜÜÜÜÜÜÜÜÜÜ"),
        Value::Array(Array::new(WireTag::Long)),
    ]));

    for compress in [false, true] {
        let bytes = serialize_raw(&tree, compress).unwrap();
        assert_eq!(deserialize_raw(&bytes).unwrap(), tree);
    }
}

#[test]
fn test_streaming_through_cursor() {
    let mut cursor = std::io::Cursor::new(Vec::new());
    write_envelope(&mut cursor, &scenario(), true).unwrap();
    cursor.set_position(0);
    assert_eq!(read_envelope(cursor).unwrap(), scenario());
}
