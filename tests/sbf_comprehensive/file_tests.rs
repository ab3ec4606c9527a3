//! `.sbf` file helpers.

use crate::fixtures::{canonical, TestClass};
use sbf::{load, load_raw, peek_header, save, save_raw, Error, Value, SBF_EXTENSION};
use tempfile::TempDir;

#[test]
fn test_record_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fixture").with_extension(SBF_EXTENSION);
    let instance = TestClass::initialize();

    save(&path, &instance, true).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(peek_header(&bytes).unwrap().compressed);

    let loaded: TestClass = load(&path).unwrap();
    assert_eq!(canonical(&loaded), canonical(&instance));
}

#[test]
fn test_raw_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("raw.sbf");
    let value = Value::from(vec![u64::MAX, 0]);

    save_raw(&path, &value, false).unwrap();
    assert_eq!(load_raw(&path).unwrap(), value);
}

#[test]
fn test_foreign_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.sbf");
    std::fs::write(&path, b"plain text, not an envelope").unwrap();

    assert!(matches!(load_raw(&path), Err(Error::BadMagic { .. })));
}
