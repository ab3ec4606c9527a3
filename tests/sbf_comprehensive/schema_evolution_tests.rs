//! Renamed, excluded and restricted members across versions of a record.

use sbf::{deserialize, record, serialize, Map, Value};

#[derive(Debug, Default, PartialEq)]
struct ProfileV1 {
    title: String,
    level: u8,
}

record! {
    ProfileV1 as "Profile" {
        title as "Title",
        level as "Level",
    }
}

#[derive(Debug, Default, PartialEq)]
struct ProfileV2 {
    display_name: String,
    level: u8,
    session: Vec<u32>,
    revision: u64,
}

record! {
    ProfileV2 as "Profile" {
        display_name as "DisplayName" => [formerly("Name", "Title")],
        level as "Level",
        session as "Session" => [exclude],
        revision as "Revision" => [read_only],
    }
}

fn encode_container(entries: Vec<(&str, Value)>) -> Vec<u8> {
    let mut map = Map::container();
    for (key, value) in entries {
        map.insert(key.into(), value).unwrap();
    }
    sbf::serialize_raw(&Value::Map(map), false).unwrap()
}

#[test]
fn test_old_file_decodes_into_renamed_member() {
    let old = ProfileV1 {
        title: "Ada".to_string(),
        level: 3,
    };
    let bytes = serialize(&old, true).unwrap();

    let upgraded: ProfileV2 = deserialize(&bytes).unwrap();
    assert_eq!(upgraded.display_name, "Ada");
    assert_eq!(upgraded.level, 3);
}

#[test]
fn test_current_name_preferred_over_legacy_key() {
    let bytes = encode_container(vec![
        ("Title", "legacy".into()),
        ("DisplayName", "current".into()),
    ]);
    let profile: ProfileV2 = deserialize(&bytes).unwrap();
    assert_eq!(profile.display_name, "current");
}

#[test]
fn test_first_declared_former_name_wins() {
    let bytes = encode_container(vec![("Title", "second".into()), ("Name", "first".into())]);
    let profile: ProfileV2 = deserialize(&bytes).unwrap();
    assert_eq!(profile.display_name, "first");
}

#[test]
fn test_excluded_member_never_written_or_read() {
    let profile = ProfileV2 {
        display_name: "x".to_string(),
        level: 1,
        session: vec![1, 2, 3],
        revision: 9,
    };
    let bytes = serialize(&profile, false).unwrap();
    let root = sbf::deserialize_raw(&bytes).unwrap();
    assert!(root.as_map().unwrap().get_str("Session").is_none());

    let bytes = encode_container(vec![("Session", Value::from(vec![7u32]))]);
    let decoded: ProfileV2 = deserialize(&bytes).unwrap();
    assert!(decoded.session.is_empty());
}

#[test]
fn test_read_only_member_written_but_not_assigned() {
    let profile = ProfileV2 {
        revision: 9,
        ..Default::default()
    };
    let bytes = serialize(&profile, false).unwrap();
    let root = sbf::deserialize_raw(&bytes).unwrap();
    assert_eq!(
        root.as_map().unwrap().get_str("Revision"),
        Some(&Value::ULong(9))
    );

    let decoded: ProfileV2 = deserialize(&bytes).unwrap();
    assert_eq!(decoded.revision, 0);
}

#[test]
fn test_new_file_read_by_old_version() {
    let profile = ProfileV2 {
        display_name: "Ada".to_string(),
        level: 5,
        ..Default::default()
    };
    let bytes = serialize(&profile, false).unwrap();

    // The old version knows nothing about DisplayName
    let old: ProfileV1 = deserialize(&bytes).unwrap();
    assert_eq!(old, ProfileV1 { title: String::new(), level: 5 });
}

#[derive(Debug, Default, PartialEq)]
struct ProfileV3 {
    title: String,
    display_name: String,
    headline: String,
}

record! {
    ProfileV3 as "Profile" {
        title as "Title",
        display_name as "DisplayName" => [formerly("Title")],
        headline as "Headline" => [formerly("Title")],
    }
}

#[derive(Debug, Default, PartialEq)]
struct ProfileV3Reordered {
    headline: String,
    display_name: String,
    title: String,
}

record! {
    ProfileV3Reordered as "Profile" {
        headline as "Headline" => [formerly("Title")],
        display_name as "DisplayName" => [formerly("Title")],
        title as "Title",
    }
}

#[test]
fn test_legacy_key_kept_as_current_name_and_shared() {
    let old = ProfileV1 {
        title: "Ada".to_string(),
        level: 2,
    };
    let bytes = serialize(&old, false).unwrap();

    let upgraded: ProfileV3 = deserialize(&bytes).unwrap();
    assert_eq!(upgraded.title, "Ada");
    assert_eq!(upgraded.display_name, "Ada");
    assert_eq!(upgraded.headline, "Ada");

    let reordered: ProfileV3Reordered = deserialize(&bytes).unwrap();
    assert_eq!(
        (reordered.title, reordered.display_name, reordered.headline),
        (upgraded.title, upgraded.display_name, upgraded.headline)
    );
}

#[test]
fn test_shared_legacy_key_yields_to_current_names() {
    let bytes = encode_container(vec![
        ("Title", "legacy".into()),
        ("Headline", "current".into()),
    ]);
    let profile: ProfileV3Reordered = deserialize(&bytes).unwrap();
    assert_eq!(profile.headline, "current");
    assert_eq!(profile.display_name, "legacy");
    assert_eq!(profile.title, "legacy");
}
