//! Integration tests for the hierarchical key-path language.

use confkey::keypath::{KeyPath, KeySegment};

/// Test the full scenario key with indices and a trailing attribute.
#[test]
fn test_parse_scenario_key() {
    let key = KeyPath::parse("tables.table(0).fields.field(1)[@dataType]");
    let segments = key.segments();
    assert_eq!(segments.len(), 5);
    assert_eq!(segments[0], KeySegment::new("tables"));
    assert_eq!(segments[1], KeySegment::indexed("table", 0));
    assert_eq!(segments[2], KeySegment::new("fields"));
    assert_eq!(segments[3], KeySegment::indexed("field", 1));
    assert_eq!(segments[4], KeySegment::attribute("dataType"));
    assert!(segments[4].is_attribute());
    assert!(!segments[3].is_attribute());
}

/// Test that common_key returns the longest shared prefix.
#[test]
fn test_common_key_scenario() {
    let left = KeyPath::parse("tables.table(0).fields.field(1)[@dataType]");
    let right = KeyPath::parse("tables.table(0).name");
    let common = left.common_key(&right);
    assert_eq!(common.to_string(), "tables.table(0)");
    // Symmetric.
    assert_eq!(right.common_key(&left), common);
}

/// Test that differing indices stop the common prefix.
#[test]
fn test_common_key_stops_at_differing_index() {
    let left = KeyPath::parse("tables.table(0).name");
    let right = KeyPath::parse("tables.table(1).name");
    assert_eq!(left.common_key(&right).to_string(), "tables");
}

/// Test that keys with no shared leading segment have an empty common key.
#[test]
fn test_common_key_disjoint() {
    let left = KeyPath::parse("a.b");
    let right = KeyPath::parse("x.y");
    assert!(left.common_key(&right).is_empty());
}

/// Test common_key of a key with itself.
#[test]
fn test_common_key_reflexive() {
    let key = KeyPath::parse("tables.table(0)[@type]");
    assert_eq!(key.common_key(&key), key);
}

/// Test difference_key of a key with itself is empty.
#[test]
fn test_difference_key_reflexive_is_empty() {
    let key = KeyPath::parse("tables.table(0)[@type]");
    assert!(key.difference_key(&key).is_empty());
}

/// Test that difference_key returns the remaining suffix of the other key.
#[test]
fn test_difference_key_suffix() {
    let prefix = KeyPath::parse("tables.table(0)");
    let full = KeyPath::parse("tables.table(0).fields.field(1)");
    assert_eq!(prefix.difference_key(&full).to_string(), "fields.field(1)");
}

/// Test that difference_key against a disjoint key returns all of it.
#[test]
fn test_difference_key_disjoint_returns_other() {
    let left = KeyPath::parse("a.b");
    let right = KeyPath::parse("x.y");
    assert_eq!(left.difference_key(&right), right);
}

/// Test that a plain segment and an attribute with the same name differ.
#[test]
fn test_attribute_flag_participates_in_matching() {
    let plain = KeyPath::parse("node.type");
    let attr = KeyPath::parse("node[@type]");
    assert_eq!(plain.common_key(&attr).to_string(), "node");
}

/// Test builder round-trip through the string form.
#[test]
fn test_builder_string_parse_round_trip() {
    let mut key = KeyPath::new();
    key.append("tables")
        .append("table")
        .append_index(0)
        .append("fields")
        .append("field")
        .append_index(1)
        .append_attribute("dataType");

    let rendered = key.to_string();
    assert_eq!(rendered, "tables.table(0).fields.field(1)[@dataType]");

    let reparsed = KeyPath::parse(&rendered);
    assert_eq!(reparsed, key);
    let original: Vec<_> = key.iter().collect();
    let round_tripped: Vec<_> = reparsed.iter().collect();
    assert_eq!(original, round_tripped);
}

/// Test that a key consisting solely of an attribute marker is legal.
#[test]
fn test_attribute_only_key() {
    let key = KeyPath::parse("[@rootType]");
    assert_eq!(key.len(), 1);
    assert!(key.segments()[0].is_attribute());
    assert_eq!(key.to_string(), "[@rootType]");
}

/// Test the empty key.
#[test]
fn test_empty_key() {
    let key = KeyPath::parse("");
    assert!(key.is_empty());
    assert_eq!(key.to_string(), "");
    assert_eq!(key, KeyPath::new());
}

/// Test equality against raw strings with the same canonical form.
#[test]
fn test_equality_with_raw_strings() {
    let key = KeyPath::parse("tables.table(0)");
    assert_eq!(key, "tables.table(0)");
    assert_eq!(key, ".tables.table(0)");
    assert_ne!(key.to_string(), "tables.table(1)");
}

/// Test that literal delimiters survive a doubled-delimiter round trip.
#[test]
fn test_literal_delimiter_in_segment_name() {
    let mut key = KeyPath::new();
    key.append("file.txt").append("size");
    assert_eq!(key.to_string(), "file..txt.size");

    let reparsed = KeyPath::parse("file..txt.size");
    assert_eq!(reparsed.len(), 2);
    assert_eq!(reparsed.segments()[0].name(), "file.txt");
}

/// Test fresh iterators can always be created from the same key.
#[test]
fn test_iteration_is_repeatable() {
    let key = KeyPath::parse("a.b.c");
    let first: Vec<_> = key.iter().map(|s| s.name().to_string()).collect();
    let second: Vec<_> = key.iter().map(|s| s.name().to_string()).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec!["a", "b", "c"]);
}

/// Test truncation to a prefix.
#[test]
fn test_truncate_to_prefix() {
    let mut key = KeyPath::parse("tables.table(0).fields");
    key.truncate(2);
    assert_eq!(key.to_string(), "tables.table(0)");
}

/// Test custom delimiters parse and render consistently.
#[test]
fn test_custom_delimiter() {
    let key = KeyPath::parse_with_delimiter("etc/app/config(2)", '/');
    assert_eq!(key.len(), 3);
    assert_eq!(key.segments()[2], KeySegment::indexed("config", 2));
    assert_eq!(key.to_string(), "etc/app/config(2)");
}

/// Test serde round trip through the canonical string form.
#[test]
fn test_serde_round_trip() {
    let key = KeyPath::parse("tables.table(0)[@type]");
    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, "\"tables.table(0)[@type]\"");
    let back: KeyPath = serde_json::from_str(&json).unwrap();
    assert_eq!(back, key);
}
