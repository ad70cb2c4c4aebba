#![allow(non_snake_case)]

use super::*;

#[test]
fn GeneratedUnit___digest___is_sha256_hex() {
    let unit = GeneratedUnit::new("a.g.cs", "");

    assert_eq!(
        unit.digest(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn GeneratedUnit___digest___changes_with_text() {
    let first = GeneratedUnit::new("a.g.cs", "class A {}");
    let second = GeneratedUnit::new("a.g.cs", "class B {}");

    assert_ne!(first.digest(), second.digest());
}

#[test]
fn MemorySink___add_source___keeps_registration_order() {
    let mut sink = MemorySink::new();

    sink.add_source(GeneratedUnit::new("b.g.cs", "b")).unwrap();
    sink.add_source(GeneratedUnit::new("a.g.cs", "a")).unwrap();

    assert_eq!(sink.names(), vec!["b.g.cs", "a.g.cs"]);
    assert_eq!(sink.get("a.g.cs"), Some("a"));
}

#[test]
fn MemorySink___add_source___same_name_replaces_content() {
    let mut sink = MemorySink::new();

    sink.add_source(GeneratedUnit::new("a.g.cs", "old")).unwrap();
    sink.add_source(GeneratedUnit::new("a.g.cs", "new")).unwrap();

    assert_eq!(sink.len(), 1);
    assert_eq!(sink.get("a.g.cs"), Some("new"));
}

#[test]
fn MemorySink___get___missing_name_is_none() {
    let sink = MemorySink::new();

    assert!(sink.is_empty());
    assert!(sink.get("missing.g.cs").is_none());
}
