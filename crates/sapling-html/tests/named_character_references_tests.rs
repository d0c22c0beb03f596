//! Integration tests for named character reference lookup.

use sapling_common::Diagnostics;
use sapling_html::tokenizer::named_character_references::{longest_match, lookup};
use sapling_html::{ParserOptions, parse_document};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup("amp;"), Some("&"));
    assert_eq!(lookup("lt;"), Some("<"));
    assert_eq!(lookup("gt;"), Some(">"));
    assert_eq!(lookup("quot;"), Some("\""));
    assert_eq!(lookup("nbsp;"), Some("\u{00A0}"));
    assert_eq!(lookup("mdash;"), Some("\u{2014}"));
}

#[test]
fn test_lookup_legacy_entities() {
    // Legacy entities without semicolon
    assert_eq!(lookup("amp"), Some("&"));
    assert_eq!(lookup("copy"), Some("\u{A9}"));
    // Modern entities require the semicolon
    assert_eq!(lookup("apos"), None);
    assert_eq!(lookup("euro"), None);
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup("notarealentity;"), None);
    assert_eq!(lookup(""), None);
}

#[test]
fn test_longest_match_prefers_terminated_reference() {
    let m = longest_match("notin;").unwrap();
    assert_eq!(m.len, 6);
    assert!(m.terminated);

    let m = longest_match("nothing").unwrap();
    assert_eq!(m.value, "\u{AC}");
    assert_eq!(m.len, 3);
    assert!(!m.terminated);

    assert!(longest_match("xyz;").is_none());
}

#[test]
fn test_references_decoded_in_text_and_attributes() {
    let mut diagnostics = Diagnostics::new();
    let tree = parse_document(
        r#"<a title="x &amp; y">caf&eacute; &hellip;</a>"#,
        ParserOptions::default(),
        &mut diagnostics,
    );
    let body = tree.body().unwrap();
    let a = tree.first_child(body).unwrap();
    assert_eq!(tree.as_element(a).unwrap().get_attribute("title"), Some("x & y"));
    assert_eq!(tree.text_content(a), "caf\u{E9} \u{2026}");
}
