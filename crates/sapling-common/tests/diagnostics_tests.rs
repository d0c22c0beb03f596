//! Tests for spans and the diagnostics context.

use sapling_common::{Diagnostic, Diagnostics, Severity, Span};

#[test]
fn test_span_line_col_counts_lines_and_characters() {
    let source = "<p>\n  <b>é</b>";
    // "<b>" on the second line starts at byte 6
    assert_eq!(Span::new(6, 9).line_col(source), (2, 3));
    assert_eq!(Span::at(0).line_col(source), (1, 1));
}

#[test]
fn test_span_to_covers_both() {
    let merged = Span::new(4, 6).to(Span::new(1, 3));
    assert_eq!(merged, Span::new(1, 6));
    assert_eq!(merged.len(), 5);
    assert!(Span::at(3).is_empty());
}

#[test]
fn test_span_slice() {
    assert_eq!(Span::new(1, 2).slice("<p>"), Some("p"));
    assert_eq!(Span::new(1, 20).slice("<p>"), None);
}

#[test]
fn test_duplicate_reports_are_dropped() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.warn("tree-builder", "unexpected end tag", Span::new(0, 4));
    diagnostics.warn("tree-builder", "unexpected end tag", Span::new(0, 4));
    diagnostics.warn("tree-builder", "unexpected end tag", Span::new(5, 9));

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.contains_message("end tag"));
}

#[test]
fn test_contexts_are_independent() {
    let mut first = Diagnostics::new();
    let second = Diagnostics::new();
    first.warn("tokenizer", "eof-in-tag", Span::at(3));

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

#[test]
fn test_clear_resets_deduplication() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.warn("tokenizer", "eof-in-comment", Span::at(1));
    diagnostics.clear();
    diagnostics.warn("tokenizer", "eof-in-comment", Span::at(1));

    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_diagnostic_rendering() {
    let diagnostic = Diagnostic::warning("tokenizer", "missing-attribute-value", Span::new(4, 5));
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(
        diagnostic.to_string(),
        "[tokenizer] warning: missing-attribute-value at 4..5"
    );
    assert_eq!(
        diagnostic.render("<a\nb=>"),
        "[tokenizer] warning: missing-attribute-value at 2:2"
    );
}

#[test]
fn test_into_vec_returns_deduplicated_reports() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.warn("tree-builder", "missing DOCTYPE [initial]", Span::at(0));
    diagnostics.warn("tree-builder", "missing DOCTYPE [initial]", Span::at(0));

    let entries = diagnostics.into_vec();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].component, "tree-builder");
}
