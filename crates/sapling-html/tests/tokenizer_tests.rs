//! Integration tests for the HTML tokenizer.

use sapling_common::{Diagnostics, Span};
use sapling_html::tokenizer::tokenize as tokenize_with_spans;
use sapling_html::{HTMLTokenizer, Token, TokenizerState};
use sapling_html::tokenizer::TokenCollector;

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    let mut diagnostics = Diagnostics::new();
    tokenize_with_spans(input, &mut diagnostics)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Tokenize `input` as the contents of a raw text element named `tag`.
fn tokenize_text_element(input: &str, state: TokenizerState, tag: &str) -> Vec<Token> {
    let mut collector = TokenCollector::default();
    let mut diagnostics = Diagnostics::new();
    HTMLTokenizer::new(input)
        .with_initial_state(state)
        .with_last_start_tag(tag)
        .run(&mut collector, &mut diagnostics);
    collector.tokens.into_iter().map(|(token, _)| token).collect()
}

/// Concatenate the character tokens.
fn characters(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| {
            if let Token::Character { data } = t {
                Some(*data)
            } else {
                None
            }
        })
        .collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::EndTag { name, .. } => {
            assert_eq!(name, "div");
        }
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data } => {
            assert_eq!(data, " hello ");
        }
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_attribute_double_quoted() {
    let tokens = tokenize(r#"<div class="foo">"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "foo");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_single_quoted() {
    let tokens = tokenize("<div class='bar'>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "bar");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_unquoted() {
    let tokens = tokenize("<div class=baz>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "baz");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_boolean_attribute() {
    let tokens = tokenize("<input disabled>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "input");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "disabled");
            assert_eq!(attributes[0].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_multiple_attributes() {
    let tokens = tokenize(r#"<input type="text" id="name" disabled>"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "input");
            assert_eq!(attributes.len(), 3);
            assert_eq!(attributes[0].name, "type");
            assert_eq!(attributes[0].value, "text");
            assert_eq!(attributes[1].name, "id");
            assert_eq!(attributes[1].value, "name");
            assert_eq!(attributes[2].name, "disabled");
            assert_eq!(attributes[2].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_tag_with_text_content() {
    let tokens = tokenize("<p>Hi</p>");
    assert_eq!(tokens.len(), 5); // <p>, H, i, </p>, EOF
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "p"));
    assert!(matches!(tokens[1], Token::Character { data: 'H' }));
    assert!(matches!(tokens[2], Token::Character { data: 'i' }));
    assert!(matches!(&tokens[3], Token::EndTag { name, .. } if name == "p"));
    assert!(matches!(tokens[4], Token::EndOfFile));
}

#[test]
fn test_simple_html_document() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Test</title></head>
<body>Hello</body>
</html>"#;
    let tokens = tokenize(html);

    // Should have DOCTYPE as first token
    assert!(matches!(&tokens[0], Token::Doctype { name: Some(n), .. } if n == "html"));

    // Should end with EOF
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));

    // Count tag tokens
    let start_tags: Vec<_> = tokens
        .iter()
        .filter(|t| matches!(t, Token::StartTag { .. }))
        .collect();
    let end_tags: Vec<_> = tokens
        .iter()
        .filter(|t| matches!(t, Token::EndTag { .. }))
        .collect();

    assert_eq!(start_tags.len(), 4); // html, head, title, body
    assert_eq!(end_tags.len(), 4); // /title, /head, /body, /html
}


// ========== Raw text element (RCDATA/RAWTEXT) tests ==========

#[test]
fn test_style_element_rawtext() {
    // Style content should be treated as raw text, not parsed as tags
    let tokens = tokenize_text_element(
        "body { color: red; }</style>",
        TokenizerState::RAWTEXT,
        "style",
    );

    assert_eq!(characters(&tokens), "body { color: red; }");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

#[test]
fn test_style_with_fake_tags() {
    // Tags inside style should NOT be parsed as tags
    let tokens = tokenize_text_element(
        "<div>not a tag</div></style>",
        TokenizerState::RAWTEXT,
        "style",
    );
    assert_eq!(characters(&tokens), "<div>not a tag</div>");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
}

#[test]
fn test_style_with_wrong_end_tag() {
    // </notastyle> inside style should NOT close the style element
    let tokens = tokenize_text_element("a</notastyle>b</style>", TokenizerState::RAWTEXT, "style");
    assert_eq!(characters(&tokens), "a</notastyle>b");
}

#[test]
fn test_title_element_rcdata() {
    // RCDATA still decodes character references
    let tokens = tokenize_text_element("a &lt; b < c</title>", TokenizerState::RCDATA, "title");
    assert_eq!(characters(&tokens), "a < b < c");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "title"));
}

#[test]
fn test_rawtext_does_not_decode_references() {
    let tokens = tokenize_text_element("&amp;</xmp>", TokenizerState::RAWTEXT, "xmp");
    assert_eq!(characters(&tokens), "&amp;");
}

#[test]
fn test_end_tag_name_is_case_insensitive() {
    let tokens = tokenize_text_element("x</TEXTAREA>", TokenizerState::RCDATA, "textarea");
    assert_eq!(characters(&tokens), "x");
    assert!(matches!(&tokens[1], Token::EndTag { name, .. } if name == "textarea"));
}

#[test]
fn test_script_data() {
    let tokens = tokenize_text_element(
        r#"if (a < b) { s = "</scr"; }</script>"#,
        TokenizerState::ScriptData,
        "script",
    );
    assert_eq!(characters(&tokens), r#"if (a < b) { s = "</scr"; }"#);
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "script"));
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize_text_element("</plaintext><b>", TokenizerState::PLAINTEXT, "plaintext");
    assert_eq!(characters(&tokens), "</plaintext><b>");
    assert_eq!(tokens.len(), 16);
}

// ========== Character references ==========

#[test]
fn test_character_reference_bare_ampersand() {
    // [§ 13.2.5.72 Character reference state]
    // Bare ampersand followed by non-alphanumeric should flush as literal '&'
    let tokens = tokenize("a & b");
    // Should be: 'a', ' ', '&', ' ', 'b', EOF
    assert_eq!(tokens.len(), 6);
    assert!(matches!(tokens[2], Token::Character { data: '&' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_named_character_reference_amp() {
    assert_eq!(characters(&tokenize("a &amp; b")), "a & b");
    assert_eq!(characters(&tokenize("&lt;div&gt;")), "<div>");
}

#[test]
fn test_named_character_reference_without_semicolon() {
    // Legacy entities without semicolon should still work
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize_with_spans("&amp is ok", &mut diagnostics);
    let tokens: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
    assert_eq!(characters(&tokens), "& is ok");
    assert!(diagnostics.contains_message("missing-semicolon-after-character-reference"));
}

#[test]
fn test_named_character_reference_unknown() {
    // Unknown entities should be passed through as-is
    assert_eq!(characters(&tokenize("&xyzzy;")), "&xyzzy;");
    // A legacy prefix still matches
    assert_eq!(characters(&tokenize("&notreal;")), "\u{AC}real;");
}

#[test]
fn test_named_character_reference_in_attribute() {
    // Entities in attribute values should be replaced
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].value, "?a=1&b=2");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_legacy_reference_in_attribute_followed_by_alphanumeric() {
    // "&copy=" stays literal inside an attribute value
    let tokens = tokenize(r#"<a href="?x=1&copy=2">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].value, "?x=1&copy=2");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_numeric_character_references() {
    assert_eq!(characters(&tokenize("&#65;&#x42;&#X43;")), "ABC");
    // Windows-1252 replacement table
    assert_eq!(characters(&tokenize("&#128;")), "\u{20AC}");
    assert_eq!(characters(&tokenize("&#0;")), "\u{FFFD}");
    assert_eq!(characters(&tokenize("&#x110000;")), "\u{FFFD}");
}

// ========== Input handling, spans and errors ==========

#[test]
fn test_newlines_are_normalized() {
    assert_eq!(characters(&tokenize("a\r\nb\rc")), "a\nb\nc");
}

#[test]
fn test_spans_point_at_source() {
    let source = "<p class=x>hi<!--c--></p>";
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize_with_spans(source, &mut diagnostics);

    assert_eq!(tokens[0].1.slice(source), Some("<p class=x>"));
    assert_eq!(tokens[1].1, Span::new(11, 12));
    assert_eq!(tokens[3].1.slice(source), Some("<!--c-->"));
    assert_eq!(tokens[4].1.slice(source), Some("</p>"));
    assert_eq!(tokens[5].1, Span::at(source.len()));
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize_with_spans("<div id=a id=b>", &mut diagnostics);
    match &tokens[0].0 {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].value, "a");
        }
        _ => panic!("Expected StartTag token"),
    }
    assert!(diagnostics.contains_message("duplicate-attribute"));
}

#[test]
fn test_cdata_outside_foreign_content_is_bogus_comment() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert!(matches!(&tokens[0], Token::Comment { data } if data == "[CDATA[x]]"));
}

#[test]
fn test_doctype_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    );
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_eof_in_tag() {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize_with_spans("<div class=", &mut diagnostics);
    assert_eq!(tokens.len(), 1);
    assert!(diagnostics.contains_message("eof-in-tag"));
}

#[test]
fn test_tag_predicates() {
    let tokens = tokenize("<Div></DIV>");
    assert!(tokens[0].is_start_tag("div"));
    assert!(!tokens[0].is_end_tag("div"));
    assert!(tokens[1].is_end_tag("div"));
    assert!(tokens[2].is_eof());
}
