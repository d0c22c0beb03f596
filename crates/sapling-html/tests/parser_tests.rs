//! Integration tests for the HTML parser.

use sapling_common::{Diagnostics, Span};
use sapling_dom::{DomTree, NodeId, NodeType, QualName, QuirksMode, dump};
use sapling_html::{HTMLParser, InsertionMode, ParserOptions, Token, parse_document, parse_fragment};

/// Helper to parse HTML and return the DOM tree
fn parse(html: &str) -> DomTree {
    parse_with_diagnostics(html).0
}

fn parse_with_diagnostics(html: &str) -> (DomTree, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tree = parse_document(html, ParserOptions::default(), &mut diagnostics);
    (tree, diagnostics)
}

/// The html5lib-style dump of a whole document.
fn dump_document(html: &str) -> String {
    dump(&parse(html), NodeId::ROOT)
}

/// The html5lib-style dump of a fragment parsed in `context`.
fn dump_fragment(html: &str, context: &str) -> String {
    let mut diagnostics = Diagnostics::new();
    let tree = parse_fragment(
        html,
        QualName::html(context),
        ParserOptions::default(),
        &mut diagnostics,
    );
    let root = tree.document_element().expect("fragment has a root");
    dump(&tree, root)
}

/// Build the expected dump from lines without the leading `| `.
fn expected(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("| {line}\n")).collect()
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if let Some(data) = tree.as_element(from)
        && data.tag_name() == tag
    {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

// ========== Document structure ==========

#[test]
fn test_document_structure() {
    let tree = parse("<!DOCTYPE html><html><head></head><body></body></html>");

    // Root should be Document
    let root = tree.get(NodeId::ROOT).unwrap();
    assert!(matches!(root.node_type, NodeType::Document));

    // Document should have a doctype and then html
    let children = tree.children(NodeId::ROOT);
    assert_eq!(children.len(), 2);
    assert!(matches!(
        tree.get(children[0]).unwrap().node_type,
        NodeType::Doctype(_)
    ));

    let html = tree.document_element().unwrap();
    assert_eq!(tree.as_element(html).unwrap().tag_name(), "html");
    assert!(find_element(&tree, html, "head").is_some());
    assert!(find_element(&tree, html, "body").is_some());
    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);
}

#[test]
fn test_simple_paragraph() {
    assert_eq!(
        dump_document("<html><body><p>Hello</p></body></html>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      \"Hello\"",
        ])
    );
}

#[test]
fn test_implied_html_head_body() {
    let (tree, diagnostics) = parse_with_diagnostics("Hello");
    assert_eq!(
        dump(&tree, NodeId::ROOT),
        expected(&["<html>", "  <head>", "  <body>", "    \"Hello\""])
    );
    assert!(diagnostics.contains_message("missing DOCTYPE"));
}

#[test]
fn test_empty_input_builds_skeleton() {
    assert_eq!(
        dump_document(""),
        expected(&["<html>", "  <head>", "  <body>"])
    );
}

#[test]
fn test_attributes_preserved() {
    let tree = parse(r#"<div id="main" class="a b">x</div>"#);
    let div = find_element(&tree, NodeId::ROOT, "div").unwrap();
    let element = tree.as_element(div).unwrap();
    assert_eq!(element.get_attribute("id"), Some("main"));
    assert_eq!(element.get_attribute("class"), Some("a b"));
}

#[test]
fn test_head_elements_and_script_text() {
    assert_eq!(
        dump_document(
            "<!DOCTYPE html><head><meta charset=utf-8><title>T &amp; U</title><script>if (a<b) {}</script></head><body>x"
        ),
        expected(&[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "    <meta>",
            "      charset=\"utf-8\"",
            "    <title>",
            "      \"T & U\"",
            "    <script>",
            "      \"if (a<b) {}\"",
            "  <body>",
            "    \"x\"",
        ])
    );
}

#[test]
fn test_style_in_body_is_raw_text() {
    assert_eq!(
        dump_document("<p><style><b>not bold</b></style>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      <style>",
            "        \"<b>not bold</b>\"",
        ])
    );
}

#[test]
fn test_comments_placement() {
    assert_eq!(
        dump_document("<!--a--><html><!--b--><body></body><!--c--></html><!--d-->"),
        expected(&[
            "<!-- a -->",
            "<html>",
            "  <!-- b -->",
            "  <head>",
            "  <body>",
            "  <!-- c -->",
            "<!-- d -->",
        ])
    );
}

#[test]
fn test_whitespace_around_head() {
    assert_eq!(
        dump_document("<!DOCTYPE html>  <html>  <head>  </head>  <body>x"),
        expected(&[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "    \"  \"",
            "  \"  \"",
            "  <body>",
            "    \"x\"",
        ])
    );
}

#[test]
fn test_duplicate_body_merges_attributes() {
    assert_eq!(
        dump_document("<body a=1><body b=2 a=3>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    a=\"1\"",
            "    b=\"2\"",
        ])
    );
}

// ========== Title and text mode ==========

#[test]
fn test_title_eof_in_text() {
    let (tree, diagnostics) = parse_with_diagnostics("<title>abc");
    assert_eq!(
        dump(&tree, NodeId::ROOT),
        expected(&[
            "<html>",
            "  <head>",
            "    <title>",
            "      \"abc\"",
            "  <body>",
        ])
    );
    assert!(diagnostics.contains_message("unexpected end of file in <title>"));
}

#[test]
fn test_title_switches_tokenizer_to_rcdata() {
    let mut parser = HTMLParser::new(ParserOptions::default());
    let mut diagnostics = Diagnostics::new();
    let _ = parser.accept(
        Token::Doctype {
            name: Some("html".to_owned()),
            public_identifier: None,
            system_identifier: None,
            force_quirks: false,
        },
        Span::default(),
        &mut diagnostics,
    );
    let _ = parser.accept(Token::start_tag("head", Vec::new()), Span::default(), &mut diagnostics);
    assert_eq!(parser.insertion_mode(), InsertionMode::InHead);

    let result = parser.accept(Token::start_tag("title", Vec::new()), Span::default(), &mut diagnostics);
    assert_eq!(
        result,
        sapling_html::tokenizer::TokenSinkResult::SwitchTo(sapling_html::TokenizerState::RCDATA)
    );
    assert_eq!(parser.insertion_mode(), InsertionMode::Text);

    let _ = parser.accept(Token::EndOfFile, Span::default(), &mut diagnostics);
    assert!(parser.is_stopped());
    assert!(diagnostics.contains_message("<title>"));
}

#[test]
fn test_textarea_and_pre_ignore_leading_newline() {
    assert_eq!(
        dump_document("<pre>\n\nx</pre><textarea>\ny</textarea>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <pre>",
            "      \"\nx\"",
            "    <textarea>",
            "      \"y\"",
        ])
    );
}

// ========== Implied end tags and scope ==========

#[test]
fn test_list_items_close_implicitly() {
    assert_eq!(
        dump_document("<ul><li>a<li>b</ul><dl><dt>c<dd>d</dl>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <ul>",
            "      <li>",
            "        \"a\"",
            "      <li>",
            "        \"b\"",
            "    <dl>",
            "      <dt>",
            "        \"c\"",
            "      <dd>",
            "        \"d\"",
        ])
    );
}

#[test]
fn test_paragraph_closed_by_block() {
    assert_eq!(
        dump_document("<p>a<div>b</div>c"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      \"a\"",
            "    <div>",
            "      \"b\"",
            "    \"c\"",
        ])
    );
}

#[test]
fn test_stray_end_p_creates_empty_paragraph() {
    let (tree, diagnostics) = parse_with_diagnostics("<body></p>");
    assert_eq!(
        dump(&tree, NodeId::ROOT),
        expected(&["<html>", "  <head>", "  <body>", "    <p>"])
    );
    assert!(diagnostics.contains_message("no <p> element in scope"));
}

#[test]
fn test_nested_headings() {
    assert_eq!(
        dump_document("<h1>a<h2>b</h1>c"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <h1>",
            "      \"a\"",
            "    <h2>",
            "      \"b\"",
            "    \"c\"",
        ])
    );
}

#[test]
fn test_image_becomes_img() {
    assert_eq!(
        dump_document("<image src=a>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <img>",
            "      src=\"a\"",
        ])
    );
}

#[test]
fn test_self_closing_non_void_element() {
    let (tree, diagnostics) = parse_with_diagnostics("<div/>x<br/>");
    assert_eq!(
        dump(&tree, NodeId::ROOT),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <div>",
            "      \"x\"",
            "      <br>",
        ])
    );
    assert!(diagnostics.contains_message("self-closing syntax on non-void element <div>"));
    assert!(!diagnostics.contains_message("<br>"));
}

// ========== Active formatting elements ==========

#[test]
fn test_misnested_formatting_end_tags() {
    assert_eq!(
        dump_document("<b><i>X</b>Y</i>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <b>",
            "      <i>",
            "        \"X\"",
            "    <i>",
            "      \"Y\"",
        ])
    );
}

#[test]
fn test_adoption_agency_with_furthest_block() {
    let (tree, diagnostics) = parse_with_diagnostics("<a><p>X</a>Y");
    assert_eq!(
        dump(&tree, NodeId::ROOT),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <a>",
            "    <p>",
            "      <a>",
            "        \"X\"",
            "      \"Y\"",
        ])
    );
    assert!(diagnostics.contains_message("misnested formatting element <a>"));
}

#[test]
fn test_adoption_agency_moves_formatting_into_block() {
    assert_eq!(
        dump_document("<b>1<p>2</b>3</p>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <b>",
            "      \"1\"",
            "    <p>",
            "      <b>",
            "        \"2\"",
            "      \"3\"",
        ])
    );
}

#[test]
fn test_nested_anchor_closes_previous() {
    assert_eq!(
        dump_document("<a href=1>x<a href=2>y"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <a>",
            "      href=\"1\"",
            "      \"x\"",
            "    <a>",
            "      href=\"2\"",
            "      \"y\"",
        ])
    );
}

#[test]
fn test_noahs_ark_limits_reconstruction() {
    assert_eq!(
        dump_document("<p><b><b><b><b><p>x"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      <b>",
            "        <b>",
            "          <b>",
            "            <b>",
            "    <p>",
            "      <b>",
            "        <b>",
            "          <b>",
            "            \"x\"",
        ])
    );
}

#[test]
fn test_reconstruction_is_idempotent() {
    let mut parser = HTMLParser::new(ParserOptions::default());
    let mut diagnostics = Diagnostics::new();
    for token in [
        Token::start_tag("p", Vec::new()),
        Token::start_tag("b", Vec::new()),
        Token::end_tag("p"),
    ] {
        let _ = parser.accept(token, Span::default(), &mut diagnostics);
    }
    // The <b> is still an active formatting element but no longer open.
    assert_eq!(parser.active_formatting_elements().len(), 1);
    let open_before = parser.open_elements().len();

    parser.reconstruct_the_active_formatting_elements();
    let nodes_after_first = parser.tree().len();
    let open_after_first = parser.open_elements().len();
    assert_eq!(open_after_first, open_before + 1);

    parser.reconstruct_the_active_formatting_elements();
    assert_eq!(parser.tree().len(), nodes_after_first);
    assert_eq!(parser.open_elements().len(), open_after_first);
}

#[test]
fn test_formatting_reopened_after_block() {
    assert_eq!(
        dump_document("<i>a<div>b</div>c"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <i>",
            "      \"a\"",
            "      <div>",
            "        \"b\"",
            "      \"c\"",
        ])
    );
}

// ========== Tables ==========

#[test]
fn test_table_text_is_foster_parented() {
    let (tree, diagnostics) = parse_with_diagnostics("<table>foo<tr><td>bar</td></tr></table>");
    assert_eq!(
        dump(&tree, NodeId::ROOT),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    \"foo\"",
            "    <table>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"bar\"",
        ])
    );
    assert!(diagnostics.contains_message("non-whitespace text in a table"));
}

#[test]
fn test_table_elements_are_foster_parented() {
    assert_eq!(
        dump_document("<table><div>x</div><tr><td>y"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <div>",
            "      \"x\"",
            "    <table>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"y\"",
        ])
    );
}

#[test]
fn test_table_whitespace_stays_in_table() {
    assert_eq!(
        dump_document("<table> <tr> <td>x</td> </tr> </table>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      \" \"",
            "      <tbody>",
            "        <tr>",
            "          \" \"",
            "          <td>",
            "            \"x\"",
            "          \" \"",
            "        \" \"",
        ])
    );
}

#[test]
fn test_table_caption_and_colgroup() {
    assert_eq!(
        dump_document("<table><caption>c<col><tr><td>x"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <caption>",
            "        \"c\"",
            "      <colgroup>",
            "        <col>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"x\"",
        ])
    );
}

#[test]
fn test_new_cell_closes_previous() {
    assert_eq!(
        dump_document("<table><td>a<td>b<tr><th>c</table>d"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"a\"",
            "          <td>",
            "            \"b\"",
            "        <tr>",
            "          <th>",
            "            \"c\"",
            "    \"d\"",
        ])
    );
}

#[test]
fn test_table_closes_paragraph_only_without_quirks() {
    assert_eq!(
        dump_document("<!DOCTYPE html><p><table>"),
        expected(&[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "    <table>",
        ])
    );
    assert_eq!(
        dump_document("<p><table>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      <table>",
        ])
    );
}

// ========== Select ==========

#[test]
fn test_select_options() {
    assert_eq!(
        dump_document("<select><option>a<option>b<optgroup><option>c</select>x"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <select>",
            "      <option>",
            "        \"a\"",
            "      <option>",
            "        \"b\"",
            "      <optgroup>",
            "        <option>",
            "          \"c\"",
            "    \"x\"",
        ])
    );
}

#[test]
fn test_select_drops_other_tags() {
    assert_eq!(
        dump_document("<select><b>x</b><input>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <select>",
            "      \"x\"",
            "    <input>",
        ])
    );
}

#[test]
fn test_select_in_table_closed_by_cell() {
    assert_eq!(
        dump_document("<table><tr><td><select><option>a<td>b"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            <select>",
            "              <option>",
            "                \"a\"",
            "          <td>",
            "            \"b\"",
        ])
    );
}

// ========== Template ==========

#[test]
fn test_template_contents_under_template() {
    assert_eq!(
        dump_document("<template><tr><td>x</td></tr></template>"),
        expected(&[
            "<html>",
            "  <head>",
            "    <template>",
            "      <tr>",
            "        <td>",
            "          \"x\"",
            "  <body>",
        ])
    );
}

#[test]
fn test_unclosed_template_at_eof() {
    let (tree, diagnostics) = parse_with_diagnostics("<body><template><b>x");
    assert_eq!(
        dump(&tree, NodeId::ROOT),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <template>",
            "      <b>",
            "        \"x\"",
        ])
    );
    assert!(diagnostics.contains_message("unexpected end of file with <template> open"));
}

// ========== Frameset ==========

#[test]
fn test_frameset_document() {
    assert_eq!(
        dump_document("<frameset><frame></frameset><noframes>x</noframes>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <frameset>",
            "    <frame>",
            "  <noframes>",
            "    \"x\"",
        ])
    );
}

#[test]
fn test_frameset_ignored_after_content() {
    assert_eq!(
        dump_document("<p>x<frameset>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      \"x\"",
        ])
    );
}

// ========== Foreign content ==========

#[test]
fn test_svg_and_mathml() {
    assert_eq!(
        dump_document(
            r#"<svg viewBox="0 0 1 1"><foreignObject><p>x</p></foreignObject><path d=""/></svg><math><mi>y</mi></math>"#
        ),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      viewBox=\"0 0 1 1\"",
            "      <svg foreignObject>",
            "        <p>",
            "          \"x\"",
            "      <svg path>",
            "        d=\"\"",
            "    <math math>",
            "      <math mi>",
            "        \"y\"",
        ])
    );
}

#[test]
fn test_html_start_tag_breaks_out_of_svg() {
    assert_eq!(
        dump_document("<svg><g><p>x"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      <svg g>",
            "    <p>",
            "      \"x\"",
        ])
    );
}

#[test]
fn test_foreign_attributes_get_namespaces() {
    assert_eq!(
        dump_document(r##"<svg><use xlink:href="#a"/></svg>"##),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      <svg use>",
            "        xlink href=\"#a\"",
        ])
    );
}

#[test]
fn test_cdata_in_svg() {
    assert_eq!(
        dump_document("<svg><![CDATA[a<b]]></svg>"),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      \"a<b\"",
        ])
    );
}

// ========== Quirks ==========

#[test]
fn test_quirks_mode_detection() {
    assert_eq!(parse("<p>").quirks_mode(), QuirksMode::Quirks);
    assert_eq!(parse("<!DOCTYPE html>").quirks_mode(), QuirksMode::NoQuirks);
    assert_eq!(
        parse(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#).quirks_mode(),
        QuirksMode::Quirks
    );
    assert_eq!(
        parse(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#
        )
        .quirks_mode(),
        QuirksMode::LimitedQuirks
    );
    assert_eq!(
        parse(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#
        )
        .quirks_mode(),
        QuirksMode::LimitedQuirks
    );
}

// ========== Scripting flag ==========

#[test]
fn test_noscript_without_scripting() {
    assert_eq!(
        dump_document("<head><noscript><link></noscript></head>"),
        expected(&[
            "<html>",
            "  <head>",
            "    <noscript>",
            "      <link>",
            "  <body>",
        ])
    );
}

#[test]
fn test_noscript_with_scripting_is_raw_text() {
    let mut diagnostics = Diagnostics::new();
    let tree = parse_document(
        "<body><noscript><p>x</p></noscript>",
        ParserOptions::default().with_scripting(true),
        &mut diagnostics,
    );
    assert_eq!(
        dump(&tree, NodeId::ROOT),
        expected(&[
            "<html>",
            "  <head>",
            "  <body>",
            "    <noscript>",
            "      \"<p>x</p>\"",
        ])
    );
}

// ========== Fragments ==========

#[test]
fn test_fragment_in_table_row() {
    assert_eq!(
        dump_fragment("<td>cell", "tr"),
        expected(&["<td>", "  \"cell\""])
    );
}

#[test]
fn test_fragment_in_div() {
    assert_eq!(
        dump_fragment("<p>a</p>b</div>c", "div"),
        expected(&["<p>", "  \"a\"", "\"bc\""])
    );
}

#[test]
fn test_fragment_in_textarea_is_rcdata() {
    assert_eq!(
        dump_fragment("<b>&amp;</b>", "textarea"),
        expected(&["\"<b>&</b>\""])
    );
}

#[test]
fn test_fragment_in_template() {
    assert_eq!(
        dump_fragment("<td>x", "template"),
        expected(&["<td>", "  \"x\""])
    );
}

// ========== Invariants ==========

#[test]
fn test_open_elements_never_empty_after_html() {
    let source = "<!DOCTYPE html><p>a<b>b<table><tr><td>c</td></tr></table></b></p></body></html>x";
    let mut diagnostics = Diagnostics::new();
    let tokens = sapling_html::tokenize(source, &mut diagnostics);
    let mut parser = HTMLParser::new(ParserOptions::default());
    let mut html_pushed = false;

    for (token, span) in tokens {
        let at_eof = matches!(token, Token::EndOfFile);
        let _ = parser.accept(token, span, &mut diagnostics);
        html_pushed |= !parser.open_elements().is_empty();
        if html_pushed && !at_eof {
            assert!(!parser.open_elements().is_empty());
        }
    }
    assert!(parser.is_stopped());
    assert!(parser.open_elements().is_empty());
}

#[test]
fn test_parse_errors_carry_spans() {
    let source = "<p>a</i>";
    let (_, diagnostics) = parse_with_diagnostics(source);
    let stray = diagnostics
        .iter()
        .find(|d| d.message.contains("</i>"))
        .expect("stray end tag reported");
    assert_eq!(stray.span.slice(source), Some("</i>"));
    assert_eq!(stray.component, "tree-builder");
}
