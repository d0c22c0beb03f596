//! Entry points that wire the tokenizer to the tree builder.

use sapling_common::Diagnostics;
use sapling_dom::{DomTree, Namespace, QualName};

use super::core::HTMLParser;
use super::options::ParserOptions;
use crate::tokenizer::{HTMLTokenizer, TokenizerState};

/// Parse a complete document.
///
/// Parse errors from both stages end up in `diagnostics`. Parsing never
/// fails: malformed markup is repaired the way browsers repair it.
///
/// ```
/// use sapling_common::Diagnostics;
/// use sapling_html::{ParserOptions, parse_document};
///
/// let mut diagnostics = Diagnostics::new();
/// let tree = parse_document("<p>Hello", ParserOptions::default(), &mut diagnostics);
/// let body = tree.body().unwrap();
/// assert_eq!(tree.text_content(body), "Hello");
/// ```
#[must_use]
pub fn parse_document(input: &str, options: ParserOptions, diagnostics: &mut Diagnostics) -> DomTree {
    let mut parser = HTMLParser::new(options);
    HTMLTokenizer::new(input).run(&mut parser, diagnostics);
    parser.into_tree()
}

/// [§ 13.2.8 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
///
/// Parse `input` as the children of an element named `context`.
///
/// The returned tree holds a single `html` element under the Document node.
/// Its children are the parsed fragment.
///
/// ```
/// use sapling_common::Diagnostics;
/// use sapling_dom::QualName;
/// use sapling_html::{ParserOptions, parse_fragment};
///
/// let mut diagnostics = Diagnostics::new();
/// let tree = parse_fragment(
///     "<td>cell",
///     QualName::html("tr"),
///     ParserOptions::default(),
///     &mut diagnostics,
/// );
/// let root = tree.document_element().unwrap();
/// let cell = tree.first_child(root).unwrap();
/// assert_eq!(tree.as_element(cell).unwrap().tag_name(), "td");
/// ```
#[must_use]
pub fn parse_fragment(
    input: &str,
    context: QualName,
    options: ParserOptions,
    diagnostics: &mut Diagnostics,
) -> DomTree {
    let state = fragment_tokenizer_state(&context, options);
    let mut tokenizer = HTMLTokenizer::new(input).with_initial_state(state);
    if context.ns == Namespace::Html {
        tokenizer = tokenizer.with_last_start_tag(context.local.clone());
    }

    log::debug!("parsing fragment in <{context}> starting in {state}");
    let mut parser = HTMLParser::for_fragment(context, options);
    tokenizer.run(&mut parser, diagnostics);
    parser.into_tree()
}

/// "Set the state of the HTML parser's tokenization stage as follows,
/// switching on the context element"
fn fragment_tokenizer_state(context: &QualName, options: ParserOptions) -> TokenizerState {
    if context.ns != Namespace::Html {
        return TokenizerState::Data;
    }
    match context.local.as_str() {
        "title" | "textarea" => TokenizerState::RCDATA,
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => TokenizerState::RAWTEXT,
        "script" => TokenizerState::ScriptData,
        "noscript" if options.scripting => TokenizerState::RAWTEXT,
        "plaintext" => TokenizerState::PLAINTEXT,
        _ => TokenizerState::Data,
    }
}
