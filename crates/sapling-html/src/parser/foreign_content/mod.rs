//! Foreign content parsing support for SVG and MathML.
//!
//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)

pub mod mathml;
pub mod svg;

pub use mathml::adjust_mathml_attributes;
pub use svg::{adjust_svg_attributes, adjust_svg_tag_name};

use sapling_dom::{Namespace, QualName};

use super::core::{HTMLParser, Step};
use super::error::ParseError;
use super::tags::is_mathml_text_integration_point;
use crate::tokenizer::{Attribute, Token};

/// [§ 13.2.6.1 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// "if any of the attributes on the token match the strings given in the
/// first column of the following table, let the attribute be a namespaced
/// attribute, with the prefix being the string given in the corresponding
/// cell in the second column, the local name being the string given in the
/// corresponding cell in the third column, and the namespace being the
/// namespace given in the corresponding cell in the fourth column."
///
/// Format: (`attribute_name`, prefix, `local_name`, namespace)
const FOREIGN_ATTRIBUTE_ADJUSTMENTS: &[(&str, Option<&str>, &str, Namespace)] = &[
    ("xlink:actuate", Some("xlink"), "actuate", Namespace::XLink),
    ("xlink:arcrole", Some("xlink"), "arcrole", Namespace::XLink),
    ("xlink:href", Some("xlink"), "href", Namespace::XLink),
    ("xlink:role", Some("xlink"), "role", Namespace::XLink),
    ("xlink:show", Some("xlink"), "show", Namespace::XLink),
    ("xlink:title", Some("xlink"), "title", Namespace::XLink),
    ("xlink:type", Some("xlink"), "type", Namespace::XLink),
    ("xml:lang", Some("xml"), "lang", Namespace::Xml),
    ("xml:space", Some("xml"), "space", Namespace::Xml),
    ("xmlns", None, "xmlns", Namespace::Xmlns),
    ("xmlns:xlink", Some("xmlns"), "xlink", Namespace::Xmlns),
];

/// [§ 13.2.6.1 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// Splits `xlink:href` and friends into prefix, local name and namespace.
///
/// ```
/// use sapling_dom::{Attribute, Namespace};
/// use sapling_html::parser::foreign_content::adjust_foreign_attributes;
///
/// let mut attrs = vec![Attribute::new("xlink:href", "#a")];
/// adjust_foreign_attributes(&mut attrs);
/// assert_eq!(attrs[0].name, "href");
/// assert_eq!(attrs[0].prefix.as_deref(), Some("xlink"));
/// assert_eq!(attrs[0].namespace, Some(Namespace::XLink));
/// ```
pub fn adjust_foreign_attributes(attributes: &mut [Attribute]) {
    for attr in attributes.iter_mut() {
        if let Some(&(_, prefix, local, namespace)) = FOREIGN_ATTRIBUTE_ADJUSTMENTS
            .iter()
            .find(|(from, ..)| *from == attr.name)
        {
            attr.name = local.to_owned();
            attr.prefix = prefix.map(str::to_owned);
            attr.namespace = Some(namespace);
        }
    }
}

/// Start tags that leave foreign content and go back to HTML rules.
fn is_breakout_start_tag(token: &Token) -> bool {
    let Token::StartTag { name, .. } = token else {
        return false;
    };
    match name.as_str() {
        "b" | "big" | "blockquote" | "body" | "br" | "center" | "code" | "dd" | "div" | "dl"
        | "dt" | "em" | "embed" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "head" | "hr"
        | "i" | "img" | "li" | "listing" | "menu" | "meta" | "nobr" | "ol" | "p" | "pre"
        | "ruby" | "s" | "small" | "span" | "strong" | "strike" | "sub" | "sup" | "table"
        | "tt" | "u" | "ul" | "var" => true,
        // "A start tag whose tag name is "font", if the token has any
        // attributes named "color", "face", or "size""
        "font" => ["color", "face", "size"]
            .iter()
            .any(|attr| token.attribute(attr).is_some()),
        _ => false,
    }
}

impl HTMLParser {
    /// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    pub(crate) fn process_in_foreign_content(&mut self, token: &Token) -> Step {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Insert a U+FFFD REPLACEMENT CHARACTER character."
            Token::Character { data: '\0' } => {
                self.parse_error(ParseError::UnexpectedNull);
                self.insert_character('\u{FFFD}');
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE"
            // "Insert the token's character."
            Token::Character { data } if token.is_whitespace_character() => {
                self.insert_character(*data);
            }

            // "Any other character token"
            // "Insert the token's character. Set the frameset-ok flag to "not ok"."
            Token::Character { data } => {
                self.insert_character(*data);
                self.frameset_ok = false;
            }

            // "A comment token"
            Token::Comment { data } => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => self.parse_error(ParseError::UnexpectedDoctype),

            // "A start tag whose tag name is one of: ..."
            // "An end tag whose tag name is "br", "p""
            // "Parse error. While the current node is not a MathML text
            // integration point, an HTML integration point, or an element in
            // the HTML namespace, pop elements from the stack of open
            // elements. Reprocess the token according to the rules given in
            // the section corresponding to the current insertion mode in HTML
            // content."
            _ if is_breakout_start_tag(token) || token.is_end_tag("br") || token.is_end_tag("p") => {
                match token {
                    Token::StartTag { name, .. } => {
                        self.parse_error(ParseError::UnexpectedStartTag(name.clone()));
                    }
                    Token::EndTag { name } => {
                        self.parse_error(ParseError::UnexpectedEndTag(name.clone()));
                    }
                    _ => {}
                }
                while let Some(node) = self.open_elements.top() {
                    let name = self.current_node_name();
                    if name.ns == Namespace::Html
                        || is_mathml_text_integration_point(name)
                        || self.is_html_integration_point(node)
                    {
                        break;
                    }
                    let _ = self.open_elements.pop();
                }
                return Step::ProcessAsHtml;
            }

            // "Any other start tag"
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                self.insert_foreign_start_tag(name, *self_closing, attributes);
            }

            // "An end tag whose tag name is "script", if the current node is
            // an SVG script element"
            // "Pop the current node off the stack of open elements." No
            // script is ever run.
            Token::EndTag { name }
                if name == "script" && self.current_node_name().is(Namespace::Svg, "script") =>
            {
                let _ = self.open_elements.pop();
            }

            // "Any other end tag"
            Token::EndTag { name } => return self.foreign_end_tag(name),

            Token::EndOfFile => return Step::ProcessAsHtml,
        }
        Step::Done
    }

    /// The "any other start tag" rule of foreign content.
    fn insert_foreign_start_tag(&mut self, name: &str, self_closing: bool, attributes: &[Attribute]) {
        let ns = self
            .adjusted_current_node_name()
            .map_or(Namespace::Html, |adjusted| adjusted.ns);
        let mut attributes = attributes.to_vec();
        let mut local = name.to_owned();

        // "If the adjusted current node is an element in the MathML
        // namespace, adjust MathML attributes for the token."
        // "If the adjusted current node is an element in the SVG namespace,
        // and the token's tag name is one of the ones in the first column of
        // the following table, change the tag name to the name given in the
        // corresponding cell in the second column."
        // "If the adjusted current node is an element in the SVG namespace,
        // adjust SVG attributes for the token."
        match ns {
            Namespace::MathMl => adjust_mathml_attributes(&mut attributes),
            Namespace::Svg => {
                local = adjust_svg_tag_name(name).to_owned();
                adjust_svg_attributes(&mut attributes);
            }
            _ => {}
        }

        // "Adjust foreign attributes for the token."
        adjust_foreign_attributes(&mut attributes);

        // "Insert a foreign element for the token, with adjusted current
        // node's namespace and false."
        let _ = self.insert_element(QualName::new(ns, local), attributes, false);

        // "If the token has its self-closing flag set, then run the
        // appropriate steps from the following list:"
        // "If the token's tag name is "script", and the new current node is
        // in the SVG namespace": "Acknowledge the token's self-closing flag,
        // and then act as described in the steps for a "script" end tag
        // below."
        // "Otherwise": "Pop the current node off the stack of open elements
        // and acknowledge the token's self-closing flag."
        // Both come down to the same thing since scripts never run.
        if self_closing {
            let _ = self.open_elements.pop();
            self.acknowledge_self_closing_flag();
        }
    }

    /// The "any other end tag" rule of foreign content.
    fn foreign_end_tag(&mut self, tag: &str) -> Step {
        // "1. Initialize node to be the current node (the bottommost node of
        // the stack).
        // 2. If node's tag name, converted to ASCII lowercase, is not the
        // same as the tag name of the token, then this is a parse error."
        let mut index = self.open_elements.len() - 1;
        if !self.current_node_name().local.eq_ignore_ascii_case(tag) {
            self.parse_error(ParseError::UnexpectedEndTag(tag.to_owned()));
        }

        loop {
            // "3. Loop: If node is the topmost element in the stack of open
            // elements, then return. (fragment case)"
            if index == 0 {
                return Step::Done;
            }
            let Some(node) = self.open_elements.get(index) else {
                return Step::Done;
            };

            // "4. If node's tag name, converted to ASCII lowercase, is the same
            // as the tag name of the token, pop elements from the stack of
            // open elements until node has been popped from the stack, and
            // then return."
            if self
                .open_elements
                .name_at(index)
                .is_some_and(|name| name.local.eq_ignore_ascii_case(tag))
            {
                self.open_elements.pop_until(node);
                return Step::Done;
            }

            // "5. Set node to the previous entry in the stack of open elements.
            // 6. If node is not an element in the HTML namespace, return to
            // the step labeled loop.
            // 7. Otherwise, process the token according to the rules given in
            // the section corresponding to the current insertion mode in HTML
            // content."
            index -= 1;
            if self
                .open_elements
                .name_at(index)
                .is_some_and(|name| name.ns == Namespace::Html)
            {
                return Step::ProcessAsHtml;
            }
        }
    }
}
