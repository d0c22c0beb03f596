//! Element categories used by tree construction.
//!
//! [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)

use sapling_dom::{Namespace, QualName};

/// [§ 13.2.4.2 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// "The following elements have varying levels of special parsing rules"
#[must_use]
pub fn is_special(name: &QualName) -> bool {
    match name.ns {
        Namespace::Html => matches!(
            name.local.as_str(),
            "address"
                | "applet"
                | "area"
                | "article"
                | "aside"
                | "base"
                | "basefont"
                | "bgsound"
                | "blockquote"
                | "body"
                | "br"
                | "button"
                | "caption"
                | "center"
                | "col"
                | "colgroup"
                | "dd"
                | "details"
                | "dir"
                | "div"
                | "dl"
                | "dt"
                | "embed"
                | "fieldset"
                | "figcaption"
                | "figure"
                | "footer"
                | "form"
                | "frame"
                | "frameset"
                | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "head"
                | "header"
                | "hgroup"
                | "hr"
                | "html"
                | "iframe"
                | "img"
                | "input"
                | "keygen"
                | "li"
                | "link"
                | "listing"
                | "main"
                | "marquee"
                | "menu"
                | "meta"
                | "nav"
                | "noembed"
                | "noframes"
                | "noscript"
                | "object"
                | "ol"
                | "p"
                | "param"
                | "plaintext"
                | "pre"
                | "script"
                | "search"
                | "section"
                | "select"
                | "source"
                | "style"
                | "summary"
                | "table"
                | "tbody"
                | "td"
                | "template"
                | "textarea"
                | "tfoot"
                | "th"
                | "thead"
                | "title"
                | "tr"
                | "track"
                | "ul"
                | "wbr"
                | "xmp"
        ),
        Namespace::MathMl => is_mathml_text_integration_point(name) || name.local == "annotation-xml",
        Namespace::Svg => matches!(name.local.as_str(), "foreignObject" | "desc" | "title"),
        _ => false,
    }
}

/// [§ 13.2.4.2 Formatting](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
///
/// "The following HTML elements are those that end up in the list of active
/// formatting elements: a, b, big, code, em, font, i, nobr, s, small,
/// strike, strong, tt, and u."
#[must_use]
pub fn is_formatting(local: &str) -> bool {
    matches!(
        local,
        "a" | "b"
            | "big"
            | "code"
            | "em"
            | "font"
            | "i"
            | "nobr"
            | "s"
            | "small"
            | "strike"
            | "strong"
            | "tt"
            | "u"
    )
}

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#closing-elements-that-have-implied-end-tags)
///
/// "while the current node is a dd element, a dt element, an li element, an
/// optgroup element, an option element, a p element, an rb element, an rp
/// element, an rt element, or an rtc element, the user agent must pop the
/// current node off the stack of open elements."
#[must_use]
pub fn has_implied_end_tag(name: &QualName) -> bool {
    name.ns == Namespace::Html
        && matches!(
            name.local.as_str(),
            "dd" | "dt" | "li" | "optgroup" | "option" | "p" | "rb" | "rp" | "rt" | "rtc"
        )
}

/// "generate all implied end tags thoroughly": the implied set plus the
/// table parts.
#[must_use]
pub fn has_implied_end_tag_thoroughly(name: &QualName) -> bool {
    has_implied_end_tag(name)
        || (name.ns == Namespace::Html
            && matches!(
                name.local.as_str(),
                "caption" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
            ))
}

/// [§ 13.2.6.5 MathML text integration point](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
///
/// "A node is a MathML text integration point if it is one of the following
/// elements: A MathML mi element, A MathML mo element, A MathML mn element,
/// A MathML ms element, A MathML mtext element"
#[must_use]
pub fn is_mathml_text_integration_point(name: &QualName) -> bool {
    name.ns == Namespace::MathMl
        && matches!(name.local.as_str(), "mi" | "mo" | "mn" | "ms" | "mtext")
}

/// Which "has an element in ... scope" variant to check.
///
/// [§ 13.2.4.2 Has an element in the specific scope](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// "has an element in scope"
    Default,
    /// "has an element in list item scope"
    ListItem,
    /// "has an element in button scope"
    Button,
    /// "has an element in table scope"
    Table,
    /// "has an element in select scope"
    Select,
}

impl Scope {
    /// Whether `name` is in the element type list that ends a search in this scope.
    #[must_use]
    pub fn is_boundary(self, name: &QualName) -> bool {
        match self {
            Self::Default => is_default_scope_boundary(name),
            Self::ListItem => {
                is_default_scope_boundary(name) || name.is_html("ol") || name.is_html("ul")
            }
            Self::Button => is_default_scope_boundary(name) || name.is_html("button"),
            Self::Table => {
                name.is_html("html") || name.is_html("table") || name.is_html("template")
            }
            // "all element types except the following: optgroup in the HTML
            // namespace, option in the HTML namespace"
            Self::Select => !(name.is_html("optgroup") || name.is_html("option")),
        }
    }
}

/// [§ 13.2.4.2 Has an element in scope](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
fn is_default_scope_boundary(name: &QualName) -> bool {
    match name.ns {
        Namespace::Html => matches!(
            name.local.as_str(),
            "applet" | "caption" | "html" | "table" | "td" | "th" | "marquee" | "object" | "template"
        ),
        Namespace::MathMl => is_mathml_text_integration_point(name) || name.local == "annotation-xml",
        Namespace::Svg => matches!(name.local.as_str(), "foreignObject" | "desc" | "title"),
        _ => false,
    }
}

/// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
///
/// The elements whose presence as the current node sends text through the
/// "in table text" mode and enables foster parenting.
#[must_use]
pub fn is_table_structure(name: &QualName) -> bool {
    name.ns == Namespace::Html
        && matches!(
            name.local.as_str(),
            "table" | "tbody" | "template" | "tfoot" | "thead" | "tr"
        )
}

/// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
///
/// The elements an end-of-file in body tolerates still being open without
/// a parse error.
#[must_use]
pub fn may_remain_open_at_eof(name: &QualName) -> bool {
    name.ns == Namespace::Html
        && matches!(
            name.local.as_str(),
            "dd" | "dt"
                | "li"
                | "optgroup"
                | "option"
                | "p"
                | "rb"
                | "rp"
                | "rt"
                | "rtc"
                | "tbody"
                | "td"
                | "tfoot"
                | "th"
                | "thead"
                | "tr"
                | "body"
                | "html"
        )
}
