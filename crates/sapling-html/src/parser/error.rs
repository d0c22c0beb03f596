use thiserror::Error;

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// Tree construction parse errors. The standard names few of these, so the
/// variants describe the situation the tree builder recovered from. None of
/// them change what the tree builder does next.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A DOCTYPE that is not `<!DOCTYPE html>` or one of the allowed legacy forms.
    #[error("non-conforming DOCTYPE")]
    NonConformingDoctype,
    /// Content before any DOCTYPE.
    #[error("missing DOCTYPE")]
    MissingDoctype,
    /// A DOCTYPE after the initial insertion mode.
    #[error("unexpected DOCTYPE")]
    UnexpectedDoctype,
    /// A start tag the current insertion mode does not allow.
    #[error("unexpected start tag <{0}>")]
    UnexpectedStartTag(String),
    /// An end tag the current insertion mode does not allow.
    #[error("unexpected end tag </{0}>")]
    UnexpectedEndTag(String),
    /// An end tag with no matching element in scope.
    #[error("no <{0}> element in scope")]
    NotInScope(String),
    /// An end tag that closes an element other than the current node.
    #[error("end tag </{0}> closes elements that are still open")]
    UnclosedChildren(String),
    /// Text where only whitespace is allowed.
    #[error("unexpected text {0:?}")]
    UnexpectedCharacter(char),
    /// Text in a table that had to be foster parented.
    #[error("non-whitespace text in a table")]
    TextInTable,
    /// A U+0000 NULL character token.
    #[error("unexpected NULL character")]
    UnexpectedNull,
    /// End of file while elements other than the implicitly closed ones are open.
    #[error("unexpected end of file with <{0}> open")]
    EofWithOpenElement(String),
    /// End of file inside a raw text or RCDATA element.
    #[error("unexpected end of file in <{0}>")]
    EofInText(String),
    /// "non-void-html-element-start-tag-with-trailing-solidus"
    #[error("self-closing syntax on non-void element <{0}>")]
    NonVoidSelfClosing(String),
    /// The adoption agency found a formatting element that is no longer open.
    #[error("formatting element <{0}> is not open")]
    FormattingElementNotOpen(String),
    /// The adoption agency found a formatting element out of scope.
    #[error("formatting element <{0}> is not in scope")]
    FormattingElementNotInScope(String),
    /// The adoption agency closed a formatting element that was not the current node.
    #[error("misnested formatting element <{0}>")]
    MisnestedFormattingElement(String),
    /// A start tag for an element that is already open and may not nest.
    #[error("<{0}> may not be nested")]
    NestedElement(String),
}
