use sapling_common::{Diagnostics, Span};
use sapling_dom::{DomTree, Namespace, NodeId, QualName};
use strum_macros::Display;

use super::error::ParseError;
use super::formatting::ActiveFormattingElements;
use super::open_elements::OpenElements;
use super::options::ParserOptions;
use super::tags::is_mathml_text_integration_point;
use crate::tokenizer::{Token, TokenSink, TokenSinkResult, TokenizerState};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// What a mode handler wants done with the token it was given.
///
/// Handlers never call back into the dispatcher themselves. "Reprocess the
/// token" is returned instead, so a long chain of mode switches is a loop in
/// [`HTMLParser::process`] rather than a deep call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    /// The token was handled.
    Done,
    /// "Switch the insertion mode to ... and reprocess the token."
    Reprocess(InsertionMode),
    /// Reprocess a different token in the current mode, as for `<image>`.
    ReprocessAs(Token),
    /// Run the current insertion mode's rules even though the adjusted
    /// current node is foreign. Used when foreign content closes elements
    /// and hands the token back to HTML content.
    ProcessAsHtml,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// The tree builder. It receives tokens one at a time from the tokenizer
/// (through [`TokenSink`]) and mutates its [`DomTree`].
#[derive(Debug)]
pub struct HTMLParser {
    /// The document being built. `NodeId::ROOT` is the Document node.
    pub(super) tree: DomTree,

    pub(super) options: ParserOptions,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) insertion_mode: InsertionMode,

    /// "the original insertion mode", saved when entering "text" and "in table text".
    pub(super) original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.1 The stack of template insertion modes](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    pub(super) template_insertion_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    pub(super) open_elements: OpenElements,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) active_formatting: ActiveFormattingElements,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(super) head_element_pointer: Option<NodeId>,

    /// "The form element pointer points to the last form element that was
    /// opened and whose end tag has not yet been seen."
    pub(super) form_element_pointer: Option<NodeId>,

    /// The fragment parsing context element and its name. `None` when
    /// parsing a whole document.
    pub(super) context_element: Option<(NodeId, QualName)>,

    /// [§ 13.2.6.1 Foster parenting](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,

    /// [§ 13.2.4.5 The frameset-ok flag](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    pub(super) frameset_ok: bool,

    /// "the pending table character tokens list"
    pub(super) pending_table_characters: String,

    /// Set after `<pre>`, `<listing>` and `<textarea>`: "If the next token is
    /// a U+000A LINE FEED (LF) character token, then ignore that token".
    pub(super) ignore_next_line_feed: bool,

    /// "acknowledge the token's self-closing flag"
    pub(super) self_closing_acknowledged: bool,

    /// Set by "stop parsing". Every later token is dropped.
    pub(super) stopped: bool,

    /// Errors raised while processing the current token, with the mode that
    /// raised them.
    pub(super) errors: Vec<(ParseError, InsertionMode)>,

    /// A tokenizer state change requested while processing the current token.
    pub(super) tokenizer_switch: Option<TokenizerState>,
}

impl HTMLParser {
    /// A tree builder for a whole document, starting in the "initial" mode.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            tree: DomTree::new(),
            options,
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            template_insertion_modes: Vec::new(),
            open_elements: OpenElements::new(),
            active_formatting: ActiveFormattingElements::new(),
            head_element_pointer: None,
            form_element_pointer: None,
            context_element: None,
            foster_parenting: false,
            frameset_ok: true,
            pending_table_characters: String::new(),
            ignore_next_line_feed: false,
            self_closing_acknowledged: false,
            stopped: false,
            errors: Vec::new(),
            tokenizer_switch: None,
        }
    }

    /// [§ 13.2.8 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// A tree builder for the children of an element named `context`.
    ///
    /// The context element lives in the arena but is never attached to the
    /// document. An `html` root is appended to the Document node and
    /// parsed content ends up under it.
    #[must_use]
    pub fn for_fragment(context: QualName, options: ParserOptions) -> Self {
        let mut parser = Self::new(options);

        // "Let root be the result of creating an html element..."
        // "Append the element root to the Document node created above."
        // "Set up the HTML parser's stack of open elements so that it
        // contains just the single element root."
        let context_id = parser.tree.alloc_element(context.clone(), Vec::new());
        let root = parser.tree.alloc_element(QualName::html("html"), Vec::new());
        parser.tree.append_child(NodeId::ROOT, root);
        parser.open_elements.push(root, QualName::html("html"));

        // "If the context element is a template element, then push "in
        // template" onto the stack of template insertion modes so that it is
        // the new current template insertion mode."
        if context.is_html("template") {
            parser.template_insertion_modes.push(InsertionMode::InTemplate);
        }

        let is_form = context.is_html("form");
        parser.context_element = Some((context_id, context));

        // "Reset the parser's insertion mode appropriately."
        parser.reset_insertion_mode_appropriately();

        // "Set the parser's form element pointer to the nearest node to the
        // context element that is a form element (going straight up the
        // ancestor chain, and including the element itself, if it is one)."
        // The context element has no ancestors here.
        if is_form {
            parser.form_element_pointer = Some(context_id);
        }
        parser
    }

    /// The document built so far.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Consume the tree builder and return its document.
    #[must_use]
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// The stack of open elements.
    #[must_use]
    pub const fn open_elements(&self) -> &OpenElements {
        &self.open_elements
    }

    /// The list of active formatting elements.
    #[must_use]
    pub const fn active_formatting_elements(&self) -> &ActiveFormattingElements {
        &self.active_formatting
    }

    /// The options this tree builder was created with.
    #[must_use]
    pub const fn options(&self) -> ParserOptions {
        self.options
    }

    /// Whether "stop parsing" has run.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Feed one token to the tree builder.
    ///
    /// Tree construction errors for the token are reported to `diagnostics`
    /// under the `tree-builder` component, tagged with the insertion mode
    /// that raised them. The return value tells the tokenizer whether to
    /// switch state before its next character.
    pub fn accept(
        &mut self,
        token: Token,
        span: Span,
        diagnostics: &mut Diagnostics,
    ) -> TokenSinkResult {
        if self.stopped {
            return TokenSinkResult::Continue;
        }

        if std::mem::take(&mut self.ignore_next_line_feed)
            && matches!(token, Token::Character { data: '\n' })
        {
            return TokenSinkResult::Continue;
        }

        let self_closing = match &token {
            Token::StartTag {
                name,
                self_closing: true,
                ..
            } => Some(name.clone()),
            _ => None,
        };
        self.self_closing_acknowledged = false;

        if self.options.trace_modes {
            log::debug!("{token} in {}", self.insertion_mode);
        } else {
            log::trace!("{token} in {}", self.insertion_mode);
        }

        self.process(token);

        // [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
        // "When a start tag token is emitted with its self-closing flag set,
        // if the flag is not acknowledged when it is processed by the tree
        // construction stage, that is a parse error."
        if let Some(name) = self_closing
            && !self.self_closing_acknowledged
        {
            self.parse_error(ParseError::NonVoidSelfClosing(name));
        }

        for (error, mode) in self.errors.drain(..) {
            diagnostics.warn("tree-builder", format!("{error} [{mode}]"), span);
        }

        match self.tokenizer_switch.take() {
            Some(state) => {
                log::trace!("tokenizer switches to {state:?}");
                TokenSinkResult::SwitchTo(state)
            }
            None => TokenSinkResult::Continue,
        }
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// Run the token through the dispatcher until some handler is done with it.
    pub(crate) fn process(&mut self, mut token: Token) {
        let mut as_html = false;
        loop {
            let step = if !as_html && self.is_foreign_content(&token) {
                self.process_in_foreign_content(&token)
            } else {
                self.process_using_rules_for(self.insertion_mode, &token)
            };
            as_html = false;
            match step {
                Step::Done => return,
                Step::Reprocess(mode) => self.switch_mode(mode),
                Step::ReprocessAs(replacement) => token = replacement,
                Step::ProcessAsHtml => as_html = true,
            }
            if self.stopped {
                return;
            }
        }
    }

    /// "process the token using the rules for the ... insertion mode"
    pub(crate) fn process_using_rules_for(&mut self, mode: InsertionMode, token: &Token) -> Step {
        match mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::InTemplate => self.handle_in_template_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// The tree construction dispatcher's choice between the current
    /// insertion mode and "the rules for parsing tokens in foreign content".
    fn is_foreign_content(&self, token: &Token) -> bool {
        let Some(node) = self.adjusted_current_node() else {
            // "If the stack of open elements is empty"
            return false;
        };
        let Some(name) = self.adjusted_current_node_name() else {
            return false;
        };

        // "If the adjusted current node is an element in the HTML namespace"
        if name.ns == Namespace::Html {
            return false;
        }

        let is_character = matches!(token, Token::Character { .. });
        let start_tag = match token {
            Token::StartTag { name, .. } => Some(name.as_str()),
            _ => None,
        };

        // "If the adjusted current node is a MathML text integration point and
        // the token is a start tag whose tag name is neither "mglyph" nor
        // "malignmark"" / "...and the token is a character token"
        if is_mathml_text_integration_point(name)
            && (is_character || start_tag.is_some_and(|tag| tag != "mglyph" && tag != "malignmark"))
        {
            return false;
        }

        // "If the adjusted current node is a MathML annotation-xml element and
        // the token is a start tag whose tag name is "svg""
        if name.is(Namespace::MathMl, "annotation-xml") && start_tag == Some("svg") {
            return false;
        }

        // "If the adjusted current node is an HTML integration point and the
        // token is a start tag" / "...and the token is a character token"
        if (start_tag.is_some() || is_character) && self.is_html_integration_point(node) {
            return false;
        }

        // "If the token is an end-of-file token"
        !token.is_eof()
    }

    /// [§ 13.2.6.5 HTML integration point](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
    ///
    /// "A node is an HTML integration point if it is one of the following
    /// elements: A MathML annotation-xml element whose start tag token had an
    /// attribute with the name "encoding" whose value was an ASCII
    /// case-insensitive match for the string "text/html"; ... for the string
    /// "application/xhtml+xml"; An SVG foreignObject element; An SVG desc
    /// element; An SVG title element"
    pub(crate) fn is_html_integration_point(&self, node: NodeId) -> bool {
        let Some(element) = self.tree.as_element(node) else {
            return false;
        };
        let name = &element.name;
        match name.ns {
            Namespace::MathMl if name.local == "annotation-xml" => element
                .get_attribute("encoding")
                .is_some_and(|encoding| {
                    encoding.eq_ignore_ascii_case("text/html")
                        || encoding.eq_ignore_ascii_case("application/xhtml+xml")
                }),
            Namespace::Svg => matches!(name.local.as_str(), "foreignObject" | "desc" | "title"),
            _ => false,
        }
    }

    /// "The current node is the bottommost node in this stack of open elements."
    ///
    /// # Panics
    /// Panics if nothing is open. Handlers that need a current node only run
    /// once the `html` element has been pushed.
    pub(crate) fn current_node(&self) -> NodeId {
        self.open_elements
            .top()
            .expect("the stack of open elements is empty")
    }

    /// The name of the current node. Panics like [`current_node`](Self::current_node).
    pub(crate) fn current_node_name(&self) -> &QualName {
        self.open_elements
            .top_name()
            .expect("the stack of open elements is empty")
    }

    /// [§ 13.2.4.2 Adjusted current node](https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node)
    ///
    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack
    /// of open elements has only one element in it (fragment case);
    /// otherwise, the adjusted current node is the current node."
    pub(crate) fn adjusted_current_node(&self) -> Option<NodeId> {
        match &self.context_element {
            Some((context, _)) if self.open_elements.len() == 1 => Some(*context),
            _ => self.open_elements.top(),
        }
    }

    /// The name of the [adjusted current node](Self::adjusted_current_node).
    pub(crate) fn adjusted_current_node_name(&self) -> Option<&QualName> {
        match &self.context_element {
            Some((_, name)) if self.open_elements.len() == 1 => Some(name),
            _ => self.open_elements.top_name(),
        }
    }

    /// Change the insertion mode.
    pub(crate) fn switch_mode(&mut self, mode: InsertionMode) {
        if mode != self.insertion_mode {
            log::debug!("insertion mode {} -> {mode}", self.insertion_mode);
        }
        self.insertion_mode = mode;
    }

    /// Ask the tokenizer to switch state before its next character.
    pub(crate) fn switch_tokenizer_to(&mut self, state: TokenizerState) {
        self.tokenizer_switch = Some(state);
    }

    /// Record a parse error. Tree construction carries on regardless.
    pub(crate) fn parse_error(&mut self, error: ParseError) {
        self.errors.push((error, self.insertion_mode));
    }

    /// "acknowledge the token's self-closing flag"
    pub(crate) const fn acknowledge_self_closing_flag(&mut self) {
        self.self_closing_acknowledged = true;
    }

    /// [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    ///
    /// "Pop all the nodes off the stack of open elements."
    pub(crate) fn stop_parsing(&mut self) {
        log::debug!("stop parsing in {}", self.insertion_mode);
        self.open_elements.clear();
        self.stopped = true;
    }

    /// The current template insertion mode, if any template is open.
    pub(crate) fn current_template_insertion_mode(&self) -> Option<InsertionMode> {
        self.template_insertion_modes.last().copied()
    }
}

impl TokenSink for HTMLParser {
    fn process_token(
        &mut self,
        token: Token,
        span: Span,
        diagnostics: &mut Diagnostics,
    ) -> TokenSinkResult {
        self.accept(token, span, diagnostics)
    }

    fn adjusted_current_node_is_foreign(&self) -> bool {
        self.adjusted_current_node_name()
            .is_some_and(|name| name.ns != Namespace::Html)
    }
}
