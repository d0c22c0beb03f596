//! The seam between the tokenizer and whatever consumes its tokens.

use sapling_common::{Diagnostics, Span};

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;

/// What the consumer wants the tokenizer to do after a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSinkResult {
    /// Keep tokenizing in the current state.
    Continue,
    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    ///
    /// "switch the tokenizer to the RCDATA state" (or RAWTEXT, script data,
    /// PLAINTEXT). Applied before the next input character is consumed.
    SwitchTo(TokenizerState),
}

/// A consumer of tokens, driven by [`HTMLTokenizer::run`].
pub trait TokenSink {
    /// Handle one token. Diagnostics about the token go to `diagnostics`.
    fn process_token(
        &mut self,
        token: Token,
        span: Span,
        diagnostics: &mut Diagnostics,
    ) -> TokenSinkResult;

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "If there is an adjusted current node and it is not an element in the
    /// HTML namespace" then `<![CDATA[` opens a CDATA section.
    fn adjusted_current_node_is_foreign(&self) -> bool {
        false
    }
}

/// A sink that records every token. Useful for tooling and tests.
#[derive(Debug, Default)]
pub struct TokenCollector {
    /// Tokens in emission order, paired with their spans.
    pub tokens: Vec<(Token, Span)>,
}

impl TokenSink for TokenCollector {
    fn process_token(
        &mut self,
        token: Token,
        span: Span,
        _diagnostics: &mut Diagnostics,
    ) -> TokenSinkResult {
        self.tokens.push((token, span));
        TokenSinkResult::Continue
    }
}

/// Tokenize `input` on its own, with no tree builder steering the state
/// machine. Raw-text elements are therefore tokenized as ordinary markup.
pub fn tokenize(input: &str, diagnostics: &mut Diagnostics) -> Vec<(Token, Span)> {
    let mut collector = TokenCollector::default();
    HTMLTokenizer::new(input).run(&mut collector, diagnostics);
    collector.tokens
}
