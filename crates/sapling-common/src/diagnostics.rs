//! Parse diagnostics collected during a parse.
//!
//! A [`Diagnostics`] context is created by the caller and handed to the
//! tokenizer and tree builder. Reports are deduplicated so a malformed
//! document does not produce the same message for the same markup twice.
//! Nothing here is process-wide: two parses with two contexts never observe
//! each other's reports.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::span::Span;

/// How serious a diagnostic is.
///
/// Parse errors in HTML are always recoverable, so the tokenizer and tree
/// builder only ever report [`Severity::Warning`]. [`Severity::Error`] is
/// available to front ends that want to escalate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A recoverable problem in the input.
    Warning,
    /// A problem the caller considers fatal.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// One report: which component raised it, what it says, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity of the report.
    pub severity: Severity,
    /// Component that raised it, e.g. `"tokenizer"` or `"tree-builder"`.
    pub component: &'static str,
    /// Human readable message.
    pub message: String,
    /// Source range of the token being processed.
    pub span: Span,
}

impl Diagnostic {
    /// Create a warning.
    #[must_use]
    pub fn warning(component: &'static str, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Warning,
            component,
            message: message.into(),
            span,
        }
    }

    /// Render with a `line:column` location computed from `source`.
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        let (line, column) = self.span.line_col(source);
        format!(
            "[{}] {}: {} at {line}:{column}",
            self.component, self.severity, self.message
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} at {}..{}",
            self.component, self.severity, self.message, self.span.start, self.span.end
        )
    }
}

/// The diagnostics context threaded through a parse.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    seen: HashSet<(&'static str, String, Span)>,
}

impl Diagnostics {
    /// An empty, silent context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a warning from `component` about the markup at `span`.
    pub fn warn(&mut self, component: &'static str, message: impl Into<String>, span: Span) {
        self.report(Diagnostic::warning(component, message, span));
    }

    /// Record `diagnostic` unless an identical one was already recorded.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        let key = (
            diagnostic.component,
            diagnostic.message.clone(),
            diagnostic.span,
        );
        if self.seen.insert(key) {
            self.entries.push(diagnostic);
        }
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded diagnostics in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Recorded diagnostics as a slice.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Whether any recorded message contains `needle`.
    #[must_use]
    pub fn contains_message(&self, needle: &str) -> bool {
        self.entries.iter().any(|d| d.message.contains(needle))
    }

    /// Forget everything, including the deduplication set.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.seen.clear();
    }

    /// Consume the context, returning the recorded diagnostics.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
