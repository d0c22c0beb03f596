/// Settings for one parse.
///
/// ```
/// use sapling_html::ParserOptions;
///
/// let options = ParserOptions::default().with_scripting(true);
/// assert!(options.scripting);
/// assert!(!options.trace_modes);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// [§ 13.2.4.5 The scripting flag](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    ///
    /// "The scripting flag is set to "enabled" if scripting was enabled for
    /// the Document with which the parser is associated when the parser was
    /// created, and "disabled" otherwise."
    ///
    /// No script ever runs. The flag only decides how `<noscript>` parses.
    pub scripting: bool,

    /// Log each token dispatch at `debug` level instead of `trace`.
    pub trace_modes: bool,
}

impl ParserOptions {
    /// Set the scripting flag.
    #[must_use]
    pub const fn with_scripting(mut self, scripting: bool) -> Self {
        self.scripting = scripting;
        self
    }

    /// Log token dispatch at `debug` level.
    #[must_use]
    pub const fn with_trace_modes(mut self, trace_modes: bool) -> Self {
        self.trace_modes = trace_modes;
        self
    }
}
