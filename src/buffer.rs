/// Indent unit: two spaces per nesting level.
pub(crate) const INDENT: &str = "  ";

/// Growable output buffer for the formatter.
///
/// Output is accumulated left to right and never rewound, with one exception:
/// trailing whitespace is stripped immediately before a structural token is
/// written. `trim_trailing_whitespace` pops complete code points, so stripping
/// is safe on any content.
#[derive(Debug, Default)]
pub(crate) struct OutputBuffer {
    buf: String,
}

impl OutputBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, ch: char) {
        self.buf.push(ch);
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Append the indent for the given nesting depth. Depth 0 is no indent.
    pub(crate) fn push_indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.buf.push_str(INDENT);
        }
    }

    /// Remove the trailing run of whitespace (spaces, tabs, newlines).
    pub(crate) fn trim_trailing_whitespace(&mut self) {
        let trimmed_len = self.buf.trim_end().len();
        self.buf.truncate(trimmed_len);
    }

    pub(crate) fn ends_with_whitespace(&self) -> bool {
        self.buf.ends_with(|c: char| c.is_whitespace())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}
