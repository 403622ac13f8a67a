/// A cursor over the Unicode code points of a string.
///
/// The formatter scans code points rather than bytes or UTF-16 units so that
/// multi-byte characters (including surrogate-pair characters such as emoji)
/// can never be split mid-scan.
#[derive(Debug)]
pub(crate) struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    pub(crate) fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    /// Consume and return the next character, or `None` at end of input.
    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        Some(ch)
    }

    /// Look at the character `offset` positions ahead of the cursor without
    /// consuming anything. `peek(0)` is the character `bump` would return next.
    pub(crate) fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// The character immediately before the most recently consumed one.
    ///
    /// Used for the backslash-escape check inside string literals: after
    /// consuming a quote, `prev()` is the character that preceded it.
    pub(crate) fn prev(&self) -> Option<char> {
        self.pos.checked_sub(2).and_then(|i| self.chars.get(i).copied())
    }

    /// Consume characters while `pred` holds. Returns how many were consumed.
    pub(crate) fn advance_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let start = self.pos;
        while let Some(ch) = self.peek(0) {
            if !pred(ch) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_and_peek() {
        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.peek(0), Some('a'));
        assert_eq!(cursor.peek(2), Some('c'));
        assert_eq!(cursor.peek(3), None);
        assert_eq!(cursor.bump(), Some('a'));
        assert_eq!(cursor.peek(0), Some('b'));
        assert_eq!(cursor.bump(), Some('b'));
        assert_eq!(cursor.bump(), Some('c'));
        assert_eq!(cursor.bump(), None);
    }

    #[test]
    fn test_prev() {
        let mut cursor = Cursor::new("x\\\"");
        assert_eq!(cursor.prev(), None);
        cursor.bump(); // x
        assert_eq!(cursor.prev(), None);
        cursor.bump(); // backslash
        assert_eq!(cursor.prev(), Some('x'));
        cursor.bump(); // quote
        assert_eq!(cursor.prev(), Some('\\'));
    }

    #[test]
    fn test_advance_while() {
        let mut cursor = Cursor::new("   abc");
        let skipped = cursor.advance_while(|c| c.is_whitespace());
        assert_eq!(skipped, 3);
        assert_eq!(cursor.bump(), Some('a'));
        // No-op when the predicate fails immediately
        assert_eq!(cursor.advance_while(|c| c.is_whitespace()), 0);
    }

    #[test]
    fn test_multibyte_code_points() {
        let mut cursor = Cursor::new("a🦀b");
        assert_eq!(cursor.bump(), Some('a'));
        assert_eq!(cursor.bump(), Some('🦀'));
        assert_eq!(cursor.prev(), Some('a'));
        assert_eq!(cursor.bump(), Some('b'));
        assert_eq!(cursor.peek(0), None);
    }
}
