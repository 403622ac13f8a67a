use crate::buffer::OutputBuffer;
use crate::cursor::Cursor;

/// Scanner mode. At every position the formatter is in exactly one of these;
/// transitions depend only on the current character and the current mode.
/// This is a character-level machine, not a parser: it never validates
/// GraphQL grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    Normal,
    /// Inside a quoted literal, holding the delimiter that opened it.
    InString(char),
    /// Inside a `#` comment.
    InComment,
}

/// Pretty-print a GraphQL query.
///
/// Total over all string inputs: never panics, never errors, and tolerates
/// unbalanced input (excess closers clamp nesting at zero, unclosed openers
/// simply leave trailing depth). Quoted literals pass through untouched.
/// Formatting is idempotent.
///
/// Input lines are trimmed and joined with single spaces before scanning, so
/// original line breaks carry no meaning. One consequence: a `#` comment runs
/// to the end of the flattened stream, swallowing everything after it on any
/// line. Callers that need text after a comment to survive must strip
/// comments themselves first.
pub fn format(source: &str) -> String {
    let flat = flatten(source);
    let rendered = Formatter::new(&flat).run();
    postprocess(&rendered)
}

/// Trim every line and join them with single spaces, collapsing line-break
/// structure into one flat stream.
fn flatten(source: &str) -> String {
    source.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

/// Right-trim each line and drop the ones left empty.
fn postprocess(rendered: &str) -> String {
    rendered
        .split('\n')
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

struct Formatter {
    cursor: Cursor,
    out: OutputBuffer,
    /// Shared nesting counter: `{` and `(` both increment it, `}` and `)`
    /// both decrement it (floored at zero). Indentation is computed from
    /// this total, so a brace opened inside an argument list indents
    /// relative to combined nesting.
    depth: usize,
    /// Parenthesis nesting only. Decides whether a whitespace run renders as
    /// a single space (inside an argument list, or at top level) or as a
    /// line break into the current indent (inside a brace body).
    paren_depth: usize,
    state: ScanState,
}

impl Formatter {
    fn new(flat: &str) -> Self {
        Self {
            cursor: Cursor::new(flat),
            out: OutputBuffer::new(),
            depth: 0,
            paren_depth: 0,
            state: ScanState::Normal,
        }
    }

    fn run(mut self) -> String {
        while let Some(ch) = self.cursor.bump() {
            match self.state {
                ScanState::InString(delim) => self.scan_string(ch, delim),
                ScanState::InComment => self.scan_comment(ch),
                ScanState::Normal => self.scan_normal(ch),
            }
        }
        self.out.into_string()
    }

    /// Inside a quoted literal everything is copied verbatim; the literal
    /// ends at an unescaped quote matching the opening delimiter.
    fn scan_string(&mut self, ch: char, delim: char) {
        self.out.push(ch);
        if ch == delim && self.cursor.prev() != Some('\\') {
            self.state = ScanState::Normal;
        }
    }

    /// Comments are copied verbatim through the next newline. Flattening has
    /// already replaced every newline with a space, so in practice this
    /// copies through to end of input.
    fn scan_comment(&mut self, ch: char) {
        self.out.push(ch);
        if ch == '\n' {
            self.state = ScanState::Normal;
        }
    }

    fn scan_normal(&mut self, ch: char) {
        match ch {
            '"' | '\'' => {
                self.out.push(ch);
                self.state = ScanState::InString(ch);
            }
            '#' => {
                self.out.push(ch);
                self.state = ScanState::InComment;
            }
            '{' => self.open_brace(),
            '}' => self.close_brace(),
            '(' => self.open_paren(),
            ')' => self.close_paren(),
            _ if ch.is_whitespace() => self.whitespace(),
            _ => self.out.push(ch),
        }
    }

    fn open_brace(&mut self) {
        self.out.trim_trailing_whitespace();
        self.out.push_str(" {\n");
        self.depth += 1;
        self.out.push_indent(self.depth);
        self.cursor.advance_while(char::is_whitespace);
    }

    fn close_brace(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.out.trim_trailing_whitespace();
        self.out.push('\n');
        self.out.push_indent(self.depth);
        self.out.push('}');

        // Peek past whitespace: a sibling token after this closer starts a
        // fresh line; a stacked closer stays put.
        let mut ahead = 0;
        while let Some(next) = self.cursor.peek(ahead) {
            if !next.is_whitespace() {
                break;
            }
            ahead += 1;
        }
        if let Some(next) = self.cursor.peek(ahead) {
            if next != '}' {
                self.out.push('\n');
                self.out.push_indent(self.depth);
            }
        }
        self.cursor.advance_while(char::is_whitespace);
    }

    fn open_paren(&mut self) {
        self.out.push('(');
        self.depth += 1;
        self.paren_depth += 1;
        self.cursor.advance_while(char::is_whitespace);
    }

    fn close_paren(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.paren_depth = self.paren_depth.saturating_sub(1);
        self.out.trim_trailing_whitespace();
        self.out.push(')');
        self.cursor.advance_while(char::is_whitespace);
    }

    /// Collapse a whitespace run to one separator. Inside an argument list
    /// (and at top level) that separator is a space; inside a brace body it
    /// is a line break into the current indent, which is what puts sibling
    /// fields on their own lines.
    fn whitespace(&mut self) {
        if self.out.is_empty() || self.out.ends_with_whitespace() {
            return;
        }
        if self.paren_depth > 0 || self.depth == 0 {
            self.out.push(' ');
        } else {
            self.out.push('\n');
            self.out.push_indent(self.depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flatten_trims_and_joins() {
        assert_eq!(flatten("  a  \n   b\nc   "), "a b c");
        assert_eq!(flatten(""), "");
        assert_eq!(flatten("single"), "single");
    }

    #[test]
    fn test_flatten_handles_crlf() {
        assert_eq!(flatten("a\r\nb\r\n"), "a b");
    }

    #[test]
    fn test_flatten_keeps_interior_whitespace() {
        // Runs inside a line survive flattening; the scanner collapses them.
        assert_eq!(flatten("a   b\n\nc"), "a   b  c");
    }

    #[test]
    fn test_postprocess_drops_blank_lines() {
        assert_eq!(postprocess("\n}\n  \n}"), "}\n}");
        assert_eq!(postprocess(""), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format(""), "");
        assert_eq!(format("   \n \t \n"), "");
    }

    #[test]
    fn test_nested_selection_set() {
        let result = format("query { user(id: 1) { name email } }");
        assert_eq!(
            result,
            "query {\n  user(id: 1) {\n    name\n    email\n  }\n}"
        );
    }

    #[test]
    fn test_no_spaces_around_braces() {
        let result = format("query {user{name}}");
        assert_eq!(result, "query {\n  user {\n    name\n  }\n}");
    }

    #[test]
    fn test_whitespace_runs_collapse_at_top_level() {
        assert_eq!(format("query   GetUser   on"), "query GetUser on");
    }

    #[test]
    fn test_whitespace_runs_collapse_inside_arguments() {
        assert_eq!(format("f(a:    1,   b: 2)"), "f(a: 1, b: 2)");
    }

    #[test]
    fn test_tabs_collapse_like_spaces() {
        assert_eq!(format("query\t{\n\tid\n}"), "query {\n  id\n}");
    }

    #[test]
    fn test_excess_closers_clamp_depth() {
        // Never panics, never renders negative indentation.
        assert_eq!(format("}}}"), "}\n}\n}");
    }

    #[test]
    fn test_closer_then_sibling_token() {
        assert_eq!(format("a } b"), "a\n}\nb");
    }

    #[test]
    fn test_unclosed_opener_is_tolerated() {
        // No auto-close: trailing depth is simply left open.
        assert_eq!(format("query { user { name"), "query {\n  user {\n    name");
    }

    #[test]
    fn test_string_literal_hides_structural_characters() {
        let result = format("query { field(arg: \"a{b}c\") }");
        assert_eq!(result, "query {\n  field(arg: \"a{b}c\")\n}");
    }

    #[test]
    fn test_string_literal_hides_comment_marker() {
        let result = format("query { f(tag: \"#nope\") }");
        assert_eq!(result, "query {\n  f(tag: \"#nope\")\n}");
    }

    #[test]
    fn test_single_quoted_literal() {
        let result = format("query { f(tag: 'a(b)c') }");
        assert_eq!(result, "query {\n  f(tag: 'a(b)c')\n}");
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let result = format("mutation { say(phrase: \"she said \\\"hi\\\" loudly\") }");
        assert_eq!(
            result,
            "mutation {\n  say(phrase: \"she said \\\"hi\\\" loudly\")\n}"
        );
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        assert_eq!(format("q { f(a: \"oops) }"), "q {\n  f(a: \"oops) }");
    }

    #[test]
    fn test_comment_swallows_rest_of_flattened_stream() {
        // Flattening joins the lines with a space, so the comment consumes
        // everything after the marker, including the closing brace.
        let result = format("query { a # comment\n b }");
        assert_eq!(result, "query {\n  a\n  # comment b }");
    }

    #[test]
    fn test_comment_only_input() {
        assert_eq!(format("# just a note"), "# just a note");
    }

    #[test]
    fn test_anonymous_selection_set_keeps_leading_space() {
        // The opening brace always renders as " {", even at start of output.
        assert_eq!(format("{ id }"), " {\n  id\n}");
    }

    #[test]
    fn test_adjacent_open_braces_share_a_line() {
        // Trailing-whitespace stripping before "{" pulls stacked openers
        // onto one line.
        assert_eq!(format("{{}}"), " { {\n  }\n}");
    }

    #[test]
    fn test_shared_depth_counter_with_parens() {
        // A brace inside an argument list indents by total nesting, and its
        // closer lands at paren depth. Deliberate coupling.
        let result = format("query q(filter: { status: ACTIVE }) { id }");
        assert_eq!(
            result,
            "query q(filter: {\n    status: ACTIVE\n  }) {\n  id\n}"
        );
    }

    #[test]
    fn test_multiple_operations_each_start_fresh_lines() {
        let result = format("query A { id } query B { name }");
        assert_eq!(result, "query A {\n  id\n}\nquery B {\n  name\n}");
    }

    #[test]
    fn test_idempotent_on_nested_query() {
        let once = format("query { user(id: 1) { name email } }");
        assert_eq!(format(&once), once);
    }

    #[test]
    fn test_idempotent_on_unbalanced_input() {
        let once = format("}}} a } b");
        assert_eq!(format(&once), once);
    }

    #[test]
    fn test_non_ascii_content_passes_through() {
        let result = format("query { user(name: \"日本語🦀\") { bio } }");
        assert_eq!(
            result,
            "query {\n  user(name: \"日本語🦀\") {\n    bio\n  }\n}"
        );
    }

    #[test]
    fn test_variable_definitions_stay_inline() {
        let result = format("query GetUser($id: ID!, $n: Int) { user(id: $id) { name } }");
        assert_eq!(
            result,
            "query GetUser($id: ID!, $n: Int) {\n  user(id: $id) {\n    name\n  }\n}"
        );
    }

    #[test]
    fn test_fragment_spread() {
        let result = format("query { hero { ...heroFields } }");
        assert_eq!(result, "query {\n  hero {\n    ...heroFields\n  }\n}");
    }

    #[test]
    fn test_non_graphql_text_is_best_effort() {
        // No grammar validation: arbitrary text reformats without error.
        assert_eq!(format("hello world"), "hello world");
    }
}
