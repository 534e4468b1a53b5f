//! Key string parser.
//!
//! Turns a raw dotted key such as `tables.table(0)[@type]` into a sequence
//! of [`KeySegment`]s. Parsing is total: malformed constructs (an unclosed
//! attribute marker, a parenthesized run that is not a valid index) degrade
//! to literal text instead of failing.

use super::segment::KeySegment;

/// Cursor-based parser for raw key strings.
pub struct Parser {
    chars: Vec<char>,
    position: usize,
    delimiter: char,
}

impl Parser {
    /// Creates a new parser over the given input.
    pub fn new(input: &str, delimiter: char) -> Self {
        Self {
            chars: input.chars().collect(),
            position: 0,
            delimiter,
        }
    }

    /// Parses the input into its segment sequence.
    pub fn parse(input: &str, delimiter: char) -> Vec<KeySegment> {
        Parser::new(input, delimiter).run()
    }

    fn run(&mut self) -> Vec<KeySegment> {
        let mut segments = Vec::new();
        let mut name = String::new();

        while let Some(ch) = self.peek() {
            if ch == self.delimiter {
                // A run of delimiters: pairs collapse to literal delimiter
                // characters, an unpaired trailing one separates segments.
                let mut run = 0;
                while self.peek() == Some(self.delimiter) {
                    self.next();
                    run += 1;
                }
                for _ in 0..run / 2 {
                    name.push(self.delimiter);
                }
                if run % 2 == 1 {
                    flush(&mut segments, &mut name);
                }
            } else if ch == '[' && self.peek_at(1) == Some('@') {
                match self.try_attribute() {
                    Some(attr) => {
                        flush(&mut segments, &mut name);
                        segments.push(KeySegment::attribute(attr));
                    }
                    None => {
                        // No closing bracket; keep the marker as literal text.
                        if let Some(c) = self.next() {
                            name.push(c);
                        }
                    }
                }
            } else if ch == '(' && !name.is_empty() {
                match self.try_index() {
                    Some(index) => {
                        segments.push(KeySegment::indexed(std::mem::take(&mut name), index));
                    }
                    None => {
                        if let Some(c) = self.next() {
                            name.push(c);
                        }
                    }
                }
            } else {
                name.push(ch);
                self.next();
            }
        }
        flush(&mut segments, &mut name);
        segments
    }

    /// Attempts to consume an `[@name]` attribute marker at the current
    /// position. Returns the attribute name, or `None` (without consuming
    /// anything) when the closing bracket is missing.
    fn try_attribute(&mut self) -> Option<String> {
        let mut lookahead = self.position + 2;
        let mut attr = String::new();
        loop {
            match self.chars.get(lookahead) {
                Some(']') => {
                    self.position = lookahead + 1;
                    return Some(attr);
                }
                Some(&c) => {
                    attr.push(c);
                    lookahead += 1;
                }
                None => return None,
            }
        }
    }

    /// Attempts to consume a `(n)` index suffix at the current position.
    ///
    /// The suffix is only recognized when the digits form a valid index and
    /// the character after the closing parenthesis is the end of input, a
    /// delimiter, or an attribute marker; anything else means the
    /// parentheses were literal text.
    fn try_index(&mut self) -> Option<usize> {
        let mut lookahead = self.position + 1;
        let mut digits = String::new();
        while let Some(c) = self.chars.get(lookahead) {
            if c.is_ascii_digit() {
                digits.push(*c);
                lookahead += 1;
            } else {
                break;
            }
        }
        if digits.is_empty() || self.chars.get(lookahead) != Some(&')') {
            return None;
        }
        let after = self.chars.get(lookahead + 1);
        let at_attribute = after == Some(&'[') && self.chars.get(lookahead + 2) == Some(&'@');
        if !(after.is_none() || after == Some(&self.delimiter) || at_attribute) {
            return None;
        }
        let index = digits.parse().ok()?;
        self.position = lookahead + 1;
        Some(index)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Returns the character `offset` positions ahead without advancing.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    /// Returns the next character and advances the cursor.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }
}

/// Pushes the accumulated name as a plain segment, skipping empty names so
/// leading, trailing and repeated separators never produce empty segments.
fn flush(segments: &mut Vec<KeySegment>, name: &mut String) {
    if !name.is_empty() {
        segments.push(KeySegment::new(std::mem::take(name)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<KeySegment> {
        Parser::parse(input, '.')
    }

    #[test]
    fn test_parse_simple_key() {
        let segments = parse("database.host");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], KeySegment::new("database"));
        assert_eq!(segments[1], KeySegment::new("host"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_index() {
        let segments = parse("tables.table(0)");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], KeySegment::indexed("table", 0));
    }

    #[test]
    fn test_parse_attribute() {
        let segments = parse("table[@type]");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], KeySegment::new("table"));
        assert_eq!(segments[1], KeySegment::attribute("type"));
    }

    #[test]
    fn test_parse_attribute_only() {
        let segments = parse("[@type]");
        assert_eq!(segments, vec![KeySegment::attribute("type")]);
    }

    #[test]
    fn test_parse_attribute_after_delimiter() {
        // Both `a[@b]` and `a.[@b]` denote the attribute `b` of `a`.
        assert_eq!(parse("a.[@b]"), parse("a[@b]"));
    }

    #[test]
    fn test_parse_index_then_attribute() {
        let segments = parse("field(1)[@dataType]");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], KeySegment::indexed("field", 1));
        assert_eq!(segments[1], KeySegment::attribute("dataType"));
    }

    #[test]
    fn test_parse_doubled_delimiter_is_literal() {
        let segments = parse("a..b");
        assert_eq!(segments, vec![KeySegment::new("a.b")]);
    }

    #[test]
    fn test_parse_odd_delimiter_run() {
        // Pairs collapse left to right, the unpaired one separates.
        let segments = parse("a...b");
        assert_eq!(segments, vec![KeySegment::new("a."), KeySegment::new("b")]);
    }

    #[test]
    fn test_parse_leading_and_trailing_delimiters_skipped() {
        let segments = parse(".a.b.");
        assert_eq!(segments, vec![KeySegment::new("a"), KeySegment::new("b")]);
    }

    #[test]
    fn test_parse_unclosed_attribute_is_literal() {
        let segments = parse("a[@b");
        assert_eq!(segments, vec![KeySegment::new("a[@b")]);
    }

    #[test]
    fn test_parse_non_numeric_parens_are_literal() {
        let segments = parse("a(x)");
        assert_eq!(segments, vec![KeySegment::new("a(x)")]);
    }

    #[test]
    fn test_parse_index_followed_by_text_is_literal() {
        let segments = parse("a(0)b");
        assert_eq!(segments, vec![KeySegment::new("a(0)b")]);
    }

    #[test]
    fn test_parse_empty_parens_are_literal() {
        let segments = parse("a()");
        assert_eq!(segments, vec![KeySegment::new("a()")]);
    }

    #[test]
    fn test_parse_custom_delimiter() {
        let segments = Parser::parse("a/b.c", '/');
        assert_eq!(segments, vec![KeySegment::new("a"), KeySegment::new("b.c")]);
    }

    #[test]
    fn test_parse_attribute_name_may_contain_delimiter() {
        let segments = parse("a[@b.c]");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], KeySegment::attribute("b.c"));
    }
}
