//! Line classifier
//!
//! A single left-to-right scan that turns one physical line into one
//! [`LineRecord`]. The scan is driven by an explicit [`State`] so that
//! section capture, key capture, value capture and quoted spans cannot
//! overlap.
//!
//! ```text
//!   BeforeContent ──'['──▶ InSection ──']'──▶ AfterSection
//!        │
//!        └─other──▶ InKey ──'='──▶ BeforeValue ──'"'──▶ InQuotedValue
//!                     │                │                     │
//!                   blank              └─other──▶ InValue ◀──┘ closing '"'
//!                     │                              │
//!                     └──────▶ Done ◀──── comment ───┘
//! ```
//!
//! Comment triggers (`#`, `'`, backtick, `;`, `//`) end the meaningful part
//! of a line when they are the first content character or follow
//! whitespace. They never fire inside a quoted span.

use super::line::{LineKind, LineRecord};
use std::ops::Range;
use tracing::trace;

pub const SECTION_OPEN: char = '[';
pub const SECTION_CLOSE: char = ']';
pub const KEY_VALUE_SEPARATOR: char = '=';
pub const QUOTE: char = '"';

/// Characters that can start a comment. `/` only counts when doubled,
/// here and in [`needs_quotes`](crate::value::needs_quotes).
pub const COMMENT_TRIGGERS: [char; 5] = ['#', '\'', '`', ';', '/'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Skipping leading whitespace
    BeforeContent,
    /// Inside `[...]`, name starts at the byte offset
    InSection { start: usize },
    /// Capturing a key that starts at the byte offset
    InKey { start: usize },
    /// After `=`, skipping whitespace before the value
    BeforeValue,
    /// Capturing an unquoted value
    InValue,
    /// Inside `"..."`, closing quote at the byte offset
    InQuotedValue { close: usize },
    /// Header closed; the rest of the line is not scanned
    AfterSection { start: usize, end: usize },
    /// Comment or malformed text reached; the rest of the line is not scanned
    Done,
}

/// Whitespace that separates tokens
pub fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Whether `c` at byte offset `at` starts a comment, ignoring context
fn is_comment_start(line: &str, at: usize, c: char) -> bool {
    match c {
        '/' => line[at + 1..].starts_with('/'),
        '#' | '\'' | '`' | ';' => true,
        _ => false,
    }
}

/// Whether a key can be written as `key=value` and read back unchanged
pub fn is_plain_key(key: &str) -> bool {
    let Some(first) = key.chars().next() else {
        return false;
    };

    first != SECTION_OPEN
        && !is_comment_start(key, 0, first)
        && !key.chars().any(|c| is_blank(c) || c == KEY_VALUE_SEPARATOR)
}

/// Whether a section name can be written as `[name]` and read back unchanged
pub fn is_plain_section(name: &str) -> bool {
    !name.contains(SECTION_CLOSE) && !name.contains(|c: char| c == '\n' || c == '\r')
}

/// Classify one line
///
/// `previous` is the record of the line above; its section carries forward
/// onto entries and ignored lines.
pub fn classify(line: &str, previous: Option<&LineRecord>) -> LineRecord {
    let section = previous.map(|p| p.section.as_str()).unwrap_or_default();
    let mut record = LineRecord::ignored(section, line);

    let mut state = State::BeforeContent;
    // True at the first content character and after whitespace
    let mut after_blank = true;
    let mut key: Option<Range<usize>> = None;
    let mut value = 0..0;

    for (at, c) in line.char_indices() {
        if matches!(state, State::AfterSection { .. } | State::Done) {
            break;
        }

        let blank = is_blank(c);
        let comment = after_blank && is_comment_start(line, at, c);

        match state {
            State::BeforeContent => {
                if !blank {
                    state = match c {
                        _ if comment => State::Done,
                        SECTION_OPEN => State::InSection { start: at + 1 },
                        // Empty key
                        KEY_VALUE_SEPARATOR => State::Done,
                        _ => State::InKey { start: at },
                    };
                }
            }
            State::InSection { start } => {
                if c == SECTION_CLOSE {
                    state = State::AfterSection { start, end: at };
                }
            }
            State::InKey { start } => {
                if blank {
                    // Keys cannot contain whitespace
                    state = State::Done;
                } else if c == KEY_VALUE_SEPARATOR {
                    key = Some(start..at);
                    value = at + 1..at + 1;
                    state = State::BeforeValue;
                }
            }
            State::BeforeValue => {
                if comment {
                    state = State::Done;
                } else if !blank {
                    value = at..at + c.len_utf8();
                    state = State::InValue;
                    if c == QUOTE {
                        // Unterminated quotes are ordinary characters
                        if let Some(close) = line[at + 1..].rfind(QUOTE) {
                            state = State::InQuotedValue {
                                close: at + 1 + close,
                            };
                        }
                    }
                }
            }
            State::InValue => {
                if comment {
                    state = State::Done;
                } else if !blank {
                    value.end = at + c.len_utf8();
                }
            }
            State::InQuotedValue { close } => {
                value.end = at + c.len_utf8();
                if at == close {
                    state = State::InValue;
                }
            }
            State::AfterSection { .. } | State::Done => {}
        }

        after_blank = blank;
    }

    if let State::AfterSection { start, end } = state {
        record.kind = LineKind::Section;
        record.section = line[start..end].to_string();
        trace!(section = %record.section, "section header");
    } else if let Some(key) = key {
        record.kind = LineKind::KeyValue;
        record.key = line[key].to_string();
        record.value = line[value.clone()].to_string();
        record.value_span = value;
        trace!(section = %record.section, key = %record.key, value = %record.value, "entry");
    } else {
        trace!(line = line, "ignored");
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(line: &str) -> (String, String) {
        let record = classify(line, None);
        assert_eq!(record.kind, LineKind::KeyValue, "line {:?}", line);
        (record.key, record.value)
    }

    fn kind(line: &str) -> LineKind {
        classify(line, None).kind
    }

    #[test]
    fn test_section_header() {
        let record = classify("[General Settings]", None);
        assert_eq!(record.kind, LineKind::Section);
        assert_eq!(record.section, "General Settings");
        assert_eq!(record.verbatim, "[General Settings]");
    }

    #[test]
    fn test_section_header_with_trailing_comment() {
        let record = classify("  [db] ; database", None);
        assert_eq!(record.kind, LineKind::Section);
        assert_eq!(record.section, "db");
    }

    #[test]
    fn test_unclosed_section_is_ignored() {
        assert_eq!(kind("[broken"), LineKind::Ignored);
    }

    #[test]
    fn test_simple_entry() {
        assert_eq!(entry("name=value"), ("name".into(), "value".into()));
        assert_eq!(entry("empty="), ("empty".into(), "".into()));
    }

    #[test]
    fn test_key_with_space_is_ignored() {
        assert_eq!(kind("my key=value"), LineKind::Ignored);
        assert_eq!(kind("key =value"), LineKind::Ignored);
    }

    #[test]
    fn test_empty_key_is_ignored() {
        assert_eq!(kind("=value"), LineKind::Ignored);
    }

    #[test]
    fn test_line_without_separator_is_ignored() {
        assert_eq!(kind("just_words"), LineKind::Ignored);
    }

    #[test]
    fn test_value_is_trimmed() {
        let record = classify("k=   spaced out   ", None);
        assert_eq!(record.value, "spaced out");
        assert_eq!(&record.verbatim[record.value_span.clone()], "spaced out");
    }

    #[test]
    fn test_comment_lines() {
        for line in ["# hash", "; semi", "' tick", "` backtick", "// slashes", ""] {
            let record = classify(line, None);
            assert_eq!(record.kind, LineKind::Ignored, "line {:?}", line);
            assert_eq!(record.verbatim, line);
        }
    }

    #[test]
    fn test_comment_after_whitespace() {
        assert_eq!(entry("change=4 ' comment").1, "4");
        assert_eq!(entry("same=Never change this\t// comment").1, "Never change this");
        assert_eq!(entry("a=1 ; one").1, "1");
        assert_eq!(entry("a=1 # one").1, "1");
        assert_eq!(entry("a=1 ` one").1, "1");
    }

    #[test]
    fn test_trigger_inside_token_is_not_a_comment() {
        assert_eq!(entry("ignore=I'will ignore this").1, "I'will ignore this");
        assert_eq!(entry("url=https://example.com/x").1, "https://example.com/x");
        assert_eq!(entry("k=#first").1, "#first");
    }

    #[test]
    fn test_single_slash_is_not_a_comment() {
        assert_eq!(entry("path=a / b").1, "a / b");
    }

    #[test]
    fn test_comment_right_after_separator_whitespace() {
        let record = classify("k= ; nothing here", None);
        assert_eq!(record.kind, LineKind::KeyValue);
        assert_eq!(record.value, "");
        assert_eq!(record.value_span, 2..2);
    }

    #[test]
    fn test_quoted_value_suppresses_comments() {
        assert_eq!(entry(r#"k="a ; b # c" ; real"#).1, r#""a ; b # c""#);
        assert_eq!(entry(r#"k="//not a comment""#).1, r#""//not a comment""#);
    }

    #[test]
    fn test_quoted_value_uses_last_quote() {
        assert_eq!(entry(r#"k="say "hi" ; now" # c"#).1, r#""say "hi" ; now""#);
    }

    #[test]
    fn test_unterminated_quote_is_ordinary() {
        assert_eq!(entry(r#"k="open ended"#).1, r#""open ended"#);
        assert_eq!(entry(r#"k="open ; closed"#).1, r#""open"#);
    }

    #[test]
    fn test_section_carries_forward() {
        let header = classify("[net]", None);
        let entry = classify("port=80", Some(&header));
        assert_eq!(entry.section, "net");
        let comment = classify("# trailing", Some(&entry));
        assert_eq!(comment.section, "net");
    }

    #[test]
    fn test_entries_before_header_use_empty_section() {
        let record = classify("top=1", None);
        assert_eq!(record.section, "");
    }

    #[test]
    fn test_plain_key_rules() {
        assert!(is_plain_key("name"));
        assert!(is_plain_key("a.b-c_d"));
        assert!(!is_plain_key(""));
        assert!(!is_plain_key("two words"));
        assert!(!is_plain_key("a=b"));
        assert!(!is_plain_key("[x"));
        assert!(!is_plain_key("#x"));
        assert!(!is_plain_key("//x"));
        assert!(is_plain_key("/x"));
    }

    #[test]
    fn test_plain_section_rules() {
        assert!(is_plain_section("with spaces"));
        assert!(!is_plain_section("a]b"));
        assert!(!is_plain_section("a\nb"));
    }

    #[test]
    fn test_multibyte_values() {
        assert_eq!(entry("greeting=héllo wörld ; c").1, "héllo wörld");
    }
}
