//! Value codec
//!
//! A [`Value`] is an opaque byte sequence as stored in an entry. Typed views
//! are produced on demand and never fail: text that does not parse as the
//! requested type decodes to that type's zero value.
//!
//! Values containing a comment trigger are wrapped in double quotes when they
//! are written into a line, and every typed view strips surrounding quotes.

use super::classifier::{COMMENT_TRIGGERS, QUOTE};
use std::borrow::Cow;
use std::fmt;

/// Separator between items of an array value
pub const ARRAY_SEPARATOR: &str = ",";

/// How booleans are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolStyle {
    /// `true` / `false`
    #[default]
    Word,
    /// `1` / `0`
    Digit,
}

/// Raw entry value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Value(Vec<u8>);

impl Value {
    /// Empty value (what a missing entry resolves to)
    pub fn empty() -> Self {
        Value(Vec::new())
    }

    /// Wrap raw bytes without any trimming or quoting
    pub fn from_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Value(bytes.into())
    }

    pub fn from_bool(b: bool, style: BoolStyle) -> Self {
        let s = match (style, b) {
            (BoolStyle::Word, true) => "true",
            (BoolStyle::Word, false) => "false",
            (BoolStyle::Digit, true) => "1",
            (BoolStyle::Digit, false) => "0",
        };
        Value(s.as_bytes().to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Stored text, quotes included
    pub fn raw(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Stored text with surrounding quotes removed
    pub fn text(&self) -> Cow<'_, str> {
        match self.raw() {
            Cow::Borrowed(s) => Cow::Borrowed(unquote(s)),
            Cow::Owned(s) => Cow::Owned(unquote(&s).to_string()),
        }
    }

    /// Text as it should appear after `key=` in a line
    ///
    /// Quotes are added when the text holds a comment trigger, unless
    /// `without_quotes` is set or the text is already quoted.
    pub fn render(&self, without_quotes: bool) -> String {
        let raw = self.raw();
        if without_quotes || !needs_quotes(&raw) || is_quoted(&raw) {
            raw.into_owned()
        } else {
            format!("{}{}{}", QUOTE, raw, QUOTE)
        }
    }

    pub fn as_string(&self) -> String {
        self.text().into_owned()
    }

    /// `true` for `1` or any casing of `true`
    pub fn as_bool(&self) -> bool {
        let text = self.text();
        text == "1" || text.eq_ignore_ascii_case("true")
    }

    pub fn as_u8(&self) -> u8 {
        self.parse()
    }

    pub fn as_i8(&self) -> i8 {
        self.parse()
    }

    pub fn as_i16(&self) -> i16 {
        self.parse()
    }

    pub fn as_i32(&self) -> i32 {
        self.parse()
    }

    pub fn as_i64(&self) -> i64 {
        self.parse()
    }

    pub fn as_u64(&self) -> u64 {
        self.parse()
    }

    pub fn as_f32(&self) -> f32 {
        self.parse()
    }

    pub fn as_f64(&self) -> f64 {
        self.parse()
    }

    /// Comma separated items; an empty value has no items
    pub fn as_string_array(&self) -> Vec<String> {
        let text = self.text();
        if text.is_empty() {
            return Vec::new();
        }
        text.split(ARRAY_SEPARATOR).map(str::to_string).collect()
    }

    fn parse<T>(&self) -> T
    where
        T: std::str::FromStr + Default,
    {
        self.text().trim().parse().unwrap_or_default()
    }
}

/// Whether `text` holds a comment trigger: one of `#`, `'`, backtick, `;`,
/// or two consecutive `/`
pub fn needs_quotes(text: &str) -> bool {
    text.contains(|c: char| c != '/' && COMMENT_TRIGGERS.contains(&c)) || text.contains("//")
}

/// Whether `text` is wrapped in a pair of double quotes
pub fn is_quoted(text: &str) -> bool {
    text.len() >= 2 && text.starts_with(QUOTE) && text.ends_with(QUOTE)
}

/// Strip one pair of surrounding double quotes
pub fn unquote(text: &str) -> &str {
    if is_quoted(text) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl From<&str> for Value {
    /// Text values are trimmed of surrounding whitespace
    fn from(s: &str) -> Self {
        Value(s.trim().as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::from(s.as_str())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::from(s.as_str())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::from_bool(b, BoolStyle::Word)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value(n.to_string().into_bytes())
                }
            }
        )*
    };
}

impl_from_number!(u8, i8, i16, i32, i64, u64, f32, f64);

impl From<&[&str]> for Value {
    fn from(items: &[&str]) -> Self {
        Value(items.join(ARRAY_SEPARATOR).into_bytes())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value(items.join(ARRAY_SEPARATOR).into_bytes())
    }
}

impl From<&[String]> for Value {
    fn from(items: &[String]) -> Self {
        Value(items.join(ARRAY_SEPARATOR).into_bytes())
    }
}
