//! Line records
//!
//! One [`LineRecord`] per physical line of a document. The record keeps the
//! exact text that will be written back (`verbatim`) next to the logical
//! fields extracted by the classifier.

use serde::Serialize;
use std::ops::Range;

use super::classifier::{KEY_VALUE_SEPARATOR, SECTION_CLOSE, SECTION_OPEN};

/// Classification of a physical line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    /// `[name]` header
    Section,
    /// `key=value` entry
    KeyValue,
    /// Comment, blank or malformed line
    Ignored,
}

/// One physical line of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    /// Line classification
    pub kind: LineKind,

    /// Section the line belongs to (empty above the first header)
    pub section: String,

    /// Entry key, empty unless `kind` is [`LineKind::KeyValue`]
    pub key: String,

    /// Raw entry value (quotes included), trimmed of surrounding whitespace
    pub value: String,

    /// Exact text written on save
    pub verbatim: String,

    /// Byte range of `value` inside `verbatim`
    #[serde(skip)]
    pub value_span: Range<usize>,
}

impl LineRecord {
    /// A line that carries no entry; kept as-is on save
    pub fn ignored(section: impl Into<String>, verbatim: impl Into<String>) -> Self {
        LineRecord {
            kind: LineKind::Ignored,
            section: section.into(),
            key: String::new(),
            value: String::new(),
            verbatim: verbatim.into(),
            value_span: 0..0,
        }
    }

    /// A freshly rendered `[name]` header
    pub fn header(section: &str) -> Self {
        LineRecord {
            kind: LineKind::Section,
            section: section.to_string(),
            key: String::new(),
            value: String::new(),
            verbatim: format!("{}{}{}", SECTION_OPEN, section, SECTION_CLOSE),
            value_span: 0..0,
        }
    }

    /// A freshly rendered `key=value` entry
    pub fn entry(section: &str, key: &str, value: &str) -> Self {
        let verbatim = format!("{}{}{}", key, KEY_VALUE_SEPARATOR, value);
        let start = key.len() + KEY_VALUE_SEPARATOR.len_utf8();

        LineRecord {
            kind: LineKind::KeyValue,
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            verbatim,
            value_span: start..start + value.len(),
        }
    }

    pub fn is_entry(&self) -> bool {
        self.kind == LineKind::KeyValue
    }

    pub fn is_header(&self) -> bool {
        self.kind == LineKind::Section
    }

    /// Everything before the value: indentation, key, `=` and any
    /// whitespace that followed it
    pub fn prefix(&self) -> &str {
        &self.verbatim[..self.value_span.start]
    }

    /// Everything after the value: trailing whitespace and comment
    pub fn trailing(&self) -> &str {
        &self.verbatim[self.value_span.end..]
    }

    /// Splice a new rendered value into the line
    ///
    /// Keeps [`prefix`](Self::prefix) and [`trailing`](Self::trailing)
    /// untouched and re-anchors `value_span` on the new text.
    pub(crate) fn replace_value(&mut self, rendered: &str) {
        let start = self.value_span.start;
        let mut verbatim =
            String::with_capacity(self.verbatim.len() - self.value.len() + rendered.len());
        verbatim.push_str(self.prefix());
        verbatim.push_str(rendered);
        verbatim.push_str(self.trailing());

        self.verbatim = verbatim;
        self.value = rendered.to_string();
        self.value_span = start..start + rendered.len();
    }

    /// Drop everything after the value
    pub(crate) fn truncate_trailing(&mut self) {
        self.verbatim.truncate(self.value_span.end);
    }
}
