//! Document store
//!
//! The document is a single ordered arena of [`LineRecord`]s plus a
//! [`SectionIndex`] of spans into that arena. Lookups and edits only touch
//! the span of the section involved; the whole arena is scanned once, when
//! the document is built.

use crate::classifier::{self, classify};
use crate::error::Result;
use crate::index::{SectionIndex, SectionSpan};
use crate::io;
use crate::line::{LineKind, LineRecord};
use crate::options::{LineTerminator, Options};
use crate::value::Value;
use serde::Serialize;
use tracing::{debug, warn};

/// Which branch a [`Document::set`] call took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The entry already held the rendered value
    Unchanged,
    /// An existing entry was rewritten in place
    Updated,
    /// A new entry was inserted into an existing section
    InsertedKey,
    /// A new section was appended with its first entry
    InsertedSection,
    /// Nothing written: empty value for a new entry, or an entry that would
    /// not read back
    Skipped,
}

impl SetOutcome {
    /// Whether the document changed
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            SetOutcome::Updated | SetOutcome::InsertedKey | SetOutcome::InsertedSection
        )
    }
}

/// Logical view of one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub section: String,
    pub key: String,
    /// Value with surrounding quotes removed
    pub value: String,
}

/// In-memory INI document
#[derive(Debug, Clone)]
pub struct Document {
    /// Every physical line, in file order
    lines: Vec<LineRecord>,

    /// Section spans over `lines`
    index: SectionIndex,

    options: Options,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Document {
    /// Create an empty document
    pub fn new(options: Options) -> Self {
        Document {
            lines: Vec::new(),
            index: SectionIndex::new(options.case_sensitive),
            options,
        }
    }

    /// Build a document from already split lines
    pub fn from_lines<I, S>(lines: I, options: Options) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut document = Self::new(options);
        for line in lines {
            document.push_line(line.as_ref());
        }
        document
    }

    /// Build a document from text
    pub fn parse(text: &str, options: Options) -> Self {
        let lines = io::split_lines(text, options.preserve_blank_lines);
        Self::from_lines(lines, options)
    }

    /// Classify one line and append it
    pub fn push_line(&mut self, line: &str) {
        let record = classify(line, self.lines.last());
        self.lines.push(record);
        self.track(self.lines.len() - 1);
    }

    /// Update the index for the record at `position`
    fn track(&mut self, position: usize) {
        let record = &self.lines[position];
        match record.kind {
            LineKind::Section => self.index.open(&record.section, position),
            LineKind::KeyValue => self.index.extend(&record.section, position),
            LineKind::Ignored => {}
        }
    }

    fn reindex(&mut self) {
        self.index = SectionIndex::new(self.options.case_sensitive);
        for position in 0..self.lines.len() {
            self.track(position);
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options; the index is rebuilt when the case policy changes
    pub fn set_options(&mut self, options: Options) {
        let rebuild = options.case_sensitive != self.options.case_sensitive;
        self.options = options;
        if rebuild {
            self.reindex();
        }
    }

    fn names_match(&self, a: &str, b: &str) -> bool {
        if self.options.case_sensitive {
            a == b
        } else {
            a.chars()
                .flat_map(char::to_uppercase)
                .eq(b.chars().flat_map(char::to_uppercase))
        }
    }

    /// Position of the entry `key` in `section`, searching only its span
    fn find_entry(&self, section: &str, key: &str) -> Option<usize> {
        let span = self.index.get(section)?;
        let end = span.end.min(self.lines.len());

        (span.begin..end).find(|&i| {
            let record = &self.lines[i];
            record.is_entry()
                && self.names_match(&record.section, section)
                && self.names_match(&record.key, key)
        })
    }

    /// Look up a value
    ///
    /// A missing section or key yields an empty [`Value`].
    pub fn get(&self, section: &str, key: &str) -> Value {
        self.find_entry(section, key)
            .map(|i| Value::from_raw(self.lines[i].value.as_bytes()))
            .unwrap_or_default()
    }

    pub fn contains(&self, section: &str, key: &str) -> bool {
        self.find_entry(section, key).is_some()
    }

    /// Assign a value
    ///
    /// - Missing section: the section and the entry are appended to the end.
    /// - Existing entry: only the value part of its line is rewritten, and
    ///   only if the rendered value differs from the stored one.
    /// - Missing entry: inserted after the last entry of the section.
    ///
    /// Empty values are never written as new entries, but an existing entry
    /// can be emptied.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<Value>) -> SetOutcome {
        let value = value.into();
        let rendered = value.render(self.options.force_save_without_quotes);

        if !classifier::is_plain_key(key)
            || !classifier::is_plain_section(section)
            || rendered.contains(|c: char| c == '\n' || c == '\r')
            || !reads_back(&LineRecord::entry(section, key, &rendered))
        {
            warn!("Skipping entry that would not read back: [{}] {:?}", section, key);
            return SetOutcome::Skipped;
        }

        let Some(span) = self.index.get(section) else {
            return self.append_section(section, key, &rendered);
        };
        let (begin, end) = (span.begin, span.end);

        if let Some(position) = self.find_entry(section, key) {
            if self.lines[position].value == rendered {
                return SetOutcome::Unchanged;
            }

            let mut record = self.lines[position].clone();
            record.replace_value(&rendered);
            if !reads_back(&record) {
                // A quote in the trailing comment would close the new value
                warn!("Dropping trailing comment of [{}] {}", section, key);
                record.truncate_trailing();
            }

            debug!("Updating [{}] {}={}", section, key, rendered);
            self.lines[position] = record;
            return SetOutcome::Updated;
        }

        if rendered.is_empty() {
            return SetOutcome::Skipped;
        }

        debug!("Inserting [{}] {}={} at line {}", section, key, rendered, end);
        let name = self.header_name(begin, section);
        self.lines.insert(end, LineRecord::entry(&name, key, &rendered));
        self.index.shift_after_insert(section, end);

        SetOutcome::InsertedKey
    }

    fn append_section(&mut self, section: &str, key: &str, rendered: &str) -> SetOutcome {
        if rendered.is_empty() {
            return SetOutcome::Skipped;
        }

        if self.options.blank_line_before_new_section
            && self.lines.last().is_some_and(|r| !r.verbatim.is_empty())
        {
            let carried = self.lines.last().map(|r| r.section.clone()).unwrap_or_default();
            self.lines.push(LineRecord::ignored(carried, ""));
        }

        debug!("Appending section [{}] with {}={}", section, key, rendered);
        let header = self.lines.len();
        self.lines.push(LineRecord::header(section));
        self.lines.push(LineRecord::entry(section, key, rendered));
        self.index.push(section, header + 1, header + 2);

        SetOutcome::InsertedSection
    }

    /// Spelling of the section as written in its header
    fn header_name(&self, begin: usize, fallback: &str) -> String {
        begin
            .checked_sub(1)
            .and_then(|header| self.lines.get(header))
            .filter(|record| record.is_header())
            .map(|record| record.section.clone())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Span of a section
    pub fn span(&self, section: &str) -> Option<&SectionSpan> {
        self.index.get(section)
    }

    /// All spans, the top-level span first
    pub fn spans(&self) -> impl Iterator<Item = &SectionSpan> {
        self.index.spans()
    }

    pub fn records(&self) -> &[LineRecord] {
        &self.lines
    }

    /// Verbatim text of every line
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|record| record.verbatim.as_str())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Names of sections with a header, in order of first appearance
    pub fn sections(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut names = Vec::new();
        for record in self.lines.iter().filter(|r| r.is_header()) {
            let folded = self.index.fold(&record.section);
            if !seen.contains(&folded) {
                seen.push(folded);
                names.push(record.section.clone());
            }
        }
        names
    }

    /// Keys of a section, in document order
    pub fn keys(&self, section: &str) -> Vec<String> {
        let Some(span) = self.index.get(section) else {
            return Vec::new();
        };
        let end = span.end.min(self.lines.len());

        self.lines[span.begin.min(end)..end]
            .iter()
            .filter(|r| r.is_entry() && self.names_match(&r.section, section))
            .map(|r| r.key.clone())
            .collect()
    }

    /// Every entry, in document order
    pub fn entries(&self) -> Vec<Entry> {
        self.lines
            .iter()
            .filter(|r| r.is_entry())
            .map(|r| Entry {
                section: r.section.clone(),
                key: r.key.clone(),
                value: Value::from_raw(r.value.as_bytes()).as_string(),
            })
            .collect()
    }

    /// Render the document, one terminator after every line
    pub fn to_text(&self, terminator: LineTerminator) -> String {
        let terminator = terminator.as_str();
        let mut text = String::new();
        for line in self.lines() {
            text.push_str(line);
            text.push_str(terminator);
        }
        text
    }

    /// Entries as a JSON array
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries())?)
    }
}

/// Whether classifying the line again yields the same key and value
fn reads_back(record: &LineRecord) -> bool {
    let reread = classify(&record.verbatim, None);
    reread.is_entry() && reread.key == record.key && reread.value == record.value
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
; settings
top=level

[A]
a1=1
a2=two ; comment

[B]
b1=x
";

    fn sample() -> Document {
        Document::parse(SAMPLE, Options::default())
    }

    #[test]
    fn test_parse_keeps_every_line() {
        let doc = sample();
        assert_eq!(doc.len(), 9);
        assert_eq!(doc.to_text(LineTerminator::Lf), SAMPLE);
    }

    #[test]
    fn test_spans_after_load() {
        let doc = sample();
        let top = doc.span("").unwrap();
        assert_eq!((top.begin, top.end), (0, 2));
        let a = doc.span("A").unwrap();
        assert_eq!((a.begin, a.end), (4, 6));
        let b = doc.span("B").unwrap();
        assert_eq!((b.begin, b.end), (8, 9));
    }

    #[test]
    fn test_get() {
        let doc = sample();
        assert_eq!(doc.get("", "top").as_string(), "level");
        assert_eq!(doc.get("A", "a1").as_i32(), 1);
        assert_eq!(doc.get("a", "A2").as_string(), "two");
        assert_eq!(doc.get("B", "b1").as_string(), "x");
    }

    #[test]
    fn test_get_missing_is_empty() {
        let doc = sample();
        assert!(doc.get("NoSuchSection", "k").is_empty());
        assert!(doc.get("A", "NoSuchKey").is_empty());
        assert!(doc.get("A", "b1").is_empty());
        assert_eq!(doc.len(), 9);
    }

    #[test]
    fn test_set_updates_in_place() {
        let mut doc = sample();
        assert_eq!(doc.set("A", "a2", "three"), SetOutcome::Updated);
        assert_eq!(doc.records()[5].verbatim, "a2=three ; comment");
        assert_eq!(doc.get("A", "a2").as_string(), "three");
        assert_eq!(doc.len(), 9);
    }

    #[test]
    fn test_set_same_value_is_unchanged() {
        let mut doc = sample();
        assert_eq!(doc.set("A", "a1", 1i32), SetOutcome::Unchanged);
        assert_eq!(doc.to_text(LineTerminator::Lf), SAMPLE);
    }

    #[test]
    fn test_set_new_key_goes_after_last_entry() {
        let mut doc = sample();
        assert_eq!(doc.set("A", "a3", 3i64), SetOutcome::InsertedKey);

        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines[6], "a3=3");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "[B]");

        let b = doc.span("B").unwrap();
        assert_eq!((b.begin, b.end), (9, 10));
        assert_eq!(doc.get("B", "b1").as_string(), "x");
    }

    #[test]
    fn test_set_top_level_key() {
        let mut doc = sample();
        assert_eq!(doc.set("", "second", "2"), SetOutcome::InsertedKey);
        assert_eq!(doc.records()[2].verbatim, "second=2");
        assert_eq!(doc.get("", "second").as_i32(), 2);
        assert_eq!(doc.get("A", "a1").as_i32(), 1);
        assert_eq!(doc.span("A").unwrap().begin, 5);
    }

    #[test]
    fn test_set_new_section() {
        let mut doc = sample();
        assert_eq!(doc.set("C", "c1", "see"), SetOutcome::InsertedSection);

        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(&lines[9..], &["[C]", "c1=see"]);
        let c = doc.span("C").unwrap();
        assert_eq!((c.begin, c.end), (10, 11));
    }

    #[test]
    fn test_set_new_section_with_separator() {
        let options = Options::default().with_blank_line_before_new_section(true);
        let mut doc = Document::parse("[A]\nk=v\n", options);
        doc.set("B", "k", "w");

        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines, vec!["[A]", "k=v", "", "[B]", "k=w"]);
        assert_eq!(doc.get("B", "k").as_string(), "w");
    }

    #[test]
    fn test_separator_not_added_to_empty_document() {
        let options = Options::default().with_blank_line_before_new_section(true);
        let mut doc = Document::new(options);
        doc.set("A", "k", "v");
        assert_eq!(doc.lines().collect::<Vec<_>>(), vec!["[A]", "k=v"]);
    }

    #[test]
    fn test_empty_value_asymmetry() {
        let mut doc = sample();
        assert_eq!(doc.set("A", "missing", ""), SetOutcome::Skipped);
        assert_eq!(doc.set("Nowhere", "missing", ""), SetOutcome::Skipped);
        assert_eq!(doc.len(), 9);

        assert_eq!(doc.set("A", "a1", ""), SetOutcome::Updated);
        assert_eq!(doc.records()[4].verbatim, "a1=");
        assert!(doc.contains("A", "a1"));
        assert!(doc.get("A", "a1").is_empty());
    }

    #[test]
    fn test_set_quotes_comment_triggers() {
        let mut doc = sample();
        doc.set("B", "b1", "a,b#c");
        assert_eq!(doc.records()[8].verbatim, "b1=\"a,b#c\"");
        assert_eq!(doc.get("B", "b1").as_string(), "a,b#c");
    }

    #[test]
    fn test_set_without_quotes() {
        let options = Options::default().with_force_save_without_quotes(true);
        let mut doc = Document::parse("[T]\nignore=x\n", options);
        doc.set("T", "ignore", "I'will change this");
        assert_eq!(doc.records()[1].verbatim, "ignore=I'will change this");
    }

    #[test]
    fn test_quote_in_trailing_comment_is_dropped() {
        let mut doc = Document::parse("[s]\nk=plain ; say \"hi\"\n", Options::default());
        assert_eq!(doc.set("s", "k", "a#b"), SetOutcome::Updated);
        assert_eq!(doc.records()[1].verbatim, "k=\"a#b\"");

        let reread = Document::parse(&doc.to_text(LineTerminator::Lf), Options::default());
        assert_eq!(reread.get("s", "k").as_string(), "a#b");
    }

    #[test]
    fn test_trailing_comment_kept_when_value_unquoted() {
        let mut doc = Document::parse("[s]\nk=plain ; say \"hi\"\n", Options::default());
        doc.set("s", "k", "other");
        assert_eq!(doc.records()[1].verbatim, "k=other ; say \"hi\"");
    }

    #[test]
    fn test_unquoted_comment_value_is_skipped() {
        let options = Options::default().with_force_save_without_quotes(true);
        let mut doc = Document::parse("[s]\nk=v\n", options);
        assert_eq!(doc.set("s", "k", "a ; b"), SetOutcome::Skipped);
        assert_eq!(doc.set("s", "new", "a ; b"), SetOutcome::Skipped);
        assert_eq!(doc.get("s", "k").as_string(), "v");
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_set_rejects_unreadable_names() {
        let mut doc = sample();
        assert_eq!(doc.set("A", "two words", "v"), SetOutcome::Skipped);
        assert_eq!(doc.set("A", "", "v"), SetOutcome::Skipped);
        assert_eq!(doc.set("bad]name", "k", "v"), SetOutcome::Skipped);
        assert_eq!(doc.set("A", "k", Value::from_raw("a\nb")), SetOutcome::Skipped);
        assert_eq!(doc.len(), 9);
    }

    #[test]
    fn test_inserted_key_uses_header_spelling() {
        let mut doc = Document::parse("[Server]\nhost=a\n", Options::default());
        doc.set("SERVER", "port", 80i32);
        assert_eq!(doc.records()[2].section, "Server");
        assert_eq!(doc.get("server", "PORT").as_i32(), 80);
    }

    #[test]
    fn test_reopened_section() {
        let mut doc = Document::parse("[a]\nx=1\n[b]\ny=2\n[a]\nz=3\n", Options::default());
        assert_eq!(doc.get("a", "x").as_i32(), 1);
        assert_eq!(doc.get("a", "z").as_i32(), 3);
        assert_eq!(doc.get("b", "y").as_i32(), 2);
        assert_eq!(doc.sections(), vec!["a", "b"]);
        assert_eq!(doc.keys("a"), vec!["x", "z"]);

        doc.set("a", "w", 4i32);
        assert_eq!(doc.lines().last(), Some("w=4"));
        assert_eq!(doc.get("b", "y").as_i32(), 2);
    }

    #[test]
    fn test_duplicate_key_first_wins() {
        let doc = Document::parse("[s]\nk=first\nk=second\n", Options::default());
        assert_eq!(doc.get("s", "k").as_string(), "first");
    }

    #[test]
    fn test_set_options_rebuilds_index() {
        let mut doc = Document::parse("[Mixed]\nKey=v\n", Options::default());
        assert_eq!(doc.get("MIXED", "key").as_string(), "v");

        doc.set_options(Options::default().with_case_sensitive(true));
        assert!(doc.get("MIXED", "key").is_empty());
        assert_eq!(doc.get("Mixed", "Key").as_string(), "v");
    }

    #[test]
    fn test_entries_and_json() {
        let doc = sample();
        let entries = doc.entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].section, "");
        assert_eq!(entries[2].value, "two");

        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(json[3]["key"], "b1");
    }
}
