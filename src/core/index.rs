//! Section index
//!
//! Maps section names to the half-open range of line positions the section
//! occupies in the document arena. Spans are plain index pairs; the index is
//! kept consistent by shifting spans whenever a line is inserted.

use serde::Serialize;

/// Line range occupied by one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSpan {
    /// Lookup name (upper-cased when the index is case-insensitive)
    pub name: String,

    /// First position after the header line
    pub begin: usize,

    /// One past the last entry assigned to the section
    pub end: usize,
}

impl SectionSpan {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Section name -> span lookup
///
/// The span of the unnamed top-level section (`""`) always exists and starts
/// at position 0.
#[derive(Debug, Clone)]
pub struct SectionIndex {
    spans: Vec<SectionSpan>,
    case_sensitive: bool,
}

impl SectionIndex {
    pub fn new(case_sensitive: bool) -> Self {
        SectionIndex {
            spans: vec![SectionSpan {
                name: String::new(),
                begin: 0,
                end: 0,
            }],
            case_sensitive,
        }
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Lookup name for `section` under the case policy
    pub fn fold(&self, section: &str) -> String {
        if self.case_sensitive {
            section.to_string()
        } else {
            section.to_uppercase()
        }
    }

    fn position(&self, section: &str) -> Option<usize> {
        let name = self.fold(section);
        self.spans.iter().position(|span| span.name == name)
    }

    pub fn get(&self, section: &str) -> Option<&SectionSpan> {
        let i = self.position(section)?;
        Some(&self.spans[i])
    }

    pub fn get_mut(&mut self, section: &str) -> Option<&mut SectionSpan> {
        let i = self.position(section)?;
        Some(&mut self.spans[i])
    }

    pub fn contains(&self, section: &str) -> bool {
        self.position(section).is_some()
    }

    /// Record a header line for `section` at document position `header`
    ///
    /// A first header creates an empty span right after it; a repeated
    /// header stretches the existing span up to the new header.
    pub fn open(&mut self, section: &str, header: usize) {
        match self.get_mut(section) {
            Some(span) => span.end = header + 1,
            None => {
                let name = self.fold(section);
                self.spans.push(SectionSpan {
                    name,
                    begin: header + 1,
                    end: header + 1,
                });
            }
        }
    }

    /// Record an entry of `section` at document position `line`
    pub fn extend(&mut self, section: &str, line: usize) {
        if let Some(span) = self.get_mut(section) {
            span.end = line + 1;
        }
    }

    /// Add a span for a section appended at the end of the document
    pub fn push(&mut self, section: &str, begin: usize, end: usize) {
        let name = self.fold(section);
        self.spans.push(SectionSpan { name, begin, end });
    }

    /// Account for one line inserted at `at` into `section`
    ///
    /// The target span grows by one; every other span with a bound after the
    /// insertion point moves forward by one.
    pub fn shift_after_insert(&mut self, section: &str, at: usize) {
        let target = self.fold(section);
        for span in &mut self.spans {
            if span.name == target {
                span.end += 1;
                continue;
            }
            if span.begin > at {
                span.begin += 1;
            }
            if span.end > at {
                span.end += 1;
            }
        }
    }

    /// Spans in order of first appearance, starting with the top-level span
    pub fn spans(&self) -> impl Iterator<Item = &SectionSpan> {
        self.spans.iter()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
