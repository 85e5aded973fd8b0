//! Document options
//!
//! Options can be built in code or read from a TOML file:
//!
//! ```toml
//! case_sensitive = false
//! force_save_without_quotes = false
//! preserve_blank_lines = true
//! blank_line_before_new_section = true
//! line_terminator = "lf"
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Line terminator written between lines on save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineTerminator {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// `\r`
    Cr,
    /// `\r\n` on Windows, `\n` elsewhere
    #[default]
    Native,
    /// `\r\n` on Windows, `\r` elsewhere (compatibility with older writers)
    Legacy,
}

impl LineTerminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineTerminator::Lf => "\n",
            LineTerminator::CrLf => "\r\n",
            LineTerminator::Cr => "\r",
            LineTerminator::Native if cfg!(windows) => "\r\n",
            LineTerminator::Native => "\n",
            LineTerminator::Legacy if cfg!(windows) => "\r\n",
            LineTerminator::Legacy => "\r",
        }
    }
}

/// Parsing and writing policy of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Compare section and key names exactly (default: fold case)
    pub case_sensitive: bool,

    /// Never wrap values in quotes, even when they hold comment triggers
    pub force_save_without_quotes: bool,

    /// Keep empty lines when reading a file
    pub preserve_blank_lines: bool,

    /// Write an empty line before a section created by `set`
    pub blank_line_before_new_section: bool,

    /// Terminator used on save
    pub line_terminator: LineTerminator,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            case_sensitive: false,
            force_save_without_quotes: false,
            preserve_blank_lines: true,
            blank_line_before_new_section: false,
            line_terminator: LineTerminator::Native,
        }
    }
}

impl Options {
    /// Parse options from TOML text; missing fields take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read options from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Set case sensitivity
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Disable quoting on save
    pub fn with_force_save_without_quotes(mut self, force: bool) -> Self {
        self.force_save_without_quotes = force;
        self
    }

    /// Keep or drop empty lines on load
    pub fn with_preserve_blank_lines(mut self, preserve: bool) -> Self {
        self.preserve_blank_lines = preserve;
        self
    }

    /// Separate new sections with an empty line
    pub fn with_blank_line_before_new_section(mut self, blank: bool) -> Self {
        self.blank_line_before_new_section = blank;
        self
    }

    /// Set the line terminator
    pub fn with_line_terminator(mut self, terminator: LineTerminator) -> Self {
        self.line_terminator = terminator;
        self
    }
}
