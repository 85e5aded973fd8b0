//! # inidoc - Round-trip preserving INI documents
//!
//! `inidoc` loads an INI file into an ordered arena of lines, answers
//! section/key lookups, edits values in place and writes the file back with
//! every untouched line byte-for-byte as it was read:
//!
//! - **Comments and blank lines survive** a load/save cycle
//! - **In-place edits**: only the value part of a line is rewritten, trailing
//!   comments stay where they were
//! - **Typed views** of values (`as_i32`, `as_bool`, `as_string_array`, ...)
//!   that never fail
//! - **Case-insensitive** section and key names by default
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inidoc::{IniFile, Result};
//!
//! # fn main() -> Result<()> {
//! let mut ini = IniFile::load("settings.ini")?;
//!
//! let port = ini.get("server", "port").as_u64();
//! ini.set("server", "port", port + 1);
//! ini.set("server", "motd", "hello; world"); // written as "hello; world" in quotes
//!
//! ini.save()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## In memory
//!
//! ```rust
//! use inidoc::{Document, LineTerminator, Options};
//!
//! let mut doc = Document::parse("[db]\nhost=localhost ; primary\n", Options::default());
//! doc.set("DB", "HOST", "db.internal");
//!
//! assert_eq!(
//!     doc.to_text(LineTerminator::Lf),
//!     "[db]\nhost=db.internal ; primary\n"
//! );
//! ```
//!
//! ## Builder
//!
//! ```rust,no_run
//! use inidoc::{IniFileBuilder, LineTerminator, Result, SilentObserver};
//!
//! # fn main() -> Result<()> {
//! let ini = IniFileBuilder::new()
//!     .path("settings.ini")
//!     .case_sensitive(true)
//!     .line_terminator(LineTerminator::CrLf)
//!     .observer(SilentObserver)
//!     .load()?;
//!
//! println!("{} lines", ini.total_lines());
//! # Ok(())
//! # }
//! ```

pub mod core;

// Re-export core modules internally so crate:: paths in core still work
#[allow(unused_imports)]
pub(crate) use crate::core::{
    classifier, document, error, index, io, line, observer, options, value,
};

// Re-export core types that users need
pub use crate::core::{
    classifier::classify,
    document::{Document, Entry, SetOutcome},
    error::{IniError, Result},
    index::{SectionIndex, SectionSpan},
    line::{LineKind, LineRecord},
    observer::{LoadObserver, SilentObserver, TracingObserver},
    options::{LineTerminator, Options},
    value::{BoolStyle, Value},
};

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// An INI document bound to a file on disk
///
/// # Examples
///
/// ```rust,no_run
/// use inidoc::{IniFile, Result};
///
/// # fn main() -> Result<()> {
/// let mut ini = IniFile::load("app.ini")?;
/// ini.set("window", "width", 1280i32);
/// ini.save()?;
/// # Ok(())
/// # }
/// ```
pub struct IniFile {
    document: Document,
    filename: Option<PathBuf>,
    observer: Box<dyn LoadObserver>,
}

impl IniFile {
    /// Create an empty document that is not bound to a file yet
    pub fn new(options: Options) -> Self {
        IniFile {
            document: Document::new(options),
            filename: None,
            observer: Box::new(TracingObserver),
        }
    }

    /// Load a file with default options
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use inidoc::IniFile;
    ///
    /// let ini = IniFile::load("app.ini")?;
    /// println!("title = {}", ini.get("", "title"));
    /// # Ok::<(), inidoc::IniError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        IniFileBuilder::new().path(path.as_ref()).load()
    }

    fn read(path: PathBuf, options: Options, observer: Box<dyn LoadObserver>) -> Result<Self> {
        observer.load_started(&path);
        let started = Instant::now();

        let lines = io::read_lines(&path, options.preserve_blank_lines)?;
        let document = Document::from_lines(&lines, options);

        observer.load_finished(&path, document.len(), started.elapsed());

        Ok(IniFile {
            document,
            filename: Some(path),
            observer,
        })
    }

    /// Reload the bound file, discarding unsaved edits
    pub fn reload(&mut self) -> Result<()> {
        let path = self.filename.clone().ok_or(IniError::MissingPath)?;
        let observer = std::mem::replace(&mut self.observer, Box::new(SilentObserver));
        *self = Self::read(path, self.document.options().clone(), observer)?;
        Ok(())
    }

    /// Look up a value; missing entries yield an empty [`Value`]
    pub fn get(&self, section: &str, key: &str) -> Value {
        self.document.get(section, key)
    }

    /// Assign a value, see [`Document::set`]
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<Value>) -> SetOutcome {
        self.document.set(section, key, value)
    }

    /// Write the document back to the file it was loaded from
    pub fn save(&self) -> Result<()> {
        let path = self.filename.as_deref().ok_or(IniError::MissingPath)?;
        self.write(path)
    }

    /// Write the document to `path` and bind it to that file
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.write(path)?;
        self.filename = Some(path.to_path_buf());
        Ok(())
    }

    fn write(&self, path: &Path) -> Result<()> {
        let terminator = self.document.options().line_terminator;
        debug!("Writing {} lines to {:?}", self.document.len(), path);
        io::write_lines(path, self.document.lines(), terminator)?;
        info!("Saved {:?}", path);
        Ok(())
    }

    /// File the document is bound to
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Number of lines currently held
    pub fn total_lines(&self) -> usize {
        self.document.len()
    }

    pub fn options(&self) -> &Options {
        self.document.options()
    }

    pub fn set_options(&mut self, options: Options) {
        self.document.set_options(options);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Entries as a JSON array of `{section, key, value}` objects
    pub fn to_json(&self) -> Result<String> {
        self.document.to_json()
    }
}

impl Default for IniFile {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

/// Builder for [`IniFile`] with custom options
pub struct IniFileBuilder {
    path: Option<PathBuf>,
    options: Options,
    observer: Option<Box<dyn LoadObserver>>,
}

impl IniFileBuilder {
    /// Create a new IniFileBuilder with default settings
    pub fn new() -> Self {
        IniFileBuilder {
            path: None,
            options: Options::default(),
            observer: None,
        }
    }

    /// Set the file to load from and save to
    pub fn path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Replace all options at once
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.options.case_sensitive = case_sensitive;
        self
    }

    pub fn force_save_without_quotes(mut self, force: bool) -> Self {
        self.options.force_save_without_quotes = force;
        self
    }

    pub fn preserve_blank_lines(mut self, preserve: bool) -> Self {
        self.options.preserve_blank_lines = preserve;
        self
    }

    pub fn blank_line_before_new_section(mut self, blank: bool) -> Self {
        self.options.blank_line_before_new_section = blank;
        self
    }

    pub fn line_terminator(mut self, terminator: LineTerminator) -> Self {
        self.options.line_terminator = terminator;
        self
    }

    /// Receive load notifications (default: [`TracingObserver`])
    pub fn observer<O: LoadObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Load the file set with [`path`](Self::path)
    pub fn load(self) -> Result<IniFile> {
        let path = self.path.ok_or(IniError::MissingPath)?;
        let observer = self.observer.unwrap_or_else(|| Box::new(TracingObserver));
        IniFile::read(path, self.options, observer)
    }

    /// Build an empty document, bound to the path if one was set
    pub fn build(self) -> IniFile {
        debug!("Building empty document bound to {:?}", self.path);
        IniFile {
            document: Document::new(self.options),
            filename: self.path,
            observer: self.observer.unwrap_or_else(|| Box::new(TracingObserver)),
        }
    }
}

impl Default for IniFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
