//! INI document core
//!
//! - [`error`] - Error type and `Result` alias
//! - [`line`] - One record per physical line
//! - [`classifier`] - Line scanner: section header, entry or ignored
//! - [`index`] - Section name to line span lookup
//! - [`document`] - Line arena plus index; `get` and `set`
//! - [`value`] - Value codec and quoting rules
//! - [`options`] - Parse and write policy, loadable from TOML
//! - [`io`] - Line splitting, file read and write
//! - [`observer`] - Load notifications
//!
//! ## Layout
//!
//! ```text
//! lines:  0 ; comment        ┐
//!         1 top=1            ┘ ""  [0, 2)
//!         2
//!         3 [A]
//!         4 a1=1             ┐
//!         5 a2=2             ┘ "A" [4, 6)
//!         6 [B]
//!         7 b1=1             ─ "B" [7, 8)
//! ```
//!
//! A new key for `A` is inserted at position 6; the span of `A` becomes
//! `[4, 7)` and the span of `B` moves to `[8, 9)`.

pub mod classifier;
pub mod document;
pub mod error;
pub mod index;
pub mod io;
pub mod line;
pub mod observer;
pub mod options;
pub mod value;

pub use classifier::classify;
pub use document::{Document, Entry, SetOutcome};
pub use error::{IniError, Result};
pub use index::{SectionIndex, SectionSpan};
pub use line::{LineKind, LineRecord};
pub use observer::{LoadObserver, SilentObserver, TracingObserver};
pub use options::{LineTerminator, Options};
pub use value::{BoolStyle, Value};
