//! Disk I/O for INI documents
//!
//! Reading splits a byte stream into trimmed lines, accepting `\n`, `\r\n`
//! and a lone `\r` as terminators. Writing joins lines with one terminator
//! after every line.

use crate::error::Result;
use crate::options::LineTerminator;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Split text into trimmed lines
///
/// With `preserve_blank_lines` off, lines that are empty after trimming are
/// dropped. A terminator at the very end does not produce an extra line.
pub fn split_lines(text: &str, preserve_blank_lines: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let (line, tail) = match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(at) => {
                let width = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
                (&rest[..at], &rest[at + width..])
            }
            None => (rest, ""),
        };

        let line = line.trim();
        if preserve_blank_lines || !line.is_empty() {
            lines.push(line.to_string());
        }
        rest = tail;
    }

    lines
}

/// Read a file into trimmed lines
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_lines<P: AsRef<Path>>(path: P, preserve_blank_lines: bool) -> Result<Vec<String>> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    Ok(split_lines(
        &String::from_utf8_lossy(&buffer),
        preserve_blank_lines,
    ))
}

/// Write lines to a file, each followed by `terminator`
///
/// The file is created or truncated.
pub fn write_lines<P, I, S>(path: P, lines: I, terminator: LineTerminator) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    let mut writer = BufWriter::new(file);
    let terminator = terminator.as_str().as_bytes();
    for line in lines {
        writer.write_all(line.as_ref().as_bytes())?;
        writer.write_all(terminator)?;
    }
    writer.flush()?;

    Ok(())
}
