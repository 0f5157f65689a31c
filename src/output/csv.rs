//! CSV report writer.
//!
//! Every report starts with a fixed header and holds one line per entry:
//!
//! ```text
//! "FullPath","Type","Size","CreationTime","LastAccessTime","LastWriteTime"
//! "C:\Data","Directory","0","2024-01-02 03:04:05","2024-01-02 03:04:05","2024-01-02 03:04:05"
//! "C:\Data\a.txt","File","12","2024-01-02 03:04:05",,"2024-01-02 03:04:05"
//! ```
//!
//! Present fields are always quoted (embedded quotes doubled), absent fields
//! are left bare, lines end in `\n`, and the file is UTF-8 without a BOM.
//! `csv::Writer` quotes uniformly per writer, so lines are assembled here.

use crate::data::EntryRecord;
use crate::scan::RecordSink;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Column names, in output order.
pub const HEADER: [&str; 6] = [
    "FullPath",
    "Type",
    "Size",
    "CreationTime",
    "LastAccessTime",
    "LastWriteTime",
];

/// An open report bound to one output stream.
pub struct CsvReport<W: Write> {
    out: BufWriter<W>,
}

impl CsvReport<File> {
    /// Creates (or truncates) the report file at `path` and writes the header.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or the header cannot be written.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Cannot open output file '{}' for writing", path.display()))?;
        Self::new(file)
            .with_context(|| format!("Error writing header to output file '{}'", path.display()))
    }
}

impl<W: Write> CsvReport<W> {
    /// Wraps `writer` and writes the header line, flushed immediately.
    pub fn new(writer: W) -> io::Result<Self> {
        let mut out = BufWriter::new(writer);
        let header: Vec<Field> = HEADER.iter().map(|&name| Field::Text(name)).collect();
        out.write_all(format_line(&header).as_bytes())?;
        out.flush()?;
        Ok(Self { out })
    }

    /// Flushes buffered rows and returns the underlying writer.
    ///
    /// # Errors
    /// Returns an error if the final flush fails.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        self.out.into_inner().map_err(|err| err.into_error())
    }
}

impl<W: Write> RecordSink for CsvReport<W> {
    fn write_record(&mut self, record: &EntryRecord) -> io::Result<()> {
        self.out.write_all(format_row(record).as_bytes())
    }
}

/// Converts a path into report text.
///
/// Paths that are not valid Unicode are written with replacement characters.
pub fn encode_path(path: &Path) -> Cow<'_, str> {
    let text = path.to_string_lossy();
    if let Cow::Owned(_) = text {
        debug!("Path {} is not valid Unicode, writing lossily", path.display());
    }
    text
}

enum Field<'a> {
    Text(&'a str),
    Value(Option<&'a dyn Display>),
}

/// Formats one entry as a complete report line, terminator included.
pub fn format_row(record: &EntryRecord) -> String {
    let path = encode_path(&record.path);
    let fields = [
        Field::Text(&path),
        Field::Text(record.kind.as_str()),
        Field::Value(record.size.as_ref().map(|s| s as &dyn Display)),
        Field::Value(record.created.as_ref().map(|t| t as &dyn Display)),
        Field::Value(record.accessed.as_ref().map(|t| t as &dyn Display)),
        Field::Value(record.modified.as_ref().map(|t| t as &dyn Display)),
    ];
    format_line(&fields)
}

fn format_line(fields: &[Field<'_>]) -> String {
    let mut line = String::with_capacity(128);
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            line.push(',');
        }
        match field {
            Field::Text(text) => push_quoted(&mut line, text),
            Field::Value(Some(value)) => push_quoted(&mut line, &value.to_string()),
            Field::Value(None) => {}
        }
    }
    line.push('\n');
    line
}

fn push_quoted(line: &mut String, text: &str) {
    line.push('"');
    for c in text.chars() {
        if c == '"' {
            line.push('"');
        }
        line.push(c);
    }
    line.push('"');
}

/// Where a root's report goes: `out_dir` joined with its identity.
pub fn report_path(out_dir: &Path, identity: &str) -> PathBuf {
    out_dir.join(identity)
}
