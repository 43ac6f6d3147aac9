//! Column reordering for book catalogue CSV files.
//!
//! Input records are `Title, ISBN, Author, Year`; output records are
//! `Title, Author, Year, ISBN` preceded by a fixed header. The first input
//! record is always treated as a header and discarded. Records with
//! fewer than four fields are reported on the diagnostics stream and skipped;
//! any other failure aborts the run.
//!
//! The input file is read whole and its handle released before parsing, and
//! the output sequence is buffered until the input has been fully parsed.

use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::io_utils;

/// Header written ahead of every output, whatever the input header says.
pub const OUTPUT_HEADER: [&str; 4] = ["Title", "Author", "Year", "ISBN"];

/// Minimum number of fields a data record needs to be reordered.
pub const REQUIRED_COLUMNS: usize = 4;

/// One output row, serialized in `Title, Author, Year, ISBN` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
}

impl Book {
    /// Positional extraction from an input record laid out as
    /// `Title, ISBN, Author, Year`. Trailing fields are ignored.
    pub fn from_fields(fields: &[String], line: usize) -> Result<Self, RowError> {
        if fields.len() < REQUIRED_COLUMNS {
            return Err(RowError::MissingColumn {
                line,
                found: fields.len(),
            });
        }
        Ok(Self {
            title: fields[0].clone(),
            author: fields[2].clone(),
            year: fields[3].clone(),
            isbn: fields[1].clone(),
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    /// `line` counts logical CSV records, header included.
    #[error("Missing column on line {line}, skipping")]
    MissingColumn { line: usize, found: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct ReorderOptions {
    pub input_encoding: &'static Encoding,
}

impl Default for ReorderOptions {
    fn default() -> Self {
        Self {
            input_encoding: UTF_8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorderSummary {
    /// Logical records parsed, header included.
    pub records: usize,
    /// Data rows written after the header.
    pub emitted: usize,
    pub skipped: usize,
}

/// Reorders `path` onto stdout, reporting skipped rows on stderr.
pub fn process(path: &Path) -> Result<ReorderSummary> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    reorder(
        path,
        &ReorderOptions::default(),
        stdout.lock(),
        &mut stderr.lock(),
    )
}

pub fn reorder<W, E>(
    path: &Path,
    options: &ReorderOptions,
    out: W,
    diagnostics: &mut E,
) -> Result<ReorderSummary>
where
    W: Write,
    E: Write,
{
    debug!("Reading {:?} as {}", path, options.input_encoding.name());
    let input = io_utils::read_input(path)?;
    let (books, summary) = collect_books(&input, options, diagnostics)
        .with_context(|| format!("Reordering {path:?}"))?;
    write_books(&books, out)?;
    info!(
        "Reordered {} row(s) from {:?}, skipped {}",
        summary.emitted, path, summary.skipped
    );
    Ok(summary)
}

/// Parses `input`, returning the output rows in input order.
///
/// Empty lines are records with no fields: they advance the line counter and
/// are reported like any other short row.
pub fn collect_books<E>(
    input: &[u8],
    options: &ReorderOptions,
    diagnostics: &mut E,
) -> Result<(Vec<Book>, ReorderSummary)>
where
    E: Write,
{
    let mut reader = io_utils::open_csv_reader(input);
    let mut rows = RowSink {
        books: Vec::new(),
        summary: ReorderSummary::default(),
        diagnostics,
    };
    let mut record = csv::ByteRecord::new();
    let mut consumed = 0usize;

    loop {
        let more = reader
            .read_byte_record(&mut record)
            .with_context(|| format!("Reading record {}", rows.summary.records + 1))?;
        let offset = usize::try_from(reader.position().byte())
            .context("Input offset exceeds addressable memory")?;
        for _ in 0..io_utils::skipped_blank_lines(input, consumed, offset) {
            rows.push(Vec::new())?;
        }
        consumed = offset;
        if !more {
            break;
        }
        let line_number = rows.summary.records + 1;
        let fields = io_utils::decode_record(&record, options.input_encoding)
            .with_context(|| format!("Decoding record {line_number}"))?;
        rows.push(fields)?;
    }

    let RowSink { books, summary, .. } = rows;
    Ok((books, summary))
}

struct RowSink<'a, E> {
    books: Vec<Book>,
    summary: ReorderSummary,
    diagnostics: &'a mut E,
}

impl<E: Write> RowSink<'_, E> {
    fn push(&mut self, fields: Vec<String>) -> Result<()> {
        self.summary.records += 1;
        let line_number = self.summary.records;
        if line_number == 1 {
            debug!("Discarding header record");
            return Ok(());
        }
        match Book::from_fields(&fields, line_number) {
            Ok(book) => {
                self.books.push(book);
                self.summary.emitted += 1;
            }
            Err(err) => {
                debug!("Record {line_number} has {} field(s)", fields.len());
                writeln!(self.diagnostics, "{err}").context("Writing diagnostic")?;
                self.summary.skipped += 1;
            }
        }
        Ok(())
    }
}

pub fn write_books<W>(books: &[Book], out: W) -> Result<()>
where
    W: Write,
{
    let mut writer = io_utils::open_csv_writer(out);
    writer
        .write_record(OUTPUT_HEADER)
        .context("Writing output header")?;
    for (idx, book) in books.iter().enumerate() {
        writer
            .serialize(book)
            .with_context(|| format!("Writing output row {}", idx + 2))?;
    }
    writer.flush().context("Flushing output")?;
    Ok(())
}
