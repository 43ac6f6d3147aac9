//! CSV reader/writer construction and field decoding.
//!
//! Every byte the tool reads or writes goes through this module:
//!
//! - **Reading**: comma-delimited, double-quote quoting with doubled-quote
//!   escapes, CRLF/LF tolerant. Readers are `flexible` because short and long
//!   rows are handled by the caller, and headers are not consumed by the
//!   parser so that the first record is counted like any other. The parser
//!   drops empty lines, so [`skipped_blank_lines`] recovers them from the
//!   bytes it consumed.
//! - **Decoding**: fields arrive as raw bytes and are decoded with
//!   `encoding_rs`, UTF-8 unless the caller asks otherwise.
//! - **Writing**: minimal quoting (only fields containing the delimiter, a
//!   quote or a line break) and CRLF record terminators.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use csv::{QuoteStyle, Terminator};
use encoding_rs::Encoding;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

pub fn open_csv_reader<R>(reader: R) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(DEFAULT_CSV_DELIMITER)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

/// Reads the whole input file; the handle is closed before this returns.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .with_context(|| format!("Reading input file {path:?}"))?;
    Ok(bytes)
}

/// Counts the empty lines at the start of `input[start..end]`, the bytes a
/// reader consumed for one `read_byte_record` call.
///
/// CR, LF and CRLF each end one line. An LF completing a CRLF terminator of
/// the previous record is not a line of its own.
pub fn skipped_blank_lines(input: &[u8], start: usize, end: usize) -> usize {
    let end = end.min(input.len());
    let mut idx = start;
    if idx == 0 && input[..end].starts_with(UTF8_BOM) {
        idx = UTF8_BOM.len();
    }
    if idx > 0 && idx < end && input[idx - 1] == b'\r' && input[idx] == b'\n' {
        idx += 1;
    }
    let mut lines = 0;
    while idx < end {
        match input[idx] {
            b'\r' if idx + 1 < end && input[idx + 1] == b'\n' => idx += 2,
            b'\r' | b'\n' => idx += 1,
            _ => break,
        }
        lines += 1;
    }
    lines
}

pub fn open_csv_writer<W>(writer: W) -> csv::Writer<W>
where
    W: Write,
{
    let mut builder = csv::WriterBuilder::new();
    builder
        .has_headers(false)
        .delimiter(DEFAULT_CSV_DELIMITER)
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true)
        .terminator(Terminator::CRLF);
    builder.from_writer(writer)
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}
