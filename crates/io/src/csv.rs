// CSV address import
//
// Rows are `city, street, house, floor`; `,` and `;` both separate fields and
// may be mixed on one line. The first line is a header and is always dropped.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use encoding_rs::Encoding;

use addrstat_core::Address;

use crate::diagnostic::{Diagnostic, ParseOutcome, SkipReason};
use crate::error::IoError;
use crate::format::{ParseOptions, Parser};

/// Minimum number of fields for a row to be an address.
const MIN_FIELDS: usize = 4;

pub struct CsvParser {
    options: ParseOptions,
}

impl CsvParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl Parser for CsvParser {
    fn parse(&self, path: &Path) -> ParseOutcome {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => return ParseOutcome::failed(IoError::open(path, e)),
        };

        let mut outcome = ParseOutcome::default();
        let fallback = self.options.fallback_encoding;
        if let Err(e) = read_records(BufReader::new(file), fallback, &mut outcome) {
            outcome.error = Some(IoError::read(path, e));
        }
        outcome
    }
}

/// Stream rows from `reader` into `outcome`, skipping the header line.
///
/// Malformed rows become diagnostics. Only an I/O fault stops the loop, and
/// everything read before it stays in `outcome.records`.
pub fn read_records<R: BufRead>(
    mut reader: R,
    fallback: &'static Encoding,
    outcome: &mut ParseOutcome,
) -> io::Result<()> {
    let mut buf = Vec::new();
    let mut line_number = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;
        if line_number == 1 {
            continue;
        }

        let line = decode_line(&buf, fallback);
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line) {
            Ok(address) => outcome.push(address),
            Err(reason) => outcome.skip(Diagnostic::line(line_number, line.into_owned(), reason)),
        }
    }

    Ok(())
}

/// Decode one raw line without its terminator. Invalid UTF-8 (common for
/// Excel-exported CSVs) is decoded with `fallback` instead of failing.
fn decode_line<'a>(bytes: &'a [u8], fallback: &'static Encoding) -> Cow<'a, str> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => fallback.decode_without_bom_handling(bytes).0,
    }
}

/// Split a line on `,` or `;`, ignoring separators inside double quotes.
///
/// Quote characters are kept in the returned fields. There is no escape
/// syntax: every `"` toggles quoted mode.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut quoted = false;

    for (i, ch) in line.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            ',' | ';' if !quoted => {
                fields.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);

    fields
}

/// Turn one data line into an address.
///
/// City and street lose their quote characters; house keeps them.
pub fn parse_line(line: &str) -> Result<Address, SkipReason> {
    let fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return Err(SkipReason::TooFewFields { found: fields.len() });
    }

    let floor_raw = fields[3].trim();
    let floor = floor_raw
        .parse::<i32>()
        .map_err(|_| SkipReason::InvalidFloor { value: floor_raw.to_string() })?;

    Ok(Address::new(
        unquote(fields[0]),
        unquote(fields[1]),
        fields[2].trim(),
        floor,
    ))
}

fn unquote(field: &str) -> String {
    field.trim().replace('"', "")
}
