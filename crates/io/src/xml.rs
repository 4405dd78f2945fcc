// XML address import
//
// Every `<item city=".." street=".." house=".." floor=".."/>` element, at any
// depth, is one candidate address. Uses a streaming pull parser: no DTD
// processing and no external entity resolution.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::errors::IllFormedError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Decoder, Reader};

use addrstat_core::Address;

use crate::diagnostic::{Diagnostic, ParseOutcome, SkipReason};
use crate::error::IoError;
use crate::format::Parser;

const ITEM_TAG: &[u8] = b"item";

pub struct XmlParser;

impl Parser for XmlParser {
    fn parse(&self, path: &Path) -> ParseOutcome {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => return ParseOutcome::failed(IoError::open(path, e)),
        };

        let mut outcome = ParseOutcome::default();
        if let Err(e) = read_items(BufReader::new(file), &mut outcome) {
            outcome.error = Some(match e {
                DocumentError::Xml(quick_xml::Error::Io(io)) => IoError::read(path, io),
                other => IoError::ParseError {
                    path: path.to_path_buf(),
                    message: other.to_string(),
                },
            });
        }
        outcome
    }
}

/// Failure that ends reading a document.
#[derive(Debug)]
pub enum DocumentError {
    Xml(quick_xml::Error),
    /// The document has no root element, or more than one.
    RootCount(usize),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Xml(e) => write!(f, "{}", e),
            DocumentError::RootCount(0) => write!(f, "document has no root element"),
            DocumentError::RootCount(n) => {
                write!(f, "document has {} root elements, expected exactly one", n)
            }
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<quick_xml::Error> for DocumentError {
    fn from(e: quick_xml::Error) -> Self {
        DocumentError::Xml(e)
    }
}

/// Collect every `item` element from `reader` into `outcome`.
///
/// An element whose floor is not an integer is skipped with a diagnostic. A
/// document-level error stops reading; items seen before it are kept. The
/// document must have exactly one root element and every element must be
/// closed before end of input. Attribute values are decoded with the
/// encoding named in the XML declaration (UTF-8 when there is none).
pub fn read_items<R: BufRead>(reader: R, outcome: &mut ParseOutcome) -> Result<(), DocumentError> {
    let mut reader = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut index = 0usize;
    let mut open: Vec<String> = Vec::new();
    let mut roots = 0usize;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match &event {
            Event::Start(e) | Event::Empty(e) => {
                if open.is_empty() {
                    roots += 1;
                }
                if e.name().as_ref() == ITEM_TAG {
                    match read_item(e, reader.decoder())? {
                        Ok(address) => outcome.push(address),
                        Err(reason) => outcome.skip(Diagnostic::element(index, reason)),
                    }
                    index += 1;
                }
                if matches!(event, Event::Start(_)) {
                    open.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(tag) = open.pop() {
        return Err(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(tag)).into());
    }
    if roots != 1 {
        return Err(DocumentError::RootCount(roots));
    }
    Ok(())
}

fn read_item(
    e: &BytesStart<'_>,
    decoder: Decoder,
) -> Result<Result<Address, SkipReason>, quick_xml::Error> {
    let city = attribute(e, "city", decoder)?;
    let street = attribute(e, "street", decoder)?;
    let house = attribute(e, "house", decoder)?;
    let floor_raw = attribute(e, "floor", decoder)?;

    let floor = match floor_raw.trim().parse::<i32>() {
        Ok(floor) => floor,
        Err(_) => return Ok(Err(SkipReason::InvalidFloor { value: floor_raw })),
    };

    Ok(Ok(Address::new(city, street, house, floor)))
}

/// Decoded, unescaped attribute value; a missing attribute reads as an empty
/// string.
fn attribute(e: &BytesStart<'_>, name: &str, decoder: Decoder) -> Result<String, quick_xml::Error> {
    match e.try_get_attribute(name)? {
        Some(attr) => Ok(attr.decode_and_unescape_value(decoder)?.into_owned()),
        None => Ok(String::new()),
    }
}
