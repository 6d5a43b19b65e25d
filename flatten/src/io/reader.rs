//! Tolerant text reading with an ordered encoding fallback.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Candidate text encodings, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Strict UTF-8. A leading BOM is kept as `U+FEFF`.
    Utf8,
    /// Strict UTF-8 with a leading BOM stripped.
    Utf8Sig,
    /// ISO-8859-1. Every byte maps to a code point, so this never fails.
    Latin1,
    /// Windows-1252 as defined by WHATWG. Never fails.
    Windows1252,
}

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Windows1252 => "cp1252",
        }
    }

    /// Decode `bytes`, or `None` if they are invalid under this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => encoding_rs::UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
            TextEncoding::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                encoding_rs::UTF_8
                    .decode_without_bom_handling_and_without_replacement(body)
                    .map(|text| text.into_owned())
            }
            TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
            TextEncoding::Windows1252 => {
                let (text, had_errors) =
                    encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
                (!had_errors).then(|| text.into_owned())
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Default fallback order. It ends with total encodings, so decoding itself
/// cannot fail; only I/O can.
pub const DEFAULT_ENCODINGS: &[TextEncoding] = &[
    TextEncoding::Utf8,
    TextEncoding::Utf8Sig,
    TextEncoding::Latin1,
    TextEncoding::Windows1252,
];

/// Successfully decoded file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub content: String,
    pub encoding: TextEncoding,
}

/// Why a file's content could not be produced.
#[derive(Debug)]
pub enum ReadFailure {
    /// The file could not be read at all (vanished, permission denied, ...).
    Io(io::Error),
    /// No candidate encoding accepted the bytes.
    Undecodable,
}

impl ReadFailure {
    /// Placeholder text written in place of the file's content.
    pub fn sentinel(&self) -> String {
        match self {
            ReadFailure::Io(err) => format!("[ERROR: Could not read file - {err}]"),
            ReadFailure::Undecodable => {
                "[ERROR: Could not decode file with any supported encoding]".to_string()
            }
        }
    }
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadFailure::Io(err) => write!(f, "read failed: {err}"),
            ReadFailure::Undecodable => f.write_str("no supported encoding matched"),
        }
    }
}

impl std::error::Error for ReadFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadFailure::Io(err) => Some(err),
            ReadFailure::Undecodable => None,
        }
    }
}

/// Read `path` as text using [`DEFAULT_ENCODINGS`].
pub fn read_text(path: &Path) -> Result<DecodedText, ReadFailure> {
    read_text_with(path, DEFAULT_ENCODINGS)
}

/// Read `path` as text, returning the first successful decoding in
/// `encodings` order.
pub fn read_text_with(path: &Path, encodings: &[TextEncoding]) -> Result<DecodedText, ReadFailure> {
    let bytes = fs::read(path).map_err(ReadFailure::Io)?;
    for &encoding in encodings {
        if let Some(content) = encoding.decode(&bytes) {
            if encoding != TextEncoding::Utf8 {
                debug!(path = %path.display(), %encoding, "decoded with fallback encoding");
            }
            return Ok(DecodedText { content, encoding });
        }
    }
    Err(ReadFailure::Undecodable)
}
