//! Reader for compiled GNU gettext catalogs (`.mo` files).
//!
//! Layout (all integers 32-bit, byte order given by the magic number):
//!
//! ```text
//! 0   magic           0x950412de
//! 4   revision
//! 8   N               number of strings
//! 12  O               offset of the original strings table
//! 16  T               offset of the translated strings table
//! ```
//!
//! Each table holds N `(length, offset)` pairs. Plural entries store
//! `singular\0plural` as the original and NUL-separated forms as the
//! translation; context entries are prefixed with `context\x04`.

use std::collections::HashMap;

use crate::core::error::MoError;

const MAGIC: u32 = 0x950412de;
const HEADER_LEN: usize = 20;

/// Separator between a message context and its msgid.
pub const CONTEXT_SEPARATOR: char = '\x04';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    fn read_u32(self, bytes: &[u8], offset: usize) -> Option<u32> {
        let chunk: [u8; 4] = bytes.get(offset..offset + 4)?.try_into().ok()?;
        Some(match self {
            ByteOrder::Little => u32::from_le_bytes(chunk),
            ByteOrder::Big => u32::from_be_bytes(chunk),
        })
    }
}

/// Metadata from the catalog header entry (the translation of msgid `""`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoHeader {
    pub language: Option<String>,
    pub plural_forms: Option<String>,
    pub charset: Option<String>,
}

impl MoHeader {
    pub fn parse(text: &str) -> Self {
        let mut header = MoHeader::default();
        for line in text.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim().to_ascii_lowercase().as_str() {
                "language" if !value.is_empty() => header.language = Some(value.to_string()),
                "plural-forms" => header.plural_forms = Some(value.to_string()),
                "content-type" => {
                    header.charset = value
                        .split(';')
                        .filter_map(|part| part.trim().strip_prefix("charset="))
                        .map(|cs| cs.trim().to_string())
                        .next();
                }
                _ => {}
            }
        }
        header
    }
}

/// A decoded catalog: singular entries and plural entries keyed by their
/// (context-qualified) singular msgid.
#[derive(Debug, Clone, Default)]
pub struct MoFile {
    pub header: MoHeader,
    pub messages: HashMap<String, String>,
    pub plurals: HashMap<String, Vec<String>>,
}

impl MoFile {
    pub fn parse(bytes: &[u8]) -> Result<Self, MoError> {
        if bytes.len() < HEADER_LEN {
            return Err(MoError::TooShort(bytes.len()));
        }

        let order = match ByteOrder::Little.read_u32(bytes, 0) {
            Some(MAGIC) => ByteOrder::Little,
            Some(_) if ByteOrder::Big.read_u32(bytes, 0) == Some(MAGIC) => ByteOrder::Big,
            Some(other) => return Err(MoError::BadMagic(other)),
            None => return Err(MoError::TooShort(bytes.len())),
        };

        let read = |offset: usize| order.read_u32(bytes, offset).ok_or(MoError::TooShort(bytes.len()));

        let revision = read(4)?;
        if revision >> 16 > 1 {
            return Err(MoError::UnsupportedRevision(revision >> 16));
        }

        let count = read(8)? as usize;
        let originals = read(12)? as usize;
        let translations = read(16)? as usize;

        let mut entries = Vec::with_capacity(count);
        for index in 0..count {
            let original = read_string(bytes, order, originals + index * 8)
                .ok_or(MoError::OutOfBounds { index })?;
            let translation = read_string(bytes, order, translations + index * 8)
                .ok_or(MoError::OutOfBounds { index })?;
            entries.push((original, translation));
        }

        // The header is ASCII, so it can be read before the charset is known.
        let header = entries
            .iter()
            .find(|(original, _)| original.is_empty())
            .map(|(_, translation)| MoHeader::parse(&String::from_utf8_lossy(translation)))
            .unwrap_or_default();
        let charset = Charset::from_header(header.charset.as_deref())?;

        let mut file = MoFile {
            header,
            ..Default::default()
        };
        for (original, translation) in entries {
            if original.is_empty() {
                continue;
            }
            file.insert(charset.decode(original), charset.decode(translation));
        }

        Ok(file)
    }

    fn insert(&mut self, original: String, translation: String) {
        match original.split_once('\0') {
            Some((singular, _plural)) => {
                let forms = translation.split('\0').map(str::to_string).collect();
                self.plurals.insert(singular.to_string(), forms);
            }
            None => {
                self.messages.insert(original, translation);
            }
        }
    }
}

/// Key under which a context-qualified message is stored.
pub fn context_key(context: &str, msgid: &str) -> String {
    format!("{}{}{}", context, CONTEXT_SEPARATOR, msgid)
}

fn read_string(bytes: &[u8], order: ByteOrder, entry: usize) -> Option<&[u8]> {
    let len = order.read_u32(bytes, entry)? as usize;
    let offset = order.read_u32(bytes, entry + 4)? as usize;
    bytes.get(offset..offset.checked_add(len)?)
}

/// Character sets a catalog may declare in its `Content-Type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Charset {
    Utf8,
    Latin1,
}

impl Charset {
    /// No charset, or the `CHARSET` template placeholder, means UTF-8.
    fn from_header(charset: Option<&str>) -> Result<Self, MoError> {
        let Some(name) = charset else {
            return Ok(Charset::Utf8);
        };
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "utf8" | "charset" | "ascii" | "usascii" | "ansix3.41968" => Ok(Charset::Utf8),
            "iso88591" | "latin1" | "l1" => Ok(Charset::Latin1),
            _ => Err(MoError::UnsupportedCharset(name.to_string())),
        }
    }

    fn decode(self, bytes: &[u8]) -> String {
        match self {
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            // Every Latin-1 byte is the code point of the same value.
            Charset::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}
