//! Helpers for building compiled catalogs in unit tests.

use std::fs;
use std::path::Path;

use super::parsers::mo::context_key;

const MAGIC: u32 = 0x950412de;

/// Builds `.mo` bytes in memory.
pub struct MoBuilder {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    big_endian: bool,
}

impl MoBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            big_endian: false,
        }
    }

    pub fn big_endian(mut self) -> Self {
        self.big_endian = true;
        self
    }

    pub fn header(self, text: &str) -> Self {
        self.raw_message(b"", text.as_bytes())
    }

    pub fn plural_forms(self, rule: &str) -> Self {
        self.header(&format!(
            "Content-Type: text/plain; charset=UTF-8\nPlural-Forms: {}\n",
            rule
        ))
    }

    pub fn message(self, msgid: &str, msgstr: &str) -> Self {
        self.raw_message(msgid.as_bytes(), msgstr.as_bytes())
    }

    /// Entry with pre-encoded bytes, for catalogs in other charsets.
    pub fn raw_message(mut self, msgid: &[u8], msgstr: &[u8]) -> Self {
        self.entries.push((msgid.to_vec(), msgstr.to_vec()));
        self
    }

    pub fn context_message(self, context: &str, msgid: &str, msgstr: &str) -> Self {
        self.message(&context_key(context, msgid), msgstr)
    }

    pub fn plural(self, singular: &str, plural: &str, forms: &[&str]) -> Self {
        self.message(&format!("{}\0{}", singular, plural), &forms.join("\0"))
    }

    pub fn context_plural(self, context: &str, singular: &str, plural: &str, forms: &[&str]) -> Self {
        self.plural(&context_key(context, singular), plural, forms)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let count = entries.len();
        let originals_offset = 28;
        let translations_offset = originals_offset + count * 8;
        let mut data_offset = translations_offset + count * 8;

        let mut tables = Vec::new();
        let mut data = Vec::new();
        let mut original_table = Vec::new();
        let mut translation_table = Vec::new();

        for (original, _) in &entries {
            original_table.push((original.len(), data_offset));
            data.extend_from_slice(original);
            data.push(0);
            data_offset += original.len() + 1;
        }
        for (_, translation) in &entries {
            translation_table.push((translation.len(), data_offset));
            data.extend_from_slice(translation);
            data.push(0);
            data_offset += translation.len() + 1;
        }

        for (len, offset) in original_table.iter().chain(translation_table.iter()) {
            tables.push(*len as u32);
            tables.push(*offset as u32);
        }

        let header = [
            MAGIC,
            0,
            count as u32,
            originals_offset as u32,
            translations_offset as u32,
            0,
            data_offset as u32,
        ];

        let mut bytes = Vec::new();
        for value in header.iter().chain(tables.iter()) {
            if self.big_endian {
                bytes.extend_from_slice(&value.to_be_bytes());
            } else {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
        }
        bytes.extend_from_slice(&data);
        bytes
    }

    /// Write the catalog to `{root}/{language}/LC_MESSAGES/{domain}.mo`.
    pub fn write_to(&self, root: &Path, language: &str, domain: &str) {
        let dir = root.join(language).join("LC_MESSAGES");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.mo", domain)), self.build()).unwrap();
    }
}
