use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod extract;
mod init;

const BIN_NAME: &str = "checktext";

const MO_MAGIC: u32 = 0x950412de;

pub const ENGLISH_PLURALS: &str = "nplurals=2; plural=(n != 1);";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        self.write_bytes(path, content.as_bytes())
    }

    pub fn write_bytes(&self, path: &str, content: &[u8]) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Write `locale/{language}/LC_MESSAGES/{domain}.mo`.
    ///
    /// Entry keys use the on-disk form: `context\x04msgid` for context
    /// entries, `msgid\0msgid_plural` for plural ones (forms joined by `\0`).
    pub fn write_mo(
        &self,
        language: &str,
        domain: &str,
        plural_forms: &str,
        entries: &[(&str, &str)],
    ) -> Result<()> {
        let header = format!(
            "Content-Type: text/plain; charset=UTF-8\nPlural-Forms: {}\n",
            plural_forms
        );
        let mut all: Vec<(String, String)> = vec![(String::new(), header)];
        all.extend(entries.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        all.sort();

        let path = format!("locale/{}/LC_MESSAGES/{}.mo", language, domain);
        self.write_bytes(&path, &build_mo(&all))
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn extract_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("extract");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

fn build_mo(entries: &[(String, String)]) -> Vec<u8> {
    let count = entries.len();
    let originals_offset = 28;
    let translations_offset = originals_offset + count * 8;
    let strings_offset = translations_offset + count * 8;

    let mut table = Vec::new();
    let mut data = Vec::new();
    let mut translations = Vec::new();
    for (original, _) in entries {
        table.push((original.len(), strings_offset + data.len()));
        data.extend_from_slice(original.as_bytes());
        data.push(0);
    }
    for (_, translation) in entries {
        translations.push((translation.len(), strings_offset + data.len()));
        data.extend_from_slice(translation.as_bytes());
        data.push(0);
    }
    table.extend(translations);

    let mut bytes = Vec::new();
    for value in [
        MO_MAGIC,
        0,
        count as u32,
        originals_offset as u32,
        translations_offset as u32,
        0,
        0,
    ] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    for (len, offset) in table {
        bytes.extend_from_slice(&(len as u32).to_le_bytes());
        bytes.extend_from_slice(&(offset as u32).to_le_bytes());
    }
    bytes.extend_from_slice(&data);
    bytes
}

pub fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
