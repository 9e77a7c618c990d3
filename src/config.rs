use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::signatures::SignatureTable;

pub const CONFIG_FILE_NAME: &str = ".checktextrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_locale_root")]
    pub locale_root: String,
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default)]
    pub languages: Vec<String>,
    /// Extra function names, mapped to the canonical gettext function they stand for.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_locale_root() -> String {
    "./locale".to_string()
}

fn default_domain() -> String {
    "messages".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            locale_root: default_locale_root(),
            domain: default_domain(),
            languages: Vec::new(),
            aliases: BTreeMap::new(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or an alias
    /// points at something other than a canonical gettext function.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        self.signature_table()
            .context("Invalid entry in 'aliases'")?;

        Ok(())
    }

    /// Signature table with the configured aliases registered.
    pub fn signature_table(&self) -> Result<SignatureTable> {
        let table = SignatureTable::with_aliases(
            self.aliases
                .iter()
                .map(|(alias, canonical)| (alias.as_str(), canonical.as_str())),
        )?;
        Ok(table)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
