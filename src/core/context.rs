use std::path::{Component, Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::{
    cli::args::{CatalogArgs, CommonArgs},
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        catalog::{LoadedCatalogs, load_catalogs},
        extract::{Extractor, FolderExtraction},
        signatures::SignatureTable,
    },
    sink::ScanTarget,
};

/// Resolved settings for one run.
///
/// Configuration is merged with the following priority (highest to lowest):
/// 1. CLI arguments (e.g., `--domain shop`)
/// 2. `.checktextrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory the sources are scanned from.
    pub source_root: PathBuf,

    /// Single file to check instead of `source_root`.
    pub file: Option<PathBuf>,

    /// Directory holding `<lang>/LC_MESSAGES/<domain>.mo`.
    pub locale_root: PathBuf,

    /// Built-in call signatures plus every configured alias.
    pub signatures: SignatureTable,

    pub verbose: bool,
}

impl CheckContext {
    /// Create a context from command line arguments.
    ///
    /// The config file is searched upwards from `--source-root` (or the current
    /// directory). Relative roots from the config file are resolved against
    /// that same directory.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or an alias names an
    /// unknown canonical function.
    pub fn new(common: &CommonArgs, catalog: &CatalogArgs) -> Result<Self> {
        let verbose = common.verbose;
        let root_dir = common
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let mut config = config_result.config;

        // CLI > config file > defaults
        if let Some(ref domain) = catalog.domain {
            config.domain = domain.clone();
        }
        if !catalog.languages.is_empty() {
            config.languages = catalog.languages.clone();
        }
        for (alias, canonical) in &common.aliases {
            config.aliases.insert(alias.clone(), canonical.clone());
        }

        let signatures = config
            .signature_table()
            .context("Invalid --alias argument")?;

        let source_root = match common.source_root {
            Some(ref source_root) => source_root.clone(),
            None => resolve_relative(&root_dir, &config.source_root),
        };
        let locale_root = match catalog.locale_root {
            Some(ref locale_root) => locale_root.clone(),
            None => resolve_relative(&root_dir, &config.locale_root),
        };

        Ok(Self {
            config,
            source_root,
            file: common.file.clone(),
            locale_root,
            signatures,
            verbose,
        })
    }

    /// Build a context from an already merged configuration, with paths taken
    /// as given.
    pub fn from_config(config: Config, verbose: bool) -> Result<Self> {
        config.validate()?;
        let signatures = config.signature_table()?;
        Ok(Self {
            source_root: PathBuf::from(&config.source_root),
            locale_root: PathBuf::from(&config.locale_root),
            file: None,
            config,
            signatures,
            verbose,
        })
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn domain(&self) -> &str {
        &self.config.domain
    }

    pub fn languages(&self) -> &[String] {
        &self.config.languages
    }

    pub fn target(&self) -> ScanTarget<'_> {
        match self.file {
            Some(ref file) => ScanTarget::File(file),
            None => ScanTarget::Folder(&self.source_root),
        }
    }

    pub fn extractor(&self) -> Extractor {
        Extractor::new(self.signatures.clone())
    }

    /// Extract calls from the single file or the whole source root.
    pub fn extract(&self) -> FolderExtraction {
        let extractor = self.extractor();
        let Some(ref file) = self.file else {
            let extraction =
                extractor.extract_folder(&self.source_root, &self.config.ignores, self.verbose);
            if extraction.skipped_count > 0 {
                eprintln!(
                    "Warning: {} path(s) skipped due to access errors{}",
                    extraction.skipped_count,
                    if self.verbose { "" } else { " (use -v for details)" }
                );
            }
            return extraction;
        };

        let mut extraction = FolderExtraction::default();
        match extractor.extract_file(file) {
            Ok(calls) => {
                extraction
                    .files
                    .insert(file.to_string_lossy().to_string(), calls);
            }
            Err(error) => extraction.errors.push(error),
        }
        extraction
    }

    pub fn load_catalogs(&self) -> LoadedCatalogs {
        load_catalogs(self.languages(), self.domain(), &self.locale_root)
    }
}

/// Resolve a configured path against the directory the config was searched from.
fn resolve_relative(root_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        path.to_path_buf()
    } else {
        let rel = path.strip_prefix(Path::new(".")).unwrap_or(path);
        root_dir.join(rel)
    }
}
