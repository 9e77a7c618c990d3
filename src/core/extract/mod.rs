//! Call-site extraction.
//!
//! Parses source files with swc and walks them with [`CallVisitor`], producing
//! one [`FileCallSet`] per file. Folder scans parse files in parallel; each
//! worker owns its own source map and visitor and the results are merged into
//! an ordered map once every worker has finished.

pub mod file_scanner;
pub mod visitor;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use swc_common::SourceMap;
use swc_ecma_visit::VisitWith;

use crate::core::data::FileCallSet;
use crate::core::error::SourceSyntaxError;
use crate::core::parsers::source::parse_source;
use crate::core::signatures::SignatureTable;

pub use file_scanner::{ScanResult, scan_files};
pub use visitor::CallVisitor;

/// Calls extracted from a directory tree.
#[derive(Debug, Default)]
pub struct FolderExtraction {
    pub files: BTreeMap<String, FileCallSet>,
    /// Files that failed to parse; they have no entry in `files`.
    pub errors: Vec<SourceSyntaxError>,
    /// Paths the directory walk could not access.
    pub skipped_count: usize,
}

impl FolderExtraction {
    pub fn files_scanned(&self) -> usize {
        self.files.len() + self.errors.len()
    }
}

pub struct Extractor {
    signatures: SignatureTable,
}

impl Extractor {
    pub fn new(signatures: SignatureTable) -> Self {
        Self { signatures }
    }

    pub fn signatures(&self) -> &SignatureTable {
        &self.signatures
    }

    /// Extract calls from source text that claims to live at `file_path`.
    ///
    /// The path picks the parser syntax and is recorded on every call.
    pub fn extract_source(&self, code: String, file_path: &str) -> Result<FileCallSet, SourceSyntaxError> {
        let parsed = parse_source(code, file_path, Arc::new(SourceMap::default()))?;
        let mut visitor = CallVisitor::new(file_path, &parsed.source_map, &self.signatures);
        parsed.program.visit_with(&mut visitor);
        Ok(visitor.calls)
    }

    /// Read and extract a single file. Unreadable files count as parse failures.
    pub fn extract_file(&self, path: &Path) -> Result<FileCallSet, SourceSyntaxError> {
        let file_path = path.to_string_lossy();
        let code = fs::read_to_string(path)
            .map_err(|e| SourceSyntaxError::unpositioned(file_path.as_ref(), e.to_string()))?;
        self.extract_source(code, &file_path)
    }

    pub fn extract_folder(&self, root: &Path, ignores: &[String], verbose: bool) -> FolderExtraction {
        let scan = scan_files(root, ignores, verbose);

        let results: Vec<(String, Result<FileCallSet, SourceSyntaxError>)> = scan
            .files
            .into_par_iter()
            .map(|file| {
                let result = self.extract_file(Path::new(&file));
                (file, result)
            })
            .collect();

        let mut extraction = FolderExtraction {
            skipped_count: scan.skipped_count,
            ..Default::default()
        };
        for (file, result) in results {
            match result {
                Ok(calls) => {
                    extraction.files.insert(file, calls);
                }
                Err(error) => extraction.errors.push(error),
            }
        }
        extraction.errors.sort_by(|a, b| a.file.cmp(&b.file));
        extraction
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::core::signatures::CallKind;

    #[test]
    fn test_extract_source() {
        let extractor = Extractor::new(SignatureTable::new());
        let calls = extractor
            .extract_source("gettext('a'); gettext(b);".to_string(), "x.js")
            .unwrap();
        assert_eq!(calls.literal_calls.len(), 1);
        assert_eq!(calls.complex_calls.len(), 1);
    }

    #[test]
    fn test_extract_source_syntax_error() {
        let extractor = Extractor::new(SignatureTable::new());
        let err = extractor
            .extract_source("gettext('a'".to_string(), "broken.js")
            .unwrap_err();
        assert_eq!(err.file, "broken.js");
    }

    #[test]
    fn test_extract_missing_file() {
        let extractor = Extractor::new(SignatureTable::new());
        let err = extractor
            .extract_file(Path::new("/nonexistent/app.js"))
            .unwrap_err();
        assert_eq!(err.line, 0);
        assert_eq!(err.file, "/nonexistent/app.js");
    }

    #[test]
    fn test_extract_folder() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::write(root.join("app.js"), "gettext('one');\nngettext('a', 'b', n);").unwrap();
        fs::write(root.join("lib/util.ts"), "export const x = pgettext('c', 'm');").unwrap();
        fs::write(root.join("broken.js"), "gettext('x'").unwrap();
        fs::write(root.join(".hidden.js"), "gettext('hidden');").unwrap();
        fs::write(root.join("README.md"), "gettext('docs')").unwrap();

        let extractor = Extractor::new(SignatureTable::new());
        let result = extractor.extract_folder(root, &[], false);

        assert_eq!(result.files.len(), 2);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].file.ends_with("broken.js"));
        assert_eq!(result.files_scanned(), 3);

        let app = result
            .files
            .iter()
            .find(|(path, _)| path.ends_with("app.js"))
            .map(|(_, calls)| calls)
            .unwrap();
        assert_eq!(app.literal_calls.len(), 2);
        assert_eq!(app.literal_calls[1].function, CallKind::Ngettext);

        let util = result
            .files
            .iter()
            .find(|(path, _)| path.ends_with("util.ts"))
            .map(|(_, calls)| calls)
            .unwrap();
        assert_eq!(util.literal_calls[0].function, CallKind::Pgettext);
    }

    #[test]
    fn test_extract_folder_with_alias() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "_('x'); __('y');").unwrap();

        let table = SignatureTable::with_aliases([("_", "gettext")]).unwrap();
        let result = Extractor::new(table).extract_folder(dir.path(), &[], false);

        let calls = result.files.values().next().unwrap();
        assert_eq!(calls.literal_calls.len(), 1);
        assert_eq!(calls.literal_calls[0].arg_texts(), vec!["x"]);
    }
}
