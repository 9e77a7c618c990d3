use std::path::Path;
use std::sync::Arc;

use swc_common::{FileName, Globals, SourceMap, Spanned};
use swc_ecma_ast::Program;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

use crate::core::error::SourceSyntaxError;

/// File extensions the scanner treats as JavaScript or TypeScript sources.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

pub struct ParsedSource {
    pub program: Program,
    pub source_map: Arc<SourceMap>,
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Pick the parser syntax from the file extension.
///
/// TypeScript files get JSX only for `.tsx`; plain JavaScript always allows JSX.
pub fn syntax_for_path(path: &Path) -> Syntax {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ts" | "mts" | "cts") => Syntax::Typescript(TsSyntax {
            tsx: false,
            ..Default::default()
        }),
        Some("tsx") => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}

/// Parse a source string into an AST.
///
/// Recoverable parser errors are treated like fatal ones: the first error is
/// returned and no tree is produced, so a file never yields a partial call set.
pub fn parse_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource, SourceSyntaxError> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);
        let syntax = syntax_for_path(Path::new(file_path));

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let to_error = |e: swc_ecma_parser::error::Error| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            SourceSyntaxError::new(
                file_path,
                loc.line,
                loc.col_display + 1,
                e.kind().msg().to_string(),
            )
        };

        let program = parser.parse_program().map_err(to_error)?;

        if let Some(error) = parser.take_errors().into_iter().next() {
            return Err(to_error(error));
        }

        Ok(ParsedSource {
            program,
            source_map: source_map.clone(),
        })
    })
}
