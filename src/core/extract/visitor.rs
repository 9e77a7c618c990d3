//! AST visitor that collects gettext-family calls from one parsed file.

use swc_common::{Loc, SourceMap, SourceMapper, Spanned};
use swc_ecma_ast::{CallExpr, Callee, Expr, ExprOrSpread, Lit};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::data::{CallArg, ExtractedCall, FileCallSet, SourceContext, SourceLocation};
use crate::core::signatures::{CallKind, SignatureTable};

pub struct CallVisitor<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    signatures: &'a SignatureTable,
    pub calls: FileCallSet,
}

impl<'a> CallVisitor<'a> {
    pub fn new(file_path: &'a str, source_map: &'a SourceMap, signatures: &'a SignatureTable) -> Self {
        Self {
            file_path,
            source_map,
            signatures,
            calls: FileCallSet::default(),
        }
    }

    fn record_call(&mut self, kind: CallKind, node: &CallExpr) {
        let mut args = Vec::with_capacity(kind.arity());
        for &index in kind.tracked_indices() {
            // Too few arguments for the signature: not a call shape we track.
            let Some(arg) = node.args.get(index) else {
                return;
            };
            args.push(self.classify_arg(arg));
        }

        let loc = self.source_map.lookup_char_pos(node.span.lo);
        self.calls.push(ExtractedCall {
            function: kind,
            args,
            context: self.make_source_context(&loc),
        });
    }

    fn classify_arg(&self, arg: &ExprOrSpread) -> CallArg {
        if arg.spread.is_none()
            && let Some(text) = literal_text(&arg.expr)
        {
            return CallArg::Literal(text);
        }

        let snippet = self
            .source_map
            .span_to_snippet(arg.span())
            .unwrap_or_default();
        CallArg::Expression(snippet)
    }

    fn make_source_context(&self, loc: &Loc) -> SourceContext {
        let source_line = loc
            .file
            .get_line(loc.line - 1)
            .map(|cow| cow.to_string())
            .unwrap_or_default();

        SourceContext::new(
            SourceLocation::new(self.file_path, loc.line, loc.col_display + 1),
            source_line,
        )
    }
}

/// Constant text of a string literal or an expression-free template literal.
///
/// Parentheses around the literal are looked through; everything else is
/// computed and yields `None`.
fn literal_text(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_owned),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() && tpl.quasis.len() == 1 => tpl.quasis[0]
            .cooked
            .as_ref()
            .and_then(|cooked| cooked.as_str())
            .map(str::to_owned),
        Expr::Paren(paren) => literal_text(&paren.expr),
        _ => None,
    }
}

impl Visit for CallVisitor<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        // Nested calls first, so `gettext(gettext('a'))` records the inner call
        // even though the outer one is an expression call.
        node.visit_children_with(self);

        if let Callee::Expr(expr) = &node.callee
            && let Expr::Ident(ident) = &**expr
            && let Some(kind) = self.signatures.lookup(ident.sym.as_str())
        {
            self.record_call(kind, node);
        }
    }
}
