use serde::Serialize;

use super::source::SourceContext;
use crate::core::signatures::CallKind;

/// One tracked argument of a recognized call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum CallArg {
    /// Value of a constant string (or expression-free template literal).
    Literal(String),
    /// Verbatim source text of a computed argument.
    Expression(String),
}

impl CallArg {
    pub fn as_str(&self) -> &str {
        match self {
            CallArg::Literal(text) | CallArg::Expression(text) => text,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, CallArg::Literal(_))
    }
}

/// The message a literal call asks for, split by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef<'a> {
    pub domain: Option<&'a str>,
    pub context: Option<&'a str>,
    pub msgid: &'a str,
    pub msgid_plural: Option<&'a str>,
}

/// A recognized gettext-family call site.
///
/// `args` always holds exactly `function.arity()` entries, in signature order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedCall {
    pub function: CallKind,
    pub args: Vec<CallArg>,
    #[serde(flatten)]
    pub context: SourceContext,
}

impl ExtractedCall {
    pub fn is_literal(&self) -> bool {
        self.args.iter().all(CallArg::is_literal)
    }

    pub fn arg_texts(&self) -> Vec<&str> {
        self.args.iter().map(CallArg::as_str).collect()
    }

    /// Split the arguments of a literal call into domain, context and message ids.
    ///
    /// Returns `None` for expression calls, whose message text is not known.
    pub fn message(&self) -> Option<MessageRef<'_>> {
        if !self.is_literal() || self.args.len() != self.function.arity() {
            return None;
        }

        let mut args = self.args.iter().map(CallArg::as_str);
        let domain = if self.function.has_domain() {
            args.next()
        } else {
            None
        };
        let context = if self.function.has_context() {
            args.next()
        } else {
            None
        };
        let msgid = args.next()?;
        let msgid_plural = if self.function.is_plural() {
            args.next()
        } else {
            None
        };

        Some(MessageRef {
            domain,
            context,
            msgid,
            msgid_plural,
        })
    }
}

/// Calls found in one source file, split by whether they can be validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileCallSet {
    pub literal_calls: Vec<ExtractedCall>,
    pub complex_calls: Vec<ExtractedCall>,
}

impl FileCallSet {
    pub fn push(&mut self, call: ExtractedCall) {
        if call.is_literal() {
            self.literal_calls.push(call);
        } else {
            self.complex_calls.push(call);
        }
    }

    pub fn len(&self) -> usize {
        self.literal_calls.len() + self.complex_calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literal_calls.is_empty() && self.complex_calls.is_empty()
    }
}
