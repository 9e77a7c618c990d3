//! Core data types shared by extraction, validation and reporting.
//!
//! ## Module Structure
//!
//! - `call`: Extracted call records (ExtractedCall, CallArg, FileCallSet)
//! - `source`: Source code location types (SourceContext, SourceLocation)

pub mod call;
pub mod source;

pub use call::{CallArg, ExtractedCall, FileCallSet, MessageRef};
pub use source::{SourceContext, SourceLocation};
