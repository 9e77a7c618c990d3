//! Parsers for the two kinds of input: JavaScript/TypeScript sources and
//! compiled `.mo` catalogs (including their `Plural-Forms` expressions).

pub mod mo;
pub mod plural;
pub mod source;
