// symgraph-core - tree-sitter symbol and call-graph extraction
//
// Turns Python, TypeScript and JavaScript sources into one language-agnostic IR:
// a symbol tree per file, module-dependency imports, call sites mined from executable
// bodies, and type references from annotations. Every result is anchored to source
// locations and keyed by deterministic IDs.
//
// Entry points: `ExtractorManager` (by file extension, single or batch) or a single
// `FrontEnd` such as `PythonFrontEnd`.

pub mod config;
pub mod error;
pub mod extractors;
pub mod language;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod tests;

pub use config::{ExtractionLimits, ParseOptions, ParserConfig};
pub use error::{CancelPhase, ParseError, ValidationError};
pub use extractors::base::{
    AccessModifier, CallSite, Import, Location, MethodSignature, ParseResult, Symbol, SymbolKind,
    SymbolMetadata, TypeReference,
};
pub use extractors::{
    ExtractorManager, FrontEnd, JavaScriptFrontEnd, PythonFrontEnd, TypeScriptFrontEnd,
};
pub use language::{detect_language_from_extension, detect_language_from_path, Language};
pub use tokio_util::sync::CancellationToken;
pub use validation::validate_result;
