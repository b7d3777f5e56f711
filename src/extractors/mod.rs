//! Symbol extractors
//!
//! - `base` - IR types, `BaseExtractor`, bounded traversal and the shared miners
//! - `frontend` - the `FrontEnd` trait and its parse pipeline
//! - `manager` - `ExtractorManager`, the extension-keyed public entry point
//! - `ecmascript` - grammar shapes shared by the TypeScript and JavaScript front ends
//! - `python`, `typescript`, `javascript` - the language front ends

pub mod base;
pub(crate) mod ecmascript;
pub mod frontend;
pub mod javascript;
pub mod manager;
pub mod python;
pub mod typescript;

pub use base::{ParseResult, Symbol, SymbolKind};
pub use frontend::FrontEnd;
pub use javascript::JavaScriptFrontEnd;
pub use manager::ExtractorManager;
pub use python::PythonFrontEnd;
pub use typescript::TypeScriptFrontEnd;
