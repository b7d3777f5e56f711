// Base extractor: IR types and the primitives every front end shares
//
// - types.rs: the IR (Symbol, Import, CallSite, TypeReference, ParseResult)
// - extractor.rs: BaseExtractor (node text, locations, IDs, doc comments, budget)
// - creation_methods.rs: symbol / import construction
// - traversal.rs: explicit-stack walking, cancellation stride, syntax diagnostics
// - arena.rs: flat symbol storage assembled into the owned tree
// - calls.rs / type_refs.rs / decorators.rs: the shared miners

pub mod arena;
pub mod calls;
pub mod creation_methods;
pub mod decorators;
pub mod extractor;
pub mod traversal;
pub mod type_refs;
pub mod types;

pub use arena::SymbolArena;
pub use calls::{mine_calls, CallShape, CallSyntax, MinedBody};
pub use creation_methods::SymbolOptions;
pub use decorators::{Decorator, DecoratorGrammar};
pub use extractor::{BaseExtractor, Extraction};
pub use traversal::{walk, Frame, NodeVisitor, Step};
pub use type_refs::{TypeGrammar, TypeRefCollector};
pub use types::{
    AccessModifier, CallSite, Import, Location, MethodSignature, ParseResult, Symbol, SymbolKind,
    SymbolMetadata, TypeReference,
};
