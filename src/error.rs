//! Error taxonomy for a single `parse` call
//!
//! Input rejection and cancellation are cheap, expected failures. Engine and
//! validation failures are opaque and point at a grammar problem or an extraction
//! bug respectively. Syntax problems in the input are never errors; they land in
//! `ParseResult::errors`.

use std::fmt;
use std::str::Utf8Error;

use thiserror::Error;

/// Where in the pipeline a cancellation was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelPhase {
    BeforeStart,
    AfterSyntaxTree,
    DuringExtraction,
    AfterExtraction,
}

impl CancelPhase {
    /// True when some work was already done before the cancellation landed
    pub fn had_partial_work(&self) -> bool {
        !matches!(self, CancelPhase::BeforeStart)
    }
}

impl fmt::Display for CancelPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelPhase::BeforeStart => write!(f, "before start"),
            CancelPhase::AfterSyntaxTree => write!(f, "after syntax tree construction"),
            CancelPhase::DuringExtraction => write!(f, "during extraction"),
            CancelPhase::AfterExtraction => write!(f, "after extraction"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("file too large: {size} bytes exceeds limit of {max} bytes")]
    FileTooLarge { size: usize, max: usize },

    #[error("invalid content: not valid UTF-8")]
    InvalidContent(#[source] Utf8Error),

    #[error("parse cancelled {0}")]
    Cancelled(CancelPhase),

    #[error("grammar engine failed for {file_path}")]
    Engine {
        file_path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("extraction produced an invalid result: {0}")]
    Validation(#[from] ValidationError),

    #[error("unsupported language for file: {0}")]
    UnsupportedLanguage(String),
}

/// Structural invariant broken by an extraction result
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("result has an empty {0}")]
    EmptyField(&'static str),

    #[error("symbol `{name}` has an empty {field}")]
    EmptySymbolField { name: String, field: &'static str },

    #[error("{what} location in {file_path} is inconsistent (lines {start_line}-{end_line})")]
    BadLocation {
        what: String,
        file_path: String,
        start_line: u32,
        end_line: u32,
    },

    #[error("{what} location points at `{found}` instead of `{expected}`")]
    ForeignLocation {
        what: String,
        expected: String,
        found: String,
    },

    #[error("symbol tree contains a cycle through {0} unreachable entries")]
    CyclicChildren(usize),

    #[error("symbol arena entry {child} references missing parent {parent}")]
    DanglingParent { child: usize, parent: usize },

    #[error("symbol nesting exceeds {0} levels")]
    NestingTooDeep(usize),
}
