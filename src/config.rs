//! Parser configuration
//!
//! Immutable once built. Front ends clone it at construction and never mutate it,
//! so one configured front end can serve any number of concurrent callers.

use serde::{Deserialize, Serialize};

/// Default ceiling on accepted input size (2 MiB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Inputs longer than this many bytes are rejected before parsing
    pub max_file_size: usize,
    pub options: ParseOptions,
    pub limits: ExtractionLimits,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            options: ParseOptions::default(),
            limits: ExtractionLimits::default(),
        }
    }
}

impl ParserConfig {
    /// Load a (possibly partial) configuration document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_limits(mut self, limits: ExtractionLimits) -> Self {
        self.limits = limits;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Keep non-exported declarations; when false they are dropped with their subtree
    pub include_private: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            include_private: true,
        }
    }
}

/// Resource bounds applied to every traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionLimits {
    /// Nodes deeper than this are dropped, not followed
    pub max_depth: usize,
    pub max_calls_per_symbol: usize,
    pub max_type_refs_per_symbol: usize,
    /// Visited-node stride between cooperative cancellation checks
    pub cancel_check_interval: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_depth: 512,
            max_calls_per_symbol: 1000,
            max_type_refs_per_symbol: 256,
            cancel_check_interval: 100,
        }
    }
}
