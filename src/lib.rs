//! Strata - multi-language code structure analysis engine.
//!
//! Strata parses source files across a dozen languages into normalized
//! structural summaries (functions, classes, variables, imports) for
//! downstream tooling. The crate is the orchestration layer: plugin registry,
//! stat-validated parse cache, one engine singleton per project root, path
//! validation at the trust boundary, and the extraction contract every
//! language plugin satisfies.

pub mod cache;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod language;
pub mod manager;
pub mod model;
pub mod query;
pub mod registry;
pub mod security;

#[cfg(test)]
pub mod tests;

// Re-export common types
pub use engine::AnalysisEngine;
pub use error::AnalyzerError;
pub use extractors::ElementExtractor;
pub use manager::EngineManager;
pub use model::{AnalysisRequest, AnalysisResult, Element, ElementKind, QueryCapture, Visibility};
pub use query::{QueryError, QueryExecutor};
pub use registry::PluginRegistry;
