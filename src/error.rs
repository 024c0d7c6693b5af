//! Error taxonomy for the analysis engine.
//!
//! Two tiers: recoverable analysis failures (path rejected, unknown language,
//! unavailable plugin, parse failure) are converted by the engine into
//! `success = false` results; everything else propagates to the caller as an
//! `Err`. A missing file is deliberately in the second tier so callers can tell
//! "analysis ran and failed" apart from "there was nothing to analyze".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Path validation failed. The reason is a generic constant and never
    /// contains the rejected path.
    #[error("path rejected: {0}")]
    PathSecurity(&'static str),

    /// No language could be resolved for the request (unknown extension or an
    /// explicitly requested language that is not registered).
    #[error("{0}")]
    LanguageResolution(String),

    /// The plugin for a registered language failed to load. Names only the
    /// missing grammar dependency, never file contents.
    #[error("language plugin unavailable: missing grammar '{dependency}'")]
    PluginUnavailable { dependency: String },

    /// The parser ran but produced no usable tree.
    #[error("parse failed: {0}")]
    Parse(String),

    /// The requested file does not exist (or is not a regular file). Raised
    /// before the recoverable-failure conversion layer.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// `analyze_sync` was called from inside a running async runtime.
    #[error("analyze_sync must not be called from within an async runtime; use analyze() instead")]
    Runtime,

    /// Invariant violation inside the engine. Never converted into a
    /// `success = false` result.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AnalyzerError {
    /// Whether the engine may convert this error into a failed
    /// [`AnalysisResult`](crate::model::AnalysisResult) instead of returning it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalyzerError::PathSecurity(_)
                | AnalyzerError::LanguageResolution(_)
                | AnalyzerError::PluginUnavailable { .. }
                | AnalyzerError::Parse(_)
        )
    }
}
