//! The per-project-root orchestrator.
//!
//! One engine owns its parse cache and plugin registry and runs every request
//! through the same pipeline: validate path, check existence, resolve
//! language, load plugin, parse (cached), extract, optionally query. Expected
//! failures become `success = false` results; a missing file and internal
//! invariant violations propagate as errors.

use crate::cache::ParseResultCache;
use crate::error::AnalyzerError;
use crate::extractors::ElementExtractor;
use crate::model::{AnalysisRequest, AnalysisResult, Element};
use crate::query::QueryExecutor;
use crate::registry::PluginRegistry;
use crate::{extractors::base, language, security};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use tree_sitter::Tree;

pub struct AnalysisEngine {
    project_root: PathBuf,
    registry: PluginRegistry,
    cache: ParseResultCache,
    queries: QueryExecutor,
}

impl AnalysisEngine {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            registry: PluginRegistry::new(),
            cache: ParseResultCache::new(),
            queries: QueryExecutor::new(),
        }
    }

    /// Engine for the process working directory.
    pub fn with_default_root() -> Self {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(root)
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn supported_languages(&self) -> Vec<&'static str> {
        PluginRegistry::get_supported_languages()
    }

    /// Async entry point. Recoverable analysis failures come back as
    /// `success = false` results; `FileNotFound`, runtime misuse and internal
    /// errors come back as `Err`.
    pub async fn analyze(
        &self,
        request: AnalysisRequest,
    ) -> Result<AnalysisResult, AnalyzerError> {
        let started = Instant::now();
        match self.run(&request).await {
            Ok(mut result) => {
                result.analysis_time_ms = started.elapsed().as_millis() as u64;
                Ok(result)
            }
            Err(err) if err.is_recoverable() => {
                debug!("analysis failed: {}", err);
                let language = request.language.clone().unwrap_or_default();
                let mut result = AnalysisResult::failure(
                    request.file_path.display().to_string(),
                    language,
                    err.to_string(),
                );
                result.analysis_time_ms = started.elapsed().as_millis() as u64;
                Ok(result)
            }
            Err(err) => Err(err),
        }
    }

    /// Blocking convenience wrapper. Must not be called from within a running
    /// async runtime; that misuse is reported as `AnalyzerError::Runtime`.
    pub fn analyze_sync(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalyzerError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(AnalyzerError::Runtime);
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AnalyzerError::Internal(format!("runtime setup failed: {}", e)))?;
        runtime.block_on(self.analyze(request))
    }

    async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzerError> {
        let resolved = security::validate_file_path(&request.file_path, &self.project_root)?;

        // Missing file is a distinguished error, checked before anything that
        // could be converted into a failed result.
        let metadata = tokio::fs::metadata(&resolved).await.map_err(|_| {
            AnalyzerError::FileNotFound(resolved.display().to_string())
        })?;
        if !metadata.is_file() {
            return Err(AnalyzerError::FileNotFound(resolved.display().to_string()));
        }

        let language = self.resolve_language(request, &resolved)?;
        let plugin = self.registry.get_plugin(language)?;
        let (tree, source, cache_hit) = self.cache.get_or_parse(&resolved, language).await?;
        debug!(
            "parsed {} ({}, cache_hit={})",
            resolved.display(),
            language,
            cache_hit
        );

        let (elements, node_count) = self
            .extract(plugin, tree.clone(), source.clone(), request)
            .await?;
        let query_results = self.run_queries(&tree, &source, language, &request.queries);

        Ok(AnalysisResult {
            file_path: resolved.display().to_string(),
            language: language.to_string(),
            line_count: source.lines().count(),
            elements,
            query_results,
            success: true,
            error_message: None,
            analysis_time_ms: 0,
            node_count,
        })
    }

    fn resolve_language(
        &self,
        request: &AnalysisRequest,
        resolved: &Path,
    ) -> Result<&'static str, AnalyzerError> {
        if let Some(requested) = &request.language {
            return PluginRegistry::descriptor(requested)
                .map(|d| d.language)
                .ok_or_else(|| {
                    AnalyzerError::LanguageResolution(format!(
                        "unsupported language: {}",
                        requested
                    ))
                });
        }
        language::detect_language(resolved).ok_or_else(|| {
            AnalyzerError::LanguageResolution(
                "could not detect language from extension or content".to_string(),
            )
        })
    }

    /// Offload the CPU-bound extraction so the scheduler stays responsive
    /// while a large file is processed.
    async fn extract(
        &self,
        plugin: Arc<dyn ElementExtractor>,
        tree: Arc<Tree>,
        source: Arc<String>,
        request: &AnalysisRequest,
    ) -> Result<(Vec<Element>, usize), AnalyzerError> {
        let include_complexity = request.include_complexity;
        let include_details = request.include_details;
        tokio::task::spawn_blocking(move || {
            let tree_ref = Some(tree.as_ref());
            let mut elements = plugin.extract_functions(tree_ref, &source);
            elements.extend(plugin.extract_classes(tree_ref, &source));
            elements.extend(plugin.extract_variables(tree_ref, &source));
            elements.extend(plugin.extract_imports(tree_ref, &source));
            elements.sort_by_key(|e| e.start_line);
            if include_complexity {
                base::annotate_complexity(&tree, &mut elements);
            }
            if !include_details {
                for element in &mut elements {
                    if let Some(first_line) = element.raw_text.lines().next() {
                        element.raw_text = first_line.to_string();
                    }
                }
            }
            let node_count = tree.root_node().descendant_count();
            (elements, node_count)
        })
        .await
        .map_err(|e| AnalyzerError::Internal(format!("extraction task failed: {}", e)))
    }

    fn run_queries(
        &self,
        tree: &Tree,
        source: &str,
        language: &str,
        names: &[String],
    ) -> HashMap<String, Vec<crate::model::QueryCapture>> {
        let mut results = HashMap::new();
        for name in names {
            match self.queries.execute(tree, source, language, name) {
                Ok(captures) => {
                    results.insert(name.clone(), captures);
                }
                Err(err) => {
                    warn!("query '{}' failed: {}", name, err);
                    results.insert(name.clone(), Vec::new());
                }
            }
        }
        results
    }
}
