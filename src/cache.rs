//! Parse-result cache keyed by absolute path, validated by mtime + size.
//!
//! The stat pair is a deliberate trade-off: cheaper than a content hash,
//! blind to a same-second rewrite of identical size. Any mismatch evicts and
//! fully re-parses; there is no partial invalidation.
//!
//! Each path owns a slot with its own async fill gate, so at most one parse is
//! in flight per key and concurrent callers for the same uncached key await the
//! in-flight result instead of duplicating work. The parse job writes the entry
//! into the slot itself, so once dispatched it completes and lands even when
//! the caller that started it is cancelled. The global slot-map lock is scoped
//! to lookup only; nothing CPU-bound ever runs under it.

use crate::error::AnalyzerError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::SystemTime;
use tokio::sync::Mutex as AsyncMutex;
use tracing::debug;
use tree_sitter::{Parser, Tree};

/// One cached parse. Valid only while mtime+size still match the filesystem.
pub struct CacheEntry {
    pub mtime: SystemTime,
    pub size: u64,
    pub tree: Arc<Tree>,
    pub source: Arc<String>,
}

struct FileSlot {
    /// Single-flight gate: held by the caller driving a fill.
    fill: AsyncMutex<()>,
    entry: StdMutex<Option<CacheEntry>>,
}

#[derive(Default)]
pub struct ParseResultCache {
    slots: StdMutex<HashMap<PathBuf, Arc<FileSlot>>>,
}

impl ParseResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached tree for `path`, re-parsing when the stat pair
    /// changed. The boolean is true on a cache hit.
    pub async fn get_or_parse(
        &self,
        path: &Path,
        language: &str,
    ) -> Result<(Arc<Tree>, Arc<String>, bool), AnalyzerError> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AnalyzerError::FileNotFound(path.display().to_string())
            } else {
                AnalyzerError::Parse(format!("stat failed: {}", e))
            }
        })?;
        let mtime = metadata
            .modified()
            .map_err(|e| AnalyzerError::Internal(format!("mtime unavailable: {}", e)))?;
        let size = metadata.len();

        let slot = self.slot(path);
        // Single-flight per key: holding the fill gate makes concurrent
        // callers await the in-flight parse.
        let _fill = slot.fill.lock().await;
        {
            let entry = slot
                .entry
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(entry) = entry.as_ref() {
                if entry.mtime == mtime && entry.size == size {
                    debug!("cache hit for {}", path.display());
                    return Ok((entry.tree.clone(), entry.source.clone(), true));
                }
                debug!("cache stale for {}, re-parsing", path.display());
            }
        }

        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AnalyzerError::Parse(format!("read failed: {}", e)))?;
        let grammar = crate::language::get_tree_sitter_language(language).map_err(|_| {
            AnalyzerError::PluginUnavailable {
                dependency: format!("tree-sitter-{}", language),
            }
        })?;

        let source = Arc::new(source);
        let job_source = source.clone();
        let job_slot = slot.clone();
        let tree = tokio::task::spawn_blocking(move || {
            let mut parser = Parser::new();
            parser
                .set_language(&grammar)
                .map_err(|e| AnalyzerError::Parse(format!("parser setup failed: {}", e)))?;
            let tree = parser
                .parse(job_source.as_bytes(), None)
                .ok_or_else(|| AnalyzerError::Parse("parser produced no tree".to_string()))?;
            let tree = Arc::new(tree);
            // The job stores its own result; a caller cancelled while awaiting
            // cannot drop the parse, and waiters behind the gate see a hit.
            // Last-writer-wins replacement; never a partial update.
            *job_slot
                .entry
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(CacheEntry {
                mtime,
                size,
                tree: tree.clone(),
                source: job_source,
            });
            Ok::<_, AnalyzerError>(tree)
        })
        .await
        .map_err(|e| AnalyzerError::Internal(format!("parse task failed: {}", e)))??;

        Ok((tree, source, false))
    }

    pub fn evict(&self, path: &Path) {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(path);
    }

    pub fn clear(&self) {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    fn slot(&self, path: &Path) -> Arc<FileSlot> {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slots
            .entry(path.to_path_buf())
            .or_insert_with(|| {
                Arc::new(FileSlot {
                    fill: AsyncMutex::new(()),
                    entry: StdMutex::new(None),
                })
            })
            .clone()
    }
}
