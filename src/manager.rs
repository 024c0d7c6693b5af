//! Process-wide engine registry: one [`AnalysisEngine`] per project root.
//!
//! An explicit registry object behind one lock, not module globals. The fast
//! path is an uncontended read; a miss re-checks under the write lock before
//! creating, so concurrent first calls still yield a single instance.

use crate::engine::AnalysisEngine;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};
use tracing::debug;

const DEFAULT_KEY: &str = "default";

pub struct EngineManager {
    engines: RwLock<HashMap<String, Arc<AnalysisEngine>>>,
}

static MANAGER: OnceLock<EngineManager> = OnceLock::new();

impl EngineManager {
    pub fn global() -> &'static EngineManager {
        MANAGER.get_or_init(|| EngineManager {
            engines: RwLock::new(HashMap::new()),
        })
    }

    /// Normalized registry key for a project root. Empty or missing roots
    /// collapse to the shared "default" key.
    pub fn normalize_key(project_root: Option<&str>) -> String {
        match project_root.map(str::trim) {
            None | Some("") => DEFAULT_KEY.to_string(),
            Some(root) => {
                let trimmed = root.trim_end_matches(['/', '\\']);
                if trimmed.is_empty() {
                    root.to_string()
                } else {
                    trimmed.to_string()
                }
            }
        }
    }

    /// The engine for `project_root`, created on first use. Two calls with
    /// the same normalized key return the same instance.
    pub fn get_instance(&self, project_root: Option<&str>) -> Arc<AnalysisEngine> {
        let key = Self::normalize_key(project_root);

        if let Some(engine) = self
            .engines
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&key)
        {
            return engine.clone();
        }

        let mut engines = self
            .engines
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Re-check: another caller may have created it between the locks.
        if let Some(engine) = engines.get(&key) {
            return engine.clone();
        }
        debug!("creating engine for project root '{}'", key);
        let engine = Arc::new(match project_root.map(str::trim) {
            None | Some("") => AnalysisEngine::with_default_root(),
            Some(root) => AnalysisEngine::new(root),
        });
        engines.insert(key, engine.clone());
        engine
    }

    /// Drop every registered engine. Test-only in spirit: callers must treat
    /// an engine handle as held for a logical session, not re-fetched across
    /// resets.
    pub fn reset_instances(&self) {
        self.engines
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

/// Convenience accessor on the process-wide registry.
pub fn get_instance(project_root: Option<&str>) -> Arc<AnalysisEngine> {
    EngineManager::global().get_instance(project_root)
}
