//! Plugin registry: one extractor per language, loaded lazily.
//!
//! Plugins are a closed set declared in a static table. Realizing a plugin
//! validates its grammar once by constructing a throwaway parser; the outcome
//! (success or failure) is memoized for the registry's lifetime so a broken
//! grammar is reported once and never affects any other plugin.

use crate::error::AnalyzerError;
use crate::extractors::{
    ElementExtractor, bash::BashExtractor, c::CExtractor, cpp::CppExtractor,
    csharp::CSharpExtractor, go::GoExtractor, java::JavaExtractor,
    javascript::JavaScriptExtractor, python::PythonExtractor, ruby::RubyExtractor,
    rust::RustExtractor, sql::SqlExtractor, typescript::TypeScriptExtractor,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};
use tree_sitter::Parser;

/// Static descriptor for one language plugin.
pub struct PluginDescriptor {
    pub language: &'static str,
    /// Declared extensions, including the leading dot.
    pub extensions: &'static [&'static str],
    factory: fn() -> Arc<dyn ElementExtractor>,
}

static PLUGINS: &[PluginDescriptor] = &[
    PluginDescriptor {
        language: "python",
        extensions: &[".py", ".pyi"],
        factory: || Arc::new(PythonExtractor),
    },
    PluginDescriptor {
        language: "javascript",
        extensions: &[".js", ".mjs", ".cjs", ".jsx"],
        factory: || Arc::new(JavaScriptExtractor),
    },
    PluginDescriptor {
        language: "typescript",
        extensions: &[".ts"],
        factory: || Arc::new(TypeScriptExtractor::typescript()),
    },
    PluginDescriptor {
        language: "tsx",
        extensions: &[".tsx"],
        factory: || Arc::new(TypeScriptExtractor::tsx()),
    },
    PluginDescriptor {
        language: "rust",
        extensions: &[".rs"],
        factory: || Arc::new(RustExtractor),
    },
    PluginDescriptor {
        language: "go",
        extensions: &[".go"],
        factory: || Arc::new(GoExtractor),
    },
    PluginDescriptor {
        language: "java",
        extensions: &[".java"],
        factory: || Arc::new(JavaExtractor),
    },
    PluginDescriptor {
        language: "c",
        extensions: &[".c", ".h"],
        factory: || Arc::new(CExtractor),
    },
    PluginDescriptor {
        language: "cpp",
        extensions: &[".cpp", ".cc", ".cxx", ".hpp", ".hh"],
        factory: || Arc::new(CppExtractor),
    },
    PluginDescriptor {
        language: "csharp",
        extensions: &[".cs"],
        factory: || Arc::new(CSharpExtractor),
    },
    PluginDescriptor {
        language: "ruby",
        extensions: &[".rb"],
        factory: || Arc::new(RubyExtractor),
    },
    PluginDescriptor {
        language: "bash",
        extensions: &[".sh", ".bash"],
        factory: || Arc::new(BashExtractor),
    },
    PluginDescriptor {
        language: "sql",
        extensions: &[".sql"],
        factory: || Arc::new(SqlExtractor),
    },
];

type LoadOutcome = Result<Arc<dyn ElementExtractor>, String>;

pub struct PluginRegistry {
    loaded: Mutex<HashMap<&'static str, LoadOutcome>>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// All statically declared language ids, whether or not their grammar
    /// actually loads.
    pub fn get_supported_languages() -> Vec<&'static str> {
        PLUGINS.iter().map(|p| p.language).collect()
    }

    pub fn descriptor(language: &str) -> Option<&'static PluginDescriptor> {
        PLUGINS.iter().find(|p| p.language == language)
    }

    /// Declared extensions for a language id, leading dot included. Empty for
    /// languages that are not registered.
    pub fn extensions_for(language: &str) -> &'static [&'static str] {
        Self::descriptor(language)
            .map(|d| d.extensions)
            .unwrap_or(&[])
    }

    /// Language id claiming an extension (leading dot included).
    pub fn plugin_for_extension(ext: &str) -> Option<&'static str> {
        PLUGINS
            .iter()
            .find(|p| p.extensions.contains(&ext))
            .map(|p| p.language)
    }

    /// Resolve a plugin, realizing it on first use.
    ///
    /// Unknown language ids fail with `LanguageResolution`; registered
    /// languages whose grammar will not load fail with `PluginUnavailable`,
    /// and that failure is memoized rather than retried per call.
    pub fn get_plugin(&self, language: &str) -> Result<Arc<dyn ElementExtractor>, AnalyzerError> {
        let descriptor = Self::descriptor(language).ok_or_else(|| {
            AnalyzerError::LanguageResolution(format!("unsupported language: {}", language))
        })?;

        let mut loaded = self
            .loaded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let outcome = loaded
            .entry(descriptor.language)
            .or_insert_with(|| realize(descriptor));
        match outcome {
            Ok(plugin) => Ok(plugin.clone()),
            Err(dependency) => Err(AnalyzerError::PluginUnavailable {
                dependency: dependency.clone(),
            }),
        }
    }
}

fn realize(descriptor: &'static PluginDescriptor) -> LoadOutcome {
    let dependency = format!("tree-sitter-{}", descriptor.language);
    let grammar = match crate::language::get_tree_sitter_language(descriptor.language) {
        Ok(grammar) => grammar,
        Err(_) => {
            warn!("plugin '{}' has no grammar mapping", descriptor.language);
            return Err(dependency);
        }
    };
    // ABI skew between the core library and a grammar crate surfaces here.
    let mut parser = Parser::new();
    if parser.set_language(&grammar).is_err() {
        warn!(
            "grammar for '{}' is incompatible with the linked tree-sitter",
            descriptor.language
        );
        return Err(dependency);
    }
    debug!("loaded plugin for '{}'", descriptor.language);
    Ok((descriptor.factory)())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_declared_languages_are_listed() {
        let languages = PluginRegistry::get_supported_languages();
        assert!(languages.contains(&"python"));
        assert!(languages.contains(&"sql"));
        assert_eq!(languages.len(), PLUGINS.len());
    }

    #[test]
    fn extension_metadata_round_trips() {
        assert_eq!(PluginRegistry::plugin_for_extension(".py"), Some("python"));
        assert_eq!(PluginRegistry::plugin_for_extension(".tsx"), Some("tsx"));
        assert_eq!(PluginRegistry::plugin_for_extension(".xyz"), None);
        assert!(PluginRegistry::extensions_for("python").contains(&".py"));
        assert!(PluginRegistry::extensions_for("cobol85").is_empty());
        for descriptor in PluginRegistry::get_supported_languages() {
            for ext in PluginRegistry::extensions_for(descriptor) {
                assert_eq!(PluginRegistry::plugin_for_extension(ext), Some(descriptor));
            }
        }
    }

    #[test]
    fn plugin_load_is_memoized() {
        let registry = PluginRegistry::new();
        let first = registry.get_plugin("python").unwrap();
        let second = registry.get_plugin("python").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn unknown_language_is_a_resolution_error() {
        let registry = PluginRegistry::new();
        let err = registry.get_plugin("cobol85").unwrap_err();
        assert!(err.to_string().contains("unsupported language"));
    }
}
