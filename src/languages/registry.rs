use super::LanguageDefinition;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct LanguageRegistry {
    languages: Vec<Arc<dyn LanguageDefinition>>,
    by_extension: HashMap<String, usize>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self {
            languages: Vec::new(),
            by_extension: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::GO));
        registry.register(Arc::new(super::PYTHON));
        registry.register(Arc::new(super::JAVASCRIPT));
        registry.register(Arc::new(super::TYPESCRIPT));
        registry.register(Arc::new(super::RUST));
        registry.register(Arc::new(super::CSHARP));
        registry.register(Arc::new(super::RUBY));
        registry.register(Arc::new(super::PHP));
        registry.register(Arc::new(super::SCALA));
        registry.register(Arc::new(super::SWIFT));
        registry.register(Arc::new(super::CPP));
        registry.register(Arc::new(super::D));
        registry.register(Arc::new(super::JAVA));
        registry.register(Arc::new(super::KOTLIN));
        registry
    }

    /// Registers a language. An extension already claimed by an earlier
    /// language keeps its first owner.
    pub fn register(&mut self, language: Arc<dyn LanguageDefinition>) {
        let index = self.languages.len();
        for ext in language.extensions() {
            self.by_extension
                .entry(ext.to_ascii_lowercase())
                .or_insert(index);
        }
        self.languages.push(language);
    }

    /// Looks up the language owning a file extension (case-insensitive)
    pub fn for_extension(&self, extension: &str) -> Option<&dyn LanguageDefinition> {
        self.by_extension
            .get(&extension.to_ascii_lowercase())
            .map(|&i| self.languages[i].as_ref())
    }

}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
