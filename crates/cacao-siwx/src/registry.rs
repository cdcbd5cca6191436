//! Lookup of message formatters by namespace.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use cacao_core::Cacao;

use crate::error::{SiwxError, SiwxResult};
use crate::factory::CapabilityFactory;
use crate::formatter::MessageFormatter;
use crate::message::SiwxMessage;

static GLOBAL: LazyLock<FormatterRegistry> = LazyLock::new(FormatterRegistry::with_defaults);

/// Registry of message formatters keyed by namespace tag.
#[derive(Debug, Clone)]
pub struct FormatterRegistry {
    formatters: HashMap<String, Arc<MessageFormatter>>,
}

impl FormatterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// Create a registry with the built-in formatters registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(MessageFormatter::ethereum());
        registry.register(MessageFormatter::solana());
        registry
    }

    /// The process-wide registry of built-in formatters.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Register a formatter, replacing any previous one for its namespace.
    pub fn register(&mut self, formatter: MessageFormatter) {
        self.formatters
            .insert(formatter.namespace().to_string(), Arc::new(formatter));
    }

    /// Get the formatter of a namespace.
    #[must_use]
    pub fn get(&self, namespace: &str) -> Option<Arc<MessageFormatter>> {
        self.formatters.get(namespace).cloned()
    }

    /// Get the formatter of a namespace, or fail.
    ///
    /// # Errors
    ///
    /// Returns [`SiwxError::UnsupportedNamespace`] if none is registered.
    pub fn require(&self, namespace: &str) -> SiwxResult<Arc<MessageFormatter>> {
        self.get(namespace)
            .ok_or_else(|| SiwxError::UnsupportedNamespace {
                namespace: namespace.to_string(),
            })
    }

    /// Registered namespace tags, sorted.
    #[must_use]
    pub fn namespaces(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formatters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Package a message using the formatter of `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`SiwxError::UnsupportedNamespace`] for an unknown namespace,
    /// otherwise any error of [`CapabilityFactory::from_chain_message`].
    #[allow(clippy::wrong_self_convention)]
    pub fn from_chain_message(&self, namespace: &str, message: &SiwxMessage) -> SiwxResult<Cacao> {
        self.require(namespace)?.from_chain_message(message)
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
