//! Format registry for token stream serialization
//!
//! Each output format implements the `Formatter` trait and is registered with `FormatRegistry`
//! under its name, which is what the command line `--format` flag selects.

use crate::koji::token::Token;
use std::collections::HashMap;
use std::fmt;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during serialization
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Trait for token stream formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "json", "tokenviz")
    fn name(&self) -> &str;

    fn serialize(&self, tokens: &[Token]) -> Result<String, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of token formatters, looked up by name.
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any formatter of the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, tokens: &[Token], format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(tokens)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with the built-in formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry.register(super::TokenvizFormatter);
        registry.register(super::SimpleFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::koji::lexing::tokenize;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, tokens: &[Token]) -> Result<String, FormatError> {
            Ok(format!("{} tokens", tokens.len()))
        }
        fn description(&self) -> &str {
            "Test formatter"
        }
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
        assert_eq!(registry.get("test").map(|f| f.description()), Some("Test formatter"));
    }

    #[test]
    fn test_registry_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        let result = registry.serialize(&tokenize("橋本（はしもと）"), "test");
        assert_eq!(result, Ok("4 tokens".to_string()));
    }

    #[test]
    fn test_registry_serialize_not_found() {
        let registry = FormatRegistry::new();
        let result = registry.serialize(&[], "nonexistent");
        assert_eq!(
            result,
            Err(FormatError::FormatNotFound("nonexistent".to_string()))
        );
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["json", "simple", "tokenviz", "yaml"]
        );
    }

    #[test]
    fn test_registry_replace_formatter() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);
        registry.register(TestFormatter);

        assert_eq!(registry.list_formats().len(), 1);
    }

    #[test]
    fn test_format_error_display() {
        let err1 = FormatError::FormatNotFound("test".to_string());
        assert_eq!(format!("{err1}"), "Format 'test' not found");

        let err2 = FormatError::SerializationError("error".to_string());
        assert_eq!(format!("{err2}"), "Serialization error: error");
    }
}
