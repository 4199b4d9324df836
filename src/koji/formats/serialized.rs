//! Structured formats: the serde representation of the token sequence as JSON or YAML.

use super::registry::{FormatError, Formatter};
use crate::koji::token::Token;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tokens: &[Token]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(tokens)
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "Token sequence as pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, tokens: &[Token]) -> Result<String, FormatError> {
        serde_yaml::to_string(tokens)
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "Token sequence as YAML"
    }
}
