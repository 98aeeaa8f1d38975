// File: src/rule.rs
// Purpose: Declarative field rules and rule schemas

use crate::error::SchemaError;
use crate::value::{Value, Values};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Custom check over a field value and the full value record.
///
/// Returns `Some(message)` on failure. Panics are not caught by the engine.
pub type Validator = Arc<dyn Fn(&Value, &Values) -> Option<String> + Send + Sync>;

/// Constraints attached to one field name.
///
/// Checks run in a fixed order and the first failure wins:
/// required, empty short-circuit, min/max length, pattern, custom, min/max.
#[derive(Clone, Default)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub validate: Option<Validator>,
    /// Fallback text for any failing check
    pub message: Option<String>,
    /// Takes precedence over `message` for the required check
    pub required_message: Option<String>,
    /// Friendly name used in generated messages and error summaries
    pub label: Option<String>,
}

impl FieldRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Anchors are not added: write `^...$` for a full match.
    pub fn pattern(mut self, re: Regex) -> Self {
        self.pattern = Some(re);
        self
    }

    pub fn min(mut self, n: f64) -> Self {
        self.min = Some(n);
        self
    }

    pub fn max(mut self, n: f64) -> Self {
        self.max = Some(n);
        self
    }

    pub fn validate<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Values) -> Option<String> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(f));
        self
    }

    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.message = Some(text.into());
        self
    }

    pub fn required_message(mut self, text: impl Into<String>) -> Self {
        self.required_message = Some(text.into());
        self
    }

    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.label = Some(text.into());
        self
    }

    /// Label for messages, falling back to the field name
    pub fn label_or<'a>(&'a self, name: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(name)
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("min", &self.min)
            .field("max", &self.max)
            .field("validate", &self.validate.is_some())
            .field("message", &self.message)
            .field("required_message", &self.required_message)
            .field("label", &self.label)
            .finish()
    }
}

/// Templates for generated messages. `{label}` is replaced with the field label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default = "default_required")]
    pub required: String,

    #[serde(default = "default_invalid_format")]
    pub invalid_format: String,

    /// Used by error summaries for required fields with no error yet
    #[serde(default = "default_missing_required")]
    pub missing_required: String,
}

fn default_required() -> String {
    "{label} is required".to_string()
}

fn default_invalid_format() -> String {
    "{label} has an invalid format".to_string()
}

fn default_missing_required() -> String {
    "Required field is empty".to_string()
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: default_required(),
            invalid_format: default_invalid_format(),
            missing_required: default_missing_required(),
        }
    }
}

impl Messages {
    pub fn render(template: &str, label: &str) -> String {
        template.replace("{label}", label)
    }
}

/// Rule schema for one form, in declaration order
#[derive(Debug, Clone, Default)]
pub struct Rules {
    order: Vec<String>,
    rules: BTreeMap<String, FieldRule>,
    messages: Messages,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `name`. Replacing keeps the original position.
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.insert(name, rule);
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, rule: FieldRule) {
        let name = name.into();
        if !self.rules.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.rules.insert(name, rule);
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.rules.get(name)
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(name, rule)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.order
            .iter()
            .filter_map(|name| self.rules.get(name).map(|rule| (name.as_str(), rule)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Serializable form of a [`FieldRule`], as written in configuration files.
/// Custom validators cannot be expressed here and are attached in code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleSpec {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub message: Option<String>,
    pub required_message: Option<String>,
    pub label: Option<String>,
}

impl RuleSpec {
    /// Compile into a [`FieldRule`], checking the pattern and bounds
    pub fn build(&self, field: &str) -> Result<FieldRule, SchemaError> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(SchemaError::InvertedBounds {
                    field: field.to_string(),
                    min: min as f64,
                    max: max as f64,
                });
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(SchemaError::InvertedBounds {
                    field: field.to_string(),
                    min,
                    max,
                });
            }
        }

        let pattern = self
            .pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|source| SchemaError::InvalidPattern {
                field: field.to_string(),
                source,
            })?;

        Ok(FieldRule {
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
            pattern,
            min: self.min,
            max: self.max,
            validate: None,
            message: self.message.clone(),
            required_message: self.required_message.clone(),
            label: self.label.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_keep_declaration_order() {
        let rules = Rules::new()
            .field("zeta", FieldRule::new())
            .field("alpha", FieldRule::new().required())
            .field("zeta", FieldRule::new().required());

        let names: Vec<&str> = rules.names().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert!(rules.get("zeta").map(|r| r.required).unwrap_or(false));
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_label_fallback() {
        let plain = FieldRule::new();
        let labelled = FieldRule::new().label("E-mail");
        assert_eq!(plain.label_or("email"), "email");
        assert_eq!(labelled.label_or("email"), "E-mail");
    }

    #[test]
    fn test_message_template() {
        assert_eq!(
            Messages::render(&Messages::default().required, "Login"),
            "Login is required"
        );
    }

    #[test]
    fn test_spec_build() {
        let spec = RuleSpec {
            required: true,
            pattern: Some(r"^\d+$".to_string()),
            min: Some(1.0),
            max: Some(65535.0),
            ..RuleSpec::default()
        };
        let rule = spec.build("port").unwrap();
        assert!(rule.required);
        assert!(rule.pattern.unwrap().is_match("25"));
        assert!(rule.validate.is_none());
    }

    #[test]
    fn test_spec_rejects_bad_pattern() {
        let spec = RuleSpec {
            pattern: Some("([".to_string()),
            ..RuleSpec::default()
        };
        let err = spec.build("inn").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { ref field, .. } if field == "inn"));
    }

    #[test]
    fn test_spec_rejects_inverted_bounds() {
        let spec = RuleSpec {
            min_length: Some(5),
            max_length: Some(2),
            ..RuleSpec::default()
        };
        assert!(matches!(
            spec.build("name"),
            Err(SchemaError::InvertedBounds { .. })
        ));

        let spec = RuleSpec {
            min: Some(10.0),
            max: Some(1.0),
            ..RuleSpec::default()
        };
        assert!(spec.build("limit").is_err());
    }
}
