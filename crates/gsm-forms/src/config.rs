// File: src/config.rs
// Purpose: Configuration parsing from gsm-forms.toml

use crate::error::SchemaError;
use crate::rule::{Messages, RuleSpec, Rules};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Forms configuration
///
/// ```toml
/// [messages]
/// required = "Поле «{label}» обязательно"
///
/// [toasts]
/// max_visible = 3
///
/// [forms.provider.name]
/// required = true
/// max_length = 100
/// label = "Provider"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormsConfig {
    #[serde(default)]
    pub messages: Messages,

    #[serde(default)]
    pub toasts: ToastConfig,

    /// Form name to field name to rule
    #[serde(default)]
    pub forms: BTreeMap<String, BTreeMap<String, RuleSpec>>,
}

/// Toast configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastConfig {
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

fn default_max_visible() -> usize {
    5
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
        }
    }
}

impl FormsConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from file if it exists, otherwise defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FormsConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Build the rule schema for a configured form.
    ///
    /// Fields come out in name order since TOML tables are unordered.
    pub fn rules(&self, form: &str) -> std::result::Result<Rules, SchemaError> {
        let fields = self
            .forms
            .get(form)
            .ok_or_else(|| SchemaError::UnknownForm(form.to_string()))?;

        let mut rules = Rules::new().with_messages(self.messages.clone());
        for (name, spec) in fields {
            rules.insert(name.clone(), spec.build(name)?);
        }
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[messages]
required = "Поле «{label}» обязательно"

[toasts]
max_visible = 3

[forms.provider.name]
required = true
max_length = 100
label = "Provider"

[forms.provider.api_url]
pattern = "^https?://"
message = "Must be an http(s) URL"
"#;

    #[test]
    fn test_defaults() {
        let config = FormsConfig::default();
        assert_eq!(config.toasts.max_visible, 5);
        assert_eq!(config.messages.required, "{label} is required");
        assert!(config.forms.is_empty());
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config = FormsConfig::from_toml_str("[toasts]\n").unwrap();
        assert_eq!(config.toasts.max_visible, 5);

        let config = FormsConfig::from_toml_str("[messages]\nrequired = \"need {label}\"\n").unwrap();
        assert_eq!(config.messages.required, "need {label}");
        assert_eq!(config.messages.invalid_format, "{label} has an invalid format");
    }

    #[test]
    fn test_rules_from_config() {
        let config = FormsConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.toasts.max_visible, 3);

        let rules = config.rules("provider").unwrap();
        let names: Vec<&str> = rules.names().collect();
        assert_eq!(names, vec!["api_url", "name"]);

        let name = rules.get("name").unwrap();
        assert!(name.required);
        assert_eq!(name.max_length, Some(100));
        assert_eq!(rules.messages().required, "Поле «{label}» обязательно");
    }

    #[test]
    fn test_unknown_form() {
        let config = FormsConfig::from_toml_str(SAMPLE).unwrap();
        assert!(matches!(
            config.rules("backup"),
            Err(SchemaError::UnknownForm(name)) if name == "backup"
        ));
    }

    #[test]
    fn test_unknown_rule_key_rejected() {
        let bad = "[forms.x.y]\nrequird = true\n";
        assert!(FormsConfig::from_toml_str(bad).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = FormsConfig::load("/nonexistent/gsm-forms.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));

        let config = FormsConfig::load_or_default("/nonexistent/gsm-forms.toml").unwrap();
        assert_eq!(config.toasts.max_visible, 5);
    }
}
