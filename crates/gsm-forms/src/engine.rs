// File: src/engine.rs
// Purpose: Form state engine: values, errors and touched flags for one form

use crate::rule::{FieldRule, Messages, Rules};
use crate::summary::ErrorSummary;
use crate::value::{Errors, Touched, Value, Values};
use gsm_forms_validation::{validate_max, validate_max_length, validate_min, validate_min_length};
use std::fmt;
use tracing::{debug, trace};

static NULL: Value = Value::Null;

/// Kind of input control that produced a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Textarea,
    Password,
    Email,
    Number,
    Date,
    Select,
    Radio,
    /// Stores the checked state as a boolean
    Checkbox,
}

impl InputKind {
    /// Parse an HTML `type` attribute. Unknown types are treated as text.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "textarea" => Self::Textarea,
            "password" => Self::Password,
            "email" => Self::Email,
            "number" | "range" => Self::Number,
            "date" | "datetime-local" | "time" => Self::Date,
            "select" | "select-one" | "select-multiple" => Self::Select,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            _ => Self::Text,
        }
    }
}

type Listener = Box<dyn Fn(&FormState)>;

/// Values, errors and touched state for one form, checked against a [`Rules`] schema.
///
/// Errors are only computed for a field once it is touched (blurred, marked,
/// or swept by [`FormState::validate_all`]). After any change to values or
/// touched flags, every touched field is re-validated against the current
/// values, so cross-field rules stay current.
pub struct FormState {
    initial: Values,
    rules: Rules,
    values: Values,
    errors: Errors,
    touched: Touched,
    listeners: Vec<Listener>,
}

impl FormState {
    /// `initial` is kept verbatim for [`FormState::reset`]. Ruled fields
    /// missing from it read as [`Value::Null`].
    pub fn new(initial: Values, rules: Rules) -> Self {
        Self {
            values: initial.clone(),
            initial,
            rules,
            errors: Errors::new(),
            touched: Touched::new(),
            listeners: Vec::new(),
        }
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    pub fn touched(&self) -> &Touched {
        &self.touched
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Current value of a field, [`Value::Null`] when unset
    pub fn value(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&NULL)
    }

    /// Current error of a field. Empty strings count as no error.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors
            .get(name)
            .map(String::as_str)
            .filter(|e| !e.is_empty())
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.get(name).copied().unwrap_or(false)
    }

    /// Register an observer called after every mutating operation
    pub fn on_values_changed<F>(&mut self, listener: F)
    where
        F: Fn(&FormState) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Check `value` against the rule for `name`.
    ///
    /// Custom validators see `all` when given, otherwise the current values.
    /// Fields without a rule never have an error.
    pub fn validate_field(&self, name: &str, value: &Value, all: Option<&Values>) -> Option<String> {
        check_field(&self.rules, name, value, all.unwrap_or(&self.values))
    }

    /// Store a new value. A checkbox stores its checked state as a boolean.
    pub fn handle_change(&mut self, name: &str, value: impl Into<Value>, kind: InputKind) {
        let value = value.into();
        let value = match kind {
            InputKind::Checkbox => Value::Bool(value.to_bool()),
            _ => value,
        };
        trace!(field = name, ?kind, "field changed");
        self.values.insert(name.to_string(), value);
        // Untouched fields stay quiet while typing; touched ones (this one
        // included) are refreshed here.
        self.values_changed(None);
    }

    /// Mark the field touched and compute its error from `value`
    pub fn handle_blur(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        trace!(field = name, "field blurred");
        self.touched.insert(name.to_string(), true);
        let error = self.validate_field(name, &value, None);
        self.store_error(name, error);
        self.values_changed(Some(name));
    }

    /// Validate every ruled field, marking each one touched.
    ///
    /// Replaces the whole error map and returns true when no field failed.
    pub fn validate_all(&mut self) -> bool {
        for name in self.rules.names() {
            self.touched.insert(name.to_string(), true);
        }

        let errors: Errors = self
            .rules
            .names()
            .filter_map(|name| {
                check_field(&self.rules, name, self.value(name), &self.values)
                    .map(|error| (name.to_string(), error))
            })
            .collect();

        let valid = errors.is_empty();
        debug!(failed = errors.len(), valid, "validated all fields");
        self.errors = errors;
        self.notify();
        valid
    }

    /// True when no error is set and every required field has a value.
    ///
    /// Computed fresh on each call; required fields that were never touched
    /// still count even though they have no error entry.
    pub fn is_valid(&self) -> bool {
        let no_errors = self.errors.values().all(|e| e.is_empty());
        let required_filled = self
            .rules
            .iter()
            .filter(|(_, rule)| rule.required)
            .all(|(name, _)| !self.value(name).is_empty());
        no_errors && required_filled
    }

    /// Consolidated list of problems for display above the form actions
    pub fn error_summary(&self) -> ErrorSummary {
        ErrorSummary::collect(&self.rules, &self.values, &self.errors)
    }

    /// Restore initial values and forget all errors and touched flags
    pub fn reset(&mut self) {
        trace!("form reset");
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
        self.notify();
    }

    /// Replace all values, e.g. when loading a record into an edit form
    pub fn set_values(&mut self, values: Values) {
        self.values = values;
        self.values_changed(None);
    }

    /// Merge values into the current map
    pub fn patch_values<K, V, I>(&mut self, patch: I)
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.values
            .extend(patch.into_iter().map(|(k, v)| (k.into(), v.into())));
        self.values_changed(None);
    }

    pub fn update_values(&mut self, f: impl FnOnce(&mut Values)) {
        f(&mut self.values);
        self.values_changed(None);
    }

    /// Replace all errors. Seeded errors are kept until the next value or touched change.
    pub fn set_errors(&mut self, errors: Errors) {
        self.errors = errors;
        self.notify();
    }

    pub fn patch_errors<K, V, I>(&mut self, patch: I)
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.errors
            .extend(patch.into_iter().map(|(k, v)| (k.into(), v.into())));
        self.notify();
    }

    pub fn update_errors(&mut self, f: impl FnOnce(&mut Errors)) {
        f(&mut self.errors);
        self.notify();
    }

    pub fn set_touched(&mut self, touched: Touched) {
        self.touched = touched;
        self.values_changed(None);
    }

    pub fn patch_touched<K, I>(&mut self, patch: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, bool)>,
    {
        self.touched
            .extend(patch.into_iter().map(|(k, v)| (k.into(), v)));
        self.values_changed(None);
    }

    pub fn update_touched(&mut self, f: impl FnOnce(&mut Touched)) {
        f(&mut self.touched);
        self.values_changed(None);
    }

    fn store_error(&mut self, name: &str, error: Option<String>) {
        match error {
            Some(error) => {
                self.errors.insert(name.to_string(), error);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    /// Re-validate touched fields against current values, then notify.
    /// `skip` holds a field whose error was just computed by the caller.
    fn values_changed(&mut self, skip: Option<&str>) {
        let refreshed: Vec<(String, Option<String>)> = self
            .touched
            .iter()
            .filter(|(name, touched)| **touched && Some(name.as_str()) != skip)
            .map(|(name, _)| {
                let error = check_field(&self.rules, name, self.value(name), &self.values);
                (name.clone(), error)
            })
            .collect();

        for (name, error) in refreshed {
            self.store_error(&name, error);
        }
        self.notify();
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(self);
        }
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("touched", &self.touched)
            .field("rules", &self.rules)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Evaluate one rule. The first failing check wins.
fn check_field(rules: &Rules, name: &str, value: &Value, all: &Values) -> Option<String> {
    let rule = rules.get(name)?;
    let label = rule.label_or(name);
    let messages = rules.messages();

    if value.is_empty() {
        if rule.required {
            let message = rule
                .required_message
                .clone()
                .or_else(|| rule.message.clone())
                .unwrap_or_else(|| Messages::render(&messages.required, label));
            return Some(message);
        }
        // Optional and empty: only a custom validator may still object
        return run_custom(rule, value, all);
    }

    if let Value::String(s) = value {
        if let Some(min) = rule.min_length {
            if let Err(default) = validate_min_length(s, min) {
                return Some(fallback(rule, default));
            }
        }
        if let Some(max) = rule.max_length {
            if let Err(default) = validate_max_length(s, max) {
                return Some(fallback(rule, default));
            }
        }
        if let Some(pattern) = &rule.pattern {
            if !pattern.is_match(s) {
                return Some(fallback(
                    rule,
                    Messages::render(&messages.invalid_format, label),
                ));
            }
        }
    }

    if let Some(error) = run_custom(rule, value, all) {
        return Some(error);
    }

    let n = value.to_number();
    if let Some(min) = rule.min {
        if let Err(default) = validate_min(n, min) {
            return Some(fallback(rule, default));
        }
    }
    if let Some(max) = rule.max {
        if let Err(default) = validate_max(n, max) {
            return Some(fallback(rule, default));
        }
    }

    None
}

fn run_custom(rule: &FieldRule, value: &Value, all: &Values) -> Option<String> {
    rule.validate
        .as_ref()
        .and_then(|validate| validate(value, all))
        .filter(|e| !e.is_empty())
}

fn fallback(rule: &FieldRule, default: String) -> String {
    rule.message.clone().unwrap_or(default)
}
