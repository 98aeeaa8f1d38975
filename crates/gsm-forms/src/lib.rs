//! # gsm-forms
//!
//! Form state and rule validation for the GSM Converter admin front-end.
//!
//! ## Quick Start
//!
//! ```rust
//! use gsm_forms::{values, FieldRule, FormState, InputKind, Rules};
//!
//! let rules = Rules::new().field("name", FieldRule::new().required().max_length(255));
//! let mut form = FormState::new(values([("name", "")]), rules);
//!
//! // Untouched fields show no errors while typing
//! form.handle_change("name", "Ромашка", InputKind::Text);
//! assert!(form.errors().is_empty());
//! assert!(form.is_valid());
//!
//! form.handle_blur("name", "");
//! assert_eq!(form.error("name"), Some("name is required"));
//! ```
//!
//! ## Architecture
//!
//! - [`FormState`] owns values, errors and touched flags for one form
//! - [`Rules`] / [`FieldRule`] declare per-field constraints; [`RuleSpec`]
//!   is their configuration-file form
//! - [`ErrorSummary`] lists problems above the form's buttons
//! - [`Toasts`] and [`submit`] cover the validate-then-send flow
//! - [`schemas`] holds the admin forms' rule sets
//!
//! Primitive checks live in the `gsm-forms-validation` crate.

pub mod config;
pub mod engine;
pub mod error;
pub mod rule;
pub mod schemas;
pub mod submit;
pub mod summary;
pub mod toast;
pub mod value;

pub use config::{FormsConfig, ToastConfig};
pub use engine::{FormState, InputKind};
pub use error::SchemaError;
pub use rule::{FieldRule, Messages, RuleSpec, Rules, Validator};
pub use submit::{submit, SubmitError, SubmitOutcome};
pub use summary::{ErrorSummary, SummaryEntry, SummaryKind};
pub use toast::{Toast, ToastId, ToastLevel, Toasts};
pub use value::{values, values_from_json, Errors, Touched, Value, Values};
