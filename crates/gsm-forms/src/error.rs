// File: src/error.rs
// Purpose: Errors raised while building rule schemas

use thiserror::Error;

/// A rule schema that cannot be turned into a working [`crate::FieldRule`]
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("field `{field}`: invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("field `{field}`: lower bound {min} is greater than upper bound {max}")]
    InvertedBounds { field: String, min: f64, max: f64 },

    #[error("unknown form `{0}`")]
    UnknownForm(String),
}
