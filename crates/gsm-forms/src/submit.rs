// File: src/submit.rs
// Purpose: Validate-then-send flow for form submissions

use crate::engine::FormState;
use crate::summary::ErrorSummary;
use crate::toast::Toasts;
use crate::value::Values;
use std::future::Future;
use thiserror::Error;
use tracing::{info, warn};

/// Failure reported by the send step of a submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Session expired. The auth layer already handles this; no toast.
    #[error("session expired")]
    Unauthorized,

    #[error("server returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),
}

impl SubmitError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SubmitError::Unauthorized)
    }

    /// Map an HTTP status and body text to an error. 401 is always [`SubmitError::Unauthorized`].
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        if status == 401 {
            SubmitError::Unauthorized
        } else {
            SubmitError::Backend {
                status,
                message: message.into(),
            }
        }
    }
}

/// Result of [`submit`]
#[derive(Debug)]
pub enum SubmitOutcome<T> {
    /// Validation failed; nothing was sent
    Rejected(ErrorSummary),
    /// Sent successfully; the form has been reset
    Sent(T),
    /// Sending failed; values are kept for another attempt
    Failed(SubmitError),
}

impl<T> SubmitOutcome<T> {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            SubmitOutcome::Sent(value) => Some(value),
            _ => None,
        }
    }
}

/// Validate `form` and, when valid, hand a snapshot of its values to `send`.
///
/// Invalid forms get one warning toast listing the problems. Send failures
/// get an error toast unless the session expired.
pub async fn submit<T, F, Fut>(
    form: &mut FormState,
    toasts: &mut Toasts,
    success_message: &str,
    send: F,
) -> SubmitOutcome<T>
where
    F: FnOnce(Values) -> Fut,
    Fut: Future<Output = Result<T, SubmitError>>,
{
    if !form.validate_all() {
        let summary = form.error_summary();
        warn!(problems = summary.len(), "submit rejected by validation");
        toasts.warning(summary.to_string());
        return SubmitOutcome::Rejected(summary);
    }

    match send(form.values().clone()).await {
        Ok(value) => {
            info!("submit succeeded");
            toasts.success(success_message);
            form.reset();
            SubmitOutcome::Sent(value)
        }
        Err(err) => {
            if err.is_unauthorized() {
                info!("submit interrupted by expired session");
            } else {
                warn!(error = %err, "submit failed");
                toasts.error(err.to_string());
            }
            SubmitOutcome::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(SubmitError::from_status(401, "expired").is_unauthorized());
        assert_eq!(
            SubmitError::from_status(409, "duplicate"),
            SubmitError::Backend {
                status: 409,
                message: "duplicate".to_string()
            }
        );
    }

    #[test]
    fn test_error_display() {
        let err = SubmitError::from_status(500, "boom");
        assert_eq!(err.to_string(), "server returned 500: boom");
        assert_eq!(
            SubmitError::Network("timeout".to_string()).to_string(),
            "network error: timeout"
        );
    }
}
