// File: src/toast.rs
// Purpose: Toast notification service with an owned id counter

use crate::config::ToastConfig;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ToastId(u64);

impl ToastId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub level: ToastLevel,
    pub message: String,
}

/// Notification surface. Construct one per application and pass it to
/// whatever raises toasts; ids restart at 1 for every new instance.
#[derive(Debug)]
pub struct Toasts {
    next_id: u64,
    max_visible: usize,
    active: VecDeque<Toast>,
}

impl Toasts {
    pub fn new(config: &ToastConfig) -> Self {
        Self {
            next_id: 1,
            max_visible: config.max_visible.max(1),
            active: VecDeque::new(),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) -> ToastId {
        self.push(ToastLevel::Success, message.into())
    }

    pub fn error(&mut self, message: impl Into<String>) -> ToastId {
        self.push(ToastLevel::Error, message.into())
    }

    pub fn warning(&mut self, message: impl Into<String>) -> ToastId {
        self.push(ToastLevel::Warning, message.into())
    }

    pub fn info(&mut self, message: impl Into<String>) -> ToastId {
        self.push(ToastLevel::Info, message.into())
    }

    /// Returns false when the toast was already gone
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.active.len();
        self.active.retain(|t| t.id != id);
        before != self.active.len()
    }

    /// Visible toasts, oldest first
    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn push(&mut self, level: ToastLevel, message: String) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;

        tracing::debug!(%id, ?level, "{}", message);
        self.active.push_back(Toast { id, level, message });
        while self.active.len() > self.max_visible {
            self.active.pop_front();
        }
        id
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(&ToastConfig::default())
    }
}
