//! User notifications raised after a mutation settles.

use std::sync::{Arc, Mutex};

use tracing::{error, info};

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

impl Toast {
    pub fn message(&self) -> &str {
        match self {
            Toast::Success(m) | Toast::Error(m) => m,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    fn success(&self, message: &str) {
        self.notify(Toast::Success(message.to_string()));
    }

    /// Error toast following the uniform rule: the server's message when it
    /// sent a recognised error body, otherwise `fallback`.
    fn failure(&self, err: &ClientError, fallback: &str) {
        self.notify(Toast::Error(err.toast_message(fallback)));
    }
}

/// Writes toasts to the log; used by the CLI, which prints results itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast {
            Toast::Success(message) => info!(%message, "toast"),
            Toast::Error(message) => error!(%message, "toast"),
        }
    }
}

/// Keeps every toast in memory so callers can render or inspect them.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|t| t.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts().pop()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: Toast) {
        match self.toasts.lock() {
            Ok(mut toasts) => toasts.push(toast),
            Err(poisoned) => poisoned.into_inner().push(toast),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_uses_server_message_or_fallback() {
        let notifier = MemoryNotifier::new();
        notifier.failure(
            &ClientError::Api {
                status: 422,
                message: "Leave overlaps an existing request".into(),
            },
            "Failed to submit leave",
        );
        notifier.failure(&ClientError::Http { status: 500 }, "Failed to submit leave");

        assert_eq!(
            notifier.toasts(),
            vec![
                Toast::Error("Leave overlaps an existing request".into()),
                Toast::Error("Failed to submit leave".into()),
            ]
        );
    }
}
