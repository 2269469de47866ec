//! Screens: each one owns its list state, calls the API, raises a toast and
//! refetches. Nothing is changed locally before the server answered.

use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::view::Notifier;

pub mod attendance;
pub mod company;
pub mod employee;
pub mod leave;
pub mod master_data;
pub mod payroll;
pub mod subscription;
pub mod work_schedule;

#[cfg(test)]
pub(crate) mod testing;

/// Confirmation dialog shown before destructive or billing actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers yes to every prompt (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Ask first; a declined prompt never reaches the API.
pub(crate) fn confirmed(confirm: &dyn Confirm, prompt: &str) -> ClientResult<()> {
    if confirm.confirm(prompt) {
        Ok(())
    } else {
        debug!(prompt, "Declined");
        Err(ClientError::Cancelled)
    }
}

/// Toast the outcome of a mutation and hand it back.
pub(crate) fn report<T>(
    notifier: &dyn Notifier,
    result: ClientResult<T>,
    success: &str,
    failure: &str,
) -> ClientResult<T> {
    match &result {
        Ok(_) => notifier.success(success),
        Err(ClientError::Cancelled) => {}
        Err(e) => notifier.failure(e, failure),
    }
    result
}
