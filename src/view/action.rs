//! In-flight guard for row actions (approve, reject, delete, finalize).

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};

/// Tracks which records have a request in flight. While a record is busy
/// every action button on its row is disabled, so approve and reject can
/// never race each other. The flag only disables buttons; nothing about the
/// record itself is changed until the list is refetched.
#[derive(Debug, Clone, Default)]
pub struct ActionGuard {
    busy: Arc<Mutex<HashSet<Uuid>>>,
}

/// Clears the busy flag when the call settles, whatever the outcome.
struct Release {
    busy: Arc<Mutex<HashSet<Uuid>>>,
    id: Uuid,
}

impl Drop for Release {
    fn drop(&mut self) {
        lock(&self.busy).remove(&self.id);
    }
}

fn lock(busy: &Mutex<HashSet<Uuid>>) -> MutexGuard<'_, HashSet<Uuid>> {
    // the set stays consistent even if a holder panicked
    busy.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ActionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the action buttons of `id` are disabled.
    pub fn is_busy(&self, id: Uuid) -> bool {
        lock(&self.busy).contains(&id)
    }

    pub fn any_busy(&self) -> bool {
        !lock(&self.busy).is_empty()
    }

    /// Run `action` for `id`. A second action on a busy record is refused
    /// with [`ClientError::Busy`] without being started.
    pub async fn run<T, Fut>(&self, id: Uuid, action: Fut) -> ClientResult<T>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        if !lock(&self.busy).insert(id) {
            debug!(%id, "Action refused, record busy");
            return Err(ClientError::Busy(id.to_string()));
        }
        let _release = Release {
            busy: self.busy.clone(),
            id,
        };
        action.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn busy_while_in_flight_and_released_after() {
        let guard = ActionGuard::new();
        let id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel::<ClientResult<()>>();

        let running = {
            let guard = guard.clone();
            tokio::spawn(async move {
                guard
                    .run(id, async move { rx.await.expect("sender kept") })
                    .await
            })
        };
        tokio::task::yield_now().await;
        while !guard.is_busy(id) {
            tokio::task::yield_now().await;
        }

        // a second action on the same row is refused
        let second = guard.run(id, async { Ok(()) }).await;
        assert!(matches!(second, Err(ClientError::Busy(_))));

        tx.send(Err(ClientError::Http { status: 500 })).unwrap();
        let outcome = running.await.unwrap();
        assert!(outcome.is_err());
        assert!(!guard.is_busy(id));
    }

    #[tokio::test]
    async fn other_rows_stay_enabled() {
        let guard = ActionGuard::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let result = guard
            .run(a, async {
                assert!(!guard.is_busy(b));
                Ok::<_, ClientError>(guard.is_busy(a))
            })
            .await
            .unwrap();
        assert!(result);
        assert!(!guard.any_busy());
    }
}
