use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::api::attendance as api;
use crate::client::ApiClient;
use crate::error::{ClientResult, ValidationError};
use crate::forms::clock::{ClockForm, ClockKind};
use crate::model::attendance::{Attendance, AttendanceFilter, AttendanceSummary};
use crate::models::{MessageResponse, PageRequest};
use crate::screens::{Confirm, confirmed, report};
use crate::view::{ActionGuard, ListView, Notifier, Searchable};

impl Searchable for Attendance {
    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.employee_name.as_deref().unwrap_or_default(),
            self.date,
            self.status
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Review {
    Approve,
    Reject,
}

pub struct AttendanceScreen {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    guard: ActionGuard,
    pub list: ListView<Attendance>,
    pub filter: AttendanceFilter,
    pub page: PageRequest,
}

impl AttendanceScreen {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            guard: ActionGuard::new(),
            list: ListView::new(10),
            filter: AttendanceFilter::default(),
            page: PageRequest::default(),
        }
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let (client, filter, page) = (&self.client, &self.filter, self.page);
        self.list
            .load_page(|| api::list(client, filter, page), "Failed to load attendance")
            .await
    }

    /// Counts per status for the attendance chart.
    pub fn summary(&self) -> AttendanceSummary {
        AttendanceSummary::from_records(self.list.items())
    }

    /// Send a completed clock form. An incomplete form never reaches the API.
    pub async fn submit_clock(&mut self, form: &ClockForm) -> ClientResult<Attendance> {
        let (success, failure) = match form.kind {
            ClockKind::In => ("Clocked in successfully", "Failed to clock in"),
            ClockKind::Out => ("Clocked out successfully", "Failed to clock out"),
        };
        let outcome = match form.validate() {
            Ok(submission) => api::clock(&self.client, &submission).await,
            Err(e) => Err(e.into()),
        };
        let record = report(self.notifier.as_ref(), outcome, success, failure)?;
        self.refresh().await.ok();
        Ok(record)
    }

    /// Whether approve/reject buttons of `id` are enabled.
    pub fn can_review(&self, record: &Attendance) -> bool {
        record.status.is_reviewable() && !self.guard.is_busy(record.id)
    }

    pub fn is_busy(&self, id: Uuid) -> bool {
        self.guard.is_busy(id)
    }

    /// Guarded review call without refetch. A second review of the same
    /// record while the first is in flight fails with `Busy`.
    pub async fn review(
        &self,
        id: Uuid,
        decision: Review,
        reason: Option<&str>,
    ) -> ClientResult<MessageResponse> {
        let client = &self.client;
        let call = async move {
            match decision {
                Review::Approve => api::approve(client, id).await,
                Review::Reject => api::reject(client, id, reason.unwrap_or_default()).await,
            }
        };
        let (success, failure) = match decision {
            Review::Approve => ("Attendance approved", "Failed to approve attendance"),
            Review::Reject => ("Attendance rejected", "Failed to reject attendance"),
        };
        let outcome = self.guard.run(id, call).await;
        report(self.notifier.as_ref(), outcome, success, failure)
    }

    pub async fn approve(&mut self, id: Uuid) -> ClientResult<()> {
        self.client.require_session()?.require_reviewer()?;
        self.review(id, Review::Approve, None).await?;
        info!(attendance_id = %id, "Attendance approved");
        self.refresh().await.ok();
        Ok(())
    }

    pub async fn reject(&mut self, id: Uuid, reason: &str) -> ClientResult<()> {
        self.client.require_session()?.require_reviewer()?;
        self.review(id, Review::Reject, Some(reason)).await?;
        self.refresh().await.ok();
        Ok(())
    }

    pub async fn delete(&mut self, id: Uuid, confirm: &dyn Confirm) -> ClientResult<()> {
        self.client.require_session()?.require_admin()?;
        let outcome = match confirmed(confirm, "Delete this attendance record?") {
            Ok(()) => self.guard.run(id, api::delete(&self.client, id)).await,
            Err(e) => Err(e),
        };
        report(
            self.notifier.as_ref(),
            outcome,
            "Attendance deleted",
            "Failed to delete attendance",
        )?;
        self.refresh().await.ok();
        Ok(())
    }

    /// Record in the current list, for flows that only have an id.
    pub fn find(&self, id: Uuid) -> ClientResult<&Attendance> {
        self.list
            .items()
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| ValidationError::new("id", "Attendance record not found").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::forms::clock::sample_photo;
    use crate::model::attendance::{AttendanceStatus, sample_attendance};
    use crate::model::geo::GeoPoint;
    use crate::screens::testing::{Decline, ScriptedTransport, client_with};
    use crate::screens::AssumeYes;
    use crate::view::{LoadState, MemoryNotifier, Toast};
    use serde_json::json;
    use tokio::sync::Notify;

    fn screen(transport: Arc<ScriptedTransport>, role: &str) -> (AttendanceScreen, MemoryNotifier) {
        let notifier = MemoryNotifier::new();
        let screen =
            AttendanceScreen::new(client_with(transport, role), Arc::new(notifier.clone()));
        (screen, notifier)
    }

    #[tokio::test]
    async fn incomplete_clock_form_sends_nothing() {
        let transport = Arc::new(ScriptedTransport::new());
        let (mut screen, notifier) = screen(transport.clone(), "employee");

        let mut form = ClockForm::new(ClockKind::In);
        form.set_photo(sample_photo());
        let err = screen.submit_clock(&form).await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        assert!(transport.requests().is_empty());
        assert_eq!(notifier.last(), Some(Toast::Error("Location is required".into())));
    }

    #[tokio::test]
    async fn clock_in_toasts_and_refetches() {
        let record = serde_json::to_value(sample_attendance(AttendanceStatus::Late)).unwrap();
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply(201, json!({ "data": record.clone() }))
                .ok(json!([record])),
        );
        let (mut screen, notifier) = screen(transport.clone(), "employee");

        let mut form = ClockForm::new(ClockKind::In);
        form.location = Some(GeoPoint::new(-6.2, 106.8));
        form.set_photo(sample_photo());
        let saved = screen.submit_clock(&form).await.unwrap();

        assert_eq!(saved.status, AttendanceStatus::Late);
        assert_eq!(transport.paths(), vec!["/attendance/clock-in", "/attendance"]);
        assert_eq!(notifier.last(), Some(Toast::Success("Clocked in successfully".into())));
        assert_eq!(screen.summary().count(AttendanceStatus::Late), 1);
    }

    #[tokio::test]
    async fn approve_and_reject_are_disabled_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let transport = Arc::new(
            ScriptedTransport::gated(gate.clone()).reply(200, json!({"message": "Approved"})),
        );
        let (screen, notifier) = screen(transport.clone(), "hr");
        let waiting = sample_attendance(AttendanceStatus::WaitingApproval);
        let id = waiting.id;

        let first = screen.review(id, Review::Approve, None);
        let second = async {
            while !screen.is_busy(id) {
                tokio::task::yield_now().await;
            }
            assert!(!screen.can_review(&waiting));
            let refused = screen.review(id, Review::Reject, Some("Duplicate")).await;
            gate.notify_one();
            refused
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_ok());
        assert!(matches!(second, Err(ClientError::Busy(_))));
        assert_eq!(transport.requests().len(), 1);
        assert!(screen.can_review(&waiting));
        assert_eq!(
            notifier.toasts(),
            vec![
                Toast::Error("Please wait for the current action to finish".into()),
                Toast::Success("Attendance approved".into()),
            ]
        );
    }

    #[tokio::test]
    async fn failed_review_releases_the_row() {
        let transport = Arc::new(
            ScriptedTransport::new().reply(500, json!("<html>oops</html>")),
        );
        let (mut screen, notifier) = screen(transport.clone(), "admin");
        let id = Uuid::new_v4();

        assert!(screen.approve(id).await.is_err());
        assert!(!screen.is_busy(id));
        assert_eq!(
            notifier.last(),
            Some(Toast::Error("Failed to approve attendance".into()))
        );
        // no refetch after a failure
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let transport = Arc::new(ScriptedTransport::new());
        let (mut screen, notifier) = screen(transport.clone(), "admin");

        let err = screen.delete(Uuid::new_v4(), &Decline).await.unwrap_err();
        assert!(matches!(err, ClientError::Cancelled));
        assert!(transport.requests().is_empty());
        assert!(notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn employees_cannot_review() {
        let transport = Arc::new(ScriptedTransport::new());
        let (mut screen, _) = screen(transport.clone(), "employee");
        let err = screen.approve(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ClientError::Forbidden(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn accepted_review_succeeds_when_refetch_fails() {
        let transport = Arc::new(
            ScriptedTransport::new().reply(200, json!({"message": "Approved"})),
        );
        let (mut screen, notifier) = screen(transport.clone(), "hr");
        let id = Uuid::new_v4();

        screen.approve(id).await.unwrap();

        assert_eq!(
            transport.paths(),
            vec![format!("/attendance/{id}/approve"), "/attendance".to_string()]
        );
        assert_eq!(notifier.toasts(), vec![Toast::Success("Attendance approved".into())]);
        assert_eq!(
            screen.list.state(),
            &LoadState::Failed("Failed to load attendance".into())
        );
    }

    #[tokio::test]
    async fn accepted_delete_succeeds_when_refetch_fails() {
        let transport = Arc::new(
            ScriptedTransport::new().reply(200, json!({"message": "Deleted"})),
        );
        let (mut screen, notifier) = screen(transport.clone(), "admin");

        screen.delete(Uuid::new_v4(), &AssumeYes).await.unwrap();

        assert_eq!(transport.requests().len(), 2);
        assert_eq!(notifier.last(), Some(Toast::Success("Attendance deleted".into())));
        assert!(matches!(screen.list.state(), LoadState::Failed(_)));
    }
}
