use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::leave as api;
use crate::client::ApiClient;
use crate::error::{ClientResult, ValidationError};
use crate::forms::leave_request::LeaveRequestForm;
use crate::model::leave_quota::{LeaveQuota, QuotaAdjustment, QuotaQuery};
use crate::model::leave_request::{LeaveFilter, LeaveRequest};
use crate::model::leave_type::LeaveType;
use crate::models::{MessageResponse, PageRequest};
use crate::screens::report;
use crate::view::{ActionGuard, ListView, Notifier, Searchable};

impl Searchable for LeaveRequest {
    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.employee_name.as_deref().unwrap_or_default(),
            self.leave_type_name.as_deref().unwrap_or_default(),
            self.reason
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveAction {
    Approve,
    Reject(String),
    Cancel,
}

impl LeaveAction {
    fn messages(&self) -> (&'static str, &'static str) {
        match self {
            LeaveAction::Approve => ("Leave request approved", "Failed to approve leave request"),
            LeaveAction::Reject(_) => ("Leave request rejected", "Failed to reject leave request"),
            LeaveAction::Cancel => ("Leave request cancelled", "Failed to cancel leave request"),
        }
    }
}

/// A submitted request plus the quota warning that was shown, if any.
#[derive(Debug, Clone)]
pub struct Submitted {
    pub request: LeaveRequest,
    pub quota_warning: Option<String>,
}

pub struct LeaveScreen {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    guard: ActionGuard,
    pub requests: ListView<LeaveRequest>,
    pub filter: LeaveFilter,
    pub page: PageRequest,
    pub quotas: Vec<LeaveQuota>,
    pub types: Vec<LeaveType>,
}

impl LeaveScreen {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            guard: ActionGuard::new(),
            requests: ListView::new(10),
            filter: LeaveFilter::default(),
            page: PageRequest::default(),
            quotas: Vec::new(),
            types: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let (client, filter, page) = (&self.client, &self.filter, self.page);
        self.requests
            .load_page(
                || api::list_requests(client, filter, page),
                "Failed to load leave requests",
            )
            .await
    }

    /// Quota balances of the logged in employee (or `employee_id` for HR).
    pub async fn load_quotas(
        &mut self,
        employee_id: Option<Uuid>,
        year: Option<i32>,
    ) -> ClientResult<()> {
        let query = QuotaQuery {
            employee_id,
            year: Some(year.unwrap_or_else(|| Utc::now().year())),
        };
        self.quotas = api::list_quota(&self.client, &query).await?;
        Ok(())
    }

    pub async fn load_types(&mut self) -> ClientResult<()> {
        self.types = api::list_types(&self.client).await?;
        Ok(())
    }

    pub fn quota_for(&self, leave_type_id: Uuid) -> Option<&LeaveQuota> {
        self.quotas.iter().find(|q| q.leave_type_id == leave_type_id)
    }

    /// Validate, send one request, refetch. A low balance is only a warning;
    /// the server decides whether the request is accepted.
    pub async fn submit_request(&mut self, form: &LeaveRequestForm) -> ClientResult<Submitted> {
        let quota_warning = form
            .leave_type
            .as_ref()
            .and_then(|t| form.quota_warning(self.quota_for(t.id)));
        if let Some(w) = &quota_warning {
            warn!(warning = %w, "Submitting leave over quota");
        }

        let outcome = match form.validate() {
            Ok(submission) => api::create_request(&self.client, &submission).await,
            Err(e) => Err(e.into()),
        };
        let request = report(
            self.notifier.as_ref(),
            outcome,
            "Leave request submitted",
            "Failed to submit leave request",
        )?;
        self.refresh().await.ok();
        Ok(Submitted {
            request,
            quota_warning,
        })
    }

    pub fn is_busy(&self, id: Uuid) -> bool {
        self.guard.is_busy(id)
    }

    /// Approve/reject/cancel buttons are shown for pending requests only and
    /// disabled while any action on the row runs.
    pub fn can_act(&self, request: &LeaveRequest) -> bool {
        request.status.is_pending() && !self.guard.is_busy(request.id)
    }

    /// Guarded action without refetch.
    pub async fn act(&self, id: Uuid, action: &LeaveAction) -> ClientResult<MessageResponse> {
        if let Some(request) = self.requests.items().iter().find(|r| r.id == id) {
            if !request.status.is_pending() {
                let err = ValidationError::new(
                    "status",
                    format!("Leave request is already {}", request.status),
                );
                return report(self.notifier.as_ref(), Err(err.into()), "", action.messages().1);
            }
        }

        let client = &self.client;
        let call = async move {
            match action {
                LeaveAction::Approve => {
                    client.require_session()?.require_reviewer()?;
                    api::approve(client, id).await
                }
                LeaveAction::Reject(reason) => {
                    client.require_session()?.require_reviewer()?;
                    api::reject(client, id, reason).await
                }
                LeaveAction::Cancel => api::cancel(client, id).await,
            }
        };
        let (success, failure) = action.messages();
        let outcome = self.guard.run(id, call).await;
        report(self.notifier.as_ref(), outcome, success, failure)
    }

    pub async fn run_action(&mut self, id: Uuid, action: LeaveAction) -> ClientResult<()> {
        self.act(id, &action).await?;
        info!(leave_request_id = %id, ?action, "Leave request updated");
        self.refresh().await.ok();
        Ok(())
    }

    pub async fn adjust_quota(&mut self, adjustment: &QuotaAdjustment) -> ClientResult<LeaveQuota> {
        let outcome = match self.client.require_session().and_then(|s| s.require_admin()) {
            Ok(()) => api::adjust_quota(&self.client, adjustment).await,
            Err(e) => Err(e),
        };
        let quota = report(
            self.notifier.as_ref(),
            outcome,
            "Leave quota adjusted",
            "Failed to adjust leave quota",
        )?;
        self.load_quotas(Some(adjustment.employee_id), Some(adjustment.year))
            .await
            .ok();
        Ok(quota)
    }
}
