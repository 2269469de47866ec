use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::{ClientResult, ValidationError};
use crate::forms::leave_request::{LeaveSubmission, validate_adjustment};
use crate::model::leave_quota::{LeaveQuota, QuotaAdjustment, QuotaQuery};
use crate::model::leave_request::{LeaveFilter, LeaveRequest};
use crate::model::leave_type::{LeaveType, LeaveTypePayload};
use crate::models::{MessageResponse, PageRequest, Paginated};
use crate::routes;

#[derive(Debug, Serialize)]
struct RejectBody<'a> {
    rejection_reason: &'a str,
}

// Requests

pub async fn list_requests(
    client: &ApiClient,
    filter: &LeaveFilter,
    page: PageRequest,
) -> ClientResult<Paginated<LeaveRequest>> {
    let mut query = filter.to_query();
    page.push_query(&mut query);
    client.get_with(routes::LEAVE_REQUESTS, query).await
}

#[instrument(skip(client, submission), fields(leave_type_id = %submission.leave_type_id))]
pub async fn create_request(
    client: &ApiClient,
    submission: &LeaveSubmission,
) -> ClientResult<LeaveRequest> {
    let employee_id = client.require_session()?.require_employee()?;
    let created: LeaveRequest = client
        .post_multipart(routes::LEAVE_REQUESTS, submission.to_multipart())
        .await?;
    info!(
        %employee_id,
        leave_request_id = %created.id,
        days = created.total_days,
        "Leave requested"
    );
    Ok(created)
}

pub async fn approve(client: &ApiClient, id: Uuid) -> ClientResult<MessageResponse> {
    client
        .post_empty(&routes::leave_request_action(id, "approve"))
        .await
}

pub async fn reject(client: &ApiClient, id: Uuid, reason: &str) -> ClientResult<MessageResponse> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ValidationError::new("rejection_reason", "Rejection reason is required").into());
    }
    client
        .post(
            &routes::leave_request_action(id, "reject"),
            &RejectBody {
                rejection_reason: reason,
            },
        )
        .await
}

pub async fn cancel(client: &ApiClient, id: Uuid) -> ClientResult<MessageResponse> {
    client
        .post_empty(&routes::leave_request_action(id, "cancel"))
        .await
}

// Quota

pub async fn list_quota(client: &ApiClient, query: &QuotaQuery) -> ClientResult<Vec<LeaveQuota>> {
    client.get_with(routes::LEAVE_QUOTA, query.to_query()).await
}

pub async fn adjust_quota(
    client: &ApiClient,
    adjustment: &QuotaAdjustment,
) -> ClientResult<LeaveQuota> {
    validate_adjustment(adjustment)?;
    let quota: LeaveQuota = client.post(routes::LEAVE_QUOTA_ADJUST, adjustment).await?;
    info!(
        employee_id = %adjustment.employee_id,
        delta = adjustment.adjustment,
        available = quota.available_quota,
        "Quota adjusted"
    );
    Ok(quota)
}

// Leave types

pub async fn list_types(client: &ApiClient) -> ClientResult<Vec<LeaveType>> {
    client.get(routes::LEAVE_TYPES).await
}

pub async fn create_type(
    client: &ApiClient,
    payload: &LeaveTypePayload,
) -> ClientResult<LeaveType> {
    check_type(payload)?;
    client.post(routes::LEAVE_TYPES, payload).await
}

pub async fn update_type(
    client: &ApiClient,
    id: Uuid,
    payload: &LeaveTypePayload,
) -> ClientResult<LeaveType> {
    check_type(payload)?;
    client.put(&routes::leave_type(id), payload).await
}

pub async fn delete_type(client: &ApiClient, id: Uuid) -> ClientResult<MessageResponse> {
    client.delete(&routes::leave_type(id)).await
}

fn check_type(payload: &LeaveTypePayload) -> Result<(), ValidationError> {
    if payload.name.trim().is_empty() {
        return Err(ValidationError::new("name", "Name is required"));
    }
    if payload.default_quota < 0.0 {
        return Err(ValidationError::new("default_quota", "Quota cannot be negative"));
    }
    Ok(())
}
