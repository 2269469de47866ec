use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::{ClientResult, ValidationError};
use crate::forms::clock::{ClockKind, ClockSubmission};
use crate::model::attendance::{Attendance, AttendanceFilter};
use crate::models::{MessageResponse, PageRequest, Paginated};
use crate::routes;

#[derive(Debug, Serialize)]
struct RejectBody<'a> {
    reason: &'a str,
}

pub async fn list(
    client: &ApiClient,
    filter: &AttendanceFilter,
    page: PageRequest,
) -> ClientResult<Paginated<Attendance>> {
    let mut query = filter.to_query();
    page.push_query(&mut query);
    client.get_with(routes::ATTENDANCE, query).await
}

/// Today's record of the logged in employee, `None` before clock-in.
pub async fn today(client: &ApiClient) -> ClientResult<Option<Attendance>> {
    client.require_session()?.require_employee()?;
    client.get_optional(routes::ATTENDANCE_TODAY).await
}

/// Clock-in or clock-out with the captured coordinates and photo.
#[instrument(skip(client, submission), fields(kind = %submission.kind))]
pub async fn clock(client: &ApiClient, submission: &ClockSubmission) -> ClientResult<Attendance> {
    let employee_id = client.require_session()?.require_employee()?;
    let path = match submission.kind {
        ClockKind::In => routes::ATTENDANCE_CLOCK_IN,
        ClockKind::Out => routes::ATTENDANCE_CLOCK_OUT,
    };

    let record: Attendance = client.post_multipart(path, submission.to_multipart()).await?;
    info!(%employee_id, attendance_id = %record.id, status = %record.status, "Clock recorded");
    Ok(record)
}

pub async fn approve(client: &ApiClient, id: Uuid) -> ClientResult<MessageResponse> {
    client.post_empty(&routes::attendance_approve(id)).await
}

pub async fn reject(client: &ApiClient, id: Uuid, reason: &str) -> ClientResult<MessageResponse> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ValidationError::new("reason", "Rejection reason is required").into());
    }
    client
        .post(&routes::attendance_reject(id), &RejectBody { reason })
        .await
}

pub async fn delete(client: &ApiClient, id: Uuid) -> ClientResult<MessageResponse> {
    client.delete(&routes::attendance(id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::client_as;
    use crate::error::ClientError;
    use crate::forms::clock::sample_photo;
    use crate::http::{ApiResponse, MockTransport, RequestBody};
    use crate::model::attendance::{AttendanceStatus, sample_attendance};
    use crate::model::geo::GeoPoint;
    use serde_json::json;

    fn submission(kind: ClockKind) -> ClockSubmission {
        ClockSubmission {
            kind,
            location: GeoPoint::new(-6.2, 106.8),
            photo: sample_photo(),
            notes: None,
            schedule_location_id: None,
        }
    }

    #[tokio::test]
    async fn clock_in_posts_multipart_with_bearer() {
        let record = sample_attendance(AttendanceStatus::Present);
        let body = serde_json::to_value(&record).unwrap();

        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| {
                req.path == "/attendance/clock-in"
                    && req.bearer.is_some()
                    && matches!(&req.body, RequestBody::Multipart(form)
                        if form.field("latitude").is_some() && form.files.len() == 1)
            })
            .times(1)
            .returning(move |_| Ok(ApiResponse::json(201, json!({ "data": body.clone() }))));

        let client = client_as(mock, "employee", Some(Uuid::new_v4()));
        let saved = clock(&client, &submission(ClockKind::In)).await.unwrap();
        assert_eq!(saved.id, record.id);
    }

    #[tokio::test]
    async fn clock_without_employee_profile_sends_nothing() {
        let mut mock = MockTransport::new();
        mock.expect_send().never();

        let client = client_as(mock, "admin", None);
        let err = clock(&client, &submission(ClockKind::Out)).await.unwrap_err();
        assert!(matches!(err, ClientError::Forbidden(_)));
    }

    #[tokio::test]
    async fn blank_rejection_reason_sends_nothing() {
        let mut mock = MockTransport::new();
        mock.expect_send().never();

        let client = client_as(mock, "hr", None);
        let err = reject(&client, Uuid::new_v4(), "   ").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn today_is_none_before_clock_in() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Ok(ApiResponse::json(200, json!({ "data": null }))));

        let client = client_as(mock, "employee", Some(Uuid::new_v4()));
        assert!(today(&client).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_sends_filter_and_paging() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| {
                req.query_param("status") == Some("late")
                    && req.query_param("page") == Some("2")
                    && req.query_param("per_page") == Some("20")
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::json(200, json!({ "data": [] }))));

        let client = client_as(mock, "hr", None);
        let filter = AttendanceFilter {
            status: Some(AttendanceStatus::Late),
            ..Default::default()
        };
        let page = list(&client, &filter, PageRequest::new(2, 20)).await.unwrap();
        assert!(page.data.is_empty());
    }
}
