use tracing::info;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::{ClientResult, ValidationError};
use crate::model::payroll::{FinalizePayroll, PayrollQuery, PayrollRecord, PayrollSettings};
use crate::models::{MessageResponse, PageRequest, Paginated};
use crate::routes;

pub async fn list(
    client: &ApiClient,
    query: &PayrollQuery,
    page: PageRequest,
) -> ClientResult<Paginated<PayrollRecord>> {
    let mut params = query.to_query();
    page.push_query(&mut params);
    client.get_with(routes::PAYROLL_RECORDS, params).await
}

pub async fn get(client: &ApiClient, id: Uuid) -> ClientResult<PayrollRecord> {
    client.get(&routes::payroll_record(id)).await
}

/// Marks the given draft records as paid.
pub async fn finalize(client: &ApiClient, payroll_ids: Vec<Uuid>) -> ClientResult<MessageResponse> {
    if payroll_ids.is_empty() {
        return Err(
            ValidationError::new("payroll_ids", "Select at least one payroll record").into(),
        );
    }
    let count = payroll_ids.len();
    let response = client
        .post(routes::PAYROLL_FINALIZE, &FinalizePayroll { payroll_ids })
        .await?;
    info!(count, "Payroll finalized");
    Ok(response)
}

pub async fn settings(client: &ApiClient) -> ClientResult<PayrollSettings> {
    client.get(routes::PAYROLL_SETTINGS).await
}

pub async fn update_settings(
    client: &ApiClient,
    settings: &PayrollSettings,
) -> ClientResult<PayrollSettings> {
    if !(1..=31).contains(&settings.payday) {
        return Err(ValidationError::new("payday", "Payday must be between 1 and 31").into());
    }
    if settings.late_deduction_per_minute.is_sign_negative()
        || settings.early_leave_deduction_per_minute.is_sign_negative()
        || settings.overtime_rate_per_hour.is_sign_negative()
    {
        return Err(ValidationError::new("rates", "Rates cannot be negative").into());
    }
    client.put(routes::PAYROLL_SETTINGS, settings).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::client_as;
    use crate::error::ClientError;
    use crate::http::{ApiResponse, MockTransport, RequestBody};
    use rust_decimal::Decimal;
    use serde_json::json;

    #[tokio::test]
    async fn finalize_sends_ids() {
        let id = Uuid::new_v4();
        let expected = RequestBody::Json(json!({ "payroll_ids": [id] }));
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(move |req| req.path == "/payroll/finalize" && req.body == expected)
            .times(1)
            .returning(|_| Ok(ApiResponse::json(200, json!({"message": "1 payroll finalized"}))));

        let client = client_as(mock, "admin", None);
        finalize(&client, vec![id]).await.unwrap();
    }

    #[tokio::test]
    async fn nothing_selected_sends_nothing() {
        let mut mock = MockTransport::new();
        mock.expect_send().never();

        let client = client_as(mock, "admin", None);
        let err = finalize(&client, Vec::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn invalid_payday_sends_nothing() {
        let mut mock = MockTransport::new();
        mock.expect_send().never();

        let client = client_as(mock, "admin", None);
        let settings = PayrollSettings {
            late_deduction_per_minute: Decimal::new(1_000, 0),
            early_leave_deduction_per_minute: Decimal::new(1_000, 0),
            overtime_rate_per_hour: Decimal::new(20_000, 0),
            late_tolerance_minutes: 10,
            payday: 32,
        };
        assert!(update_settings(&client, &settings).await.is_err());
    }
}
