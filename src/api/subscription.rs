use tracing::{info, instrument};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::{ClientResult, ValidationError};
use crate::model::subscription::{
    BillingResponse, ChangePlanRequest, ChangeSeatsRequest, CheckoutRequest, Invoice, Plan,
    Subscription,
};
use crate::models::MessageResponse;
use crate::routes;

/// Public plan catalogue, also shown before login.
pub async fn plans(client: &ApiClient) -> ClientResult<Vec<Plan>> {
    client.get(routes::SUBSCRIPTION_PLANS).await
}

/// Current subscription of the company, `None` when it never subscribed.
pub async fn current(client: &ApiClient) -> ClientResult<Option<Subscription>> {
    client.get_optional(routes::SUBSCRIPTION).await
}

#[instrument(skip(client, request), fields(plan_id = %request.plan_id, seats = request.seats))]
pub async fn checkout(
    client: &ApiClient,
    request: &CheckoutRequest,
) -> ClientResult<BillingResponse> {
    if request.seats == 0 {
        return Err(ValidationError::new("seats", "At least one seat is required").into());
    }
    let response: BillingResponse = client.post(routes::SUBSCRIPTION_CHECKOUT, request).await?;
    info!(redirect = response.payment_url.is_some(), "Checkout created");
    Ok(response)
}

pub async fn upgrade(client: &ApiClient, plan_id: Uuid) -> ClientResult<BillingResponse> {
    client
        .post(routes::SUBSCRIPTION_UPGRADE, &ChangePlanRequest { plan_id })
        .await
}

pub async fn downgrade(client: &ApiClient, plan_id: Uuid) -> ClientResult<BillingResponse> {
    client
        .post(routes::SUBSCRIPTION_DOWNGRADE, &ChangePlanRequest { plan_id })
        .await
}

pub async fn change_seats(client: &ApiClient, seats: u32) -> ClientResult<BillingResponse> {
    if seats == 0 {
        return Err(ValidationError::new("seats", "At least one seat is required").into());
    }
    client
        .post(routes::SUBSCRIPTION_CHANGE_SEATS, &ChangeSeatsRequest { seats })
        .await
}

pub async fn cancel(client: &ApiClient) -> ClientResult<BillingResponse> {
    client.post_empty(routes::SUBSCRIPTION_CANCEL).await
}

pub async fn invoices(client: &ApiClient) -> ClientResult<Vec<Invoice>> {
    client.get(routes::SUBSCRIPTION_INVOICES).await
}

pub async fn cancel_invoice(client: &ApiClient, id: Uuid) -> ClientResult<MessageResponse> {
    client.post_empty(&routes::invoice_cancel(id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::client_as;
    use crate::http::{ApiResponse, MockTransport};
    use crate::model::subscription::BillingCycle;
    use serde_json::json;

    #[tokio::test]
    async fn checkout_returns_payment_url() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| req.path == "/subscription/checkout")
            .times(1)
            .returning(|_| {
                Ok(ApiResponse::json(
                    200,
                    json!({"data": {"payment_url": "https://pay.example.com/inv/1"}}),
                ))
            });

        let client = client_as(mock, "admin", None);
        let request = CheckoutRequest {
            plan_id: Uuid::new_v4(),
            billing_cycle: BillingCycle::Yearly,
            seats: 10,
        };
        let response = checkout(&client, &request).await.unwrap();
        assert_eq!(
            response.payment_url.as_deref(),
            Some("https://pay.example.com/inv/1")
        );
    }

    #[tokio::test]
    async fn cancel_may_answer_without_body() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(1).returning(|_| {
            Ok(ApiResponse {
                status: 204,
                body: Vec::new(),
            })
        });

        let client = client_as(mock, "admin", None);
        let response = cancel(&client).await.unwrap();
        assert!(response.payment_url.is_none());
    }
}
