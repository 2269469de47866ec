use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::api::subscription as api;
use crate::client::ApiClient;
use crate::error::{ClientResult, ValidationError};
use crate::model::subscription::{
    BillingCycle, BillingResponse, CheckoutRequest, Invoice, Plan, Subscription,
};
use crate::models::MessageResponse;
use crate::screens::{Confirm, confirmed, report};
use crate::view::{ListView, Notifier, Searchable};

impl Searchable for Invoice {
    fn search_text(&self) -> String {
        format!("{} {}", self.number, self.status)
    }
}

/// Where the user goes after a billing action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutRedirect {
    /// Hosted payment page; the change applies once the payment settles.
    Payment(String),
    /// Applied without payment.
    Done(Option<String>),
}

impl From<BillingResponse> for CheckoutRedirect {
    fn from(response: BillingResponse) -> Self {
        match response.payment_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => CheckoutRedirect::Payment(url),
            None => CheckoutRedirect::Done(response.message),
        }
    }
}

pub struct SubscriptionScreen {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    pub plans: Vec<Plan>,
    pub current: Option<Subscription>,
    pub invoices: ListView<Invoice>,
}

impl SubscriptionScreen {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        client.require_session()?.require_admin()?;
        Ok(Self {
            client,
            notifier,
            plans: Vec::new(),
            current: None,
            invoices: ListView::new(10),
        })
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.plans = api::plans(&self.client).await?;
        self.current = api::current(&self.client).await?;
        let client = &self.client;
        self.invoices
            .load(|| api::invoices(client), "Failed to load invoices")
            .await
    }

    fn plan(&self, plan_id: Uuid) -> ClientResult<&Plan> {
        self.plans
            .iter()
            .find(|p| p.id == plan_id)
            .ok_or_else(|| ValidationError::new("plan_id", "Unknown plan").into())
    }

    pub async fn checkout(
        &mut self,
        plan_id: Uuid,
        billing_cycle: BillingCycle,
        seats: u32,
        confirm: &dyn Confirm,
    ) -> ClientResult<CheckoutRedirect> {
        let outcome = self.checkout_call(plan_id, billing_cycle, seats, confirm).await;
        self.settle(outcome, "Checkout created", "Failed to create checkout")
            .await
    }

    async fn checkout_call(
        &self,
        plan_id: Uuid,
        billing_cycle: BillingCycle,
        seats: u32,
        confirm: &dyn Confirm,
    ) -> ClientResult<BillingResponse> {
        let plan = self.plan(plan_id)?;
        if !plan.accepts_seats(seats) {
            return Err(ValidationError::new(
                "seats",
                format!("{} does not allow {seats} seats", plan.name),
            )
            .into());
        }
        let prompt = format!(
            "Subscribe to {} for {seats} seat(s) at {} per {billing_cycle}?",
            plan.name,
            plan.quote(billing_cycle, seats)
        );
        confirmed(confirm, &prompt)?;
        let request = CheckoutRequest {
            plan_id,
            billing_cycle,
            seats,
        };
        api::checkout(&self.client, &request).await
    }

    /// Upgrade or downgrade, chosen by comparing plan tiers.
    pub async fn change_plan(
        &mut self,
        plan_id: Uuid,
        confirm: &dyn Confirm,
    ) -> ClientResult<CheckoutRedirect> {
        let outcome = self.change_plan_call(plan_id, confirm).await;
        self.settle(outcome, "Plan changed", "Failed to change plan").await
    }

    async fn change_plan_call(
        &self,
        plan_id: Uuid,
        confirm: &dyn Confirm,
    ) -> ClientResult<BillingResponse> {
        let current = self
            .current
            .as_ref()
            .ok_or_else(|| ValidationError::new("subscription", "No active subscription"))?;
        let target = self.plan(plan_id)?;
        if target.tier == current.plan.tier {
            return Err(ValidationError::new("plan_id", "Already on this plan").into());
        }
        let upgrade = target.tier > current.plan.tier;
        let verb = if upgrade { "Upgrade" } else { "Downgrade" };
        confirmed(confirm, &format!("{verb} from {} to {}?", current.plan.name, target.name))?;
        info!(from = %current.plan.name, to = %target.name, upgrade, "Changing plan");
        if upgrade {
            api::upgrade(&self.client, plan_id).await
        } else {
            api::downgrade(&self.client, plan_id).await
        }
    }

    pub async fn change_seats(
        &mut self,
        seats: u32,
        confirm: &dyn Confirm,
    ) -> ClientResult<CheckoutRedirect> {
        let outcome = self.change_seats_call(seats, confirm).await;
        self.settle(outcome, "Seats updated", "Failed to change seats").await
    }

    async fn change_seats_call(
        &self,
        seats: u32,
        confirm: &dyn Confirm,
    ) -> ClientResult<BillingResponse> {
        let current = self
            .current
            .as_ref()
            .ok_or_else(|| ValidationError::new("subscription", "No active subscription"))?;
        if !current.plan.accepts_seats(seats) {
            return Err(ValidationError::new(
                "seats",
                format!("{} does not allow {seats} seats", current.plan.name),
            )
            .into());
        }
        if seats < current.used_seats {
            return Err(ValidationError::new(
                "seats",
                format!("{} seats are in use", current.used_seats),
            )
            .into());
        }
        confirmed(confirm, &format!("Change seats from {} to {seats}?", current.seats))?;
        api::change_seats(&self.client, seats).await
    }

    pub async fn cancel(&mut self, confirm: &dyn Confirm) -> ClientResult<CheckoutRedirect> {
        let prompt = "Cancel the subscription at the end of the period?";
        let outcome = match confirmed(confirm, prompt) {
            Ok(()) => api::cancel(&self.client).await,
            Err(e) => Err(e),
        };
        self.settle(outcome, "Subscription cancelled", "Failed to cancel subscription")
            .await
    }

    /// Only pending invoices can be cancelled.
    pub async fn cancel_invoice(
        &mut self,
        id: Uuid,
        confirm: &dyn Confirm,
    ) -> ClientResult<MessageResponse> {
        let outcome = match self.invoices.items().iter().find(|i| i.id == id) {
            None => Err(ValidationError::new("invoice_id", "Invoice not found").into()),
            Some(invoice) if !invoice.can_cancel() => Err(ValidationError::new(
                "invoice_id",
                format!("Invoice {} is {} and cannot be cancelled", invoice.number, invoice.status),
            )
            .into()),
            Some(invoice) => {
                match confirmed(confirm, &format!("Cancel invoice {}?", invoice.number)) {
                    Ok(()) => api::cancel_invoice(&self.client, id).await,
                    Err(e) => Err(e),
                }
            }
        };
        let response = report(
            self.notifier.as_ref(),
            outcome,
            "Invoice cancelled",
            "Failed to cancel invoice",
        )?;
        self.refresh().await.ok();
        Ok(response)
    }

    async fn settle(
        &mut self,
        outcome: ClientResult<BillingResponse>,
        success: &str,
        failure: &str,
    ) -> ClientResult<CheckoutRedirect> {
        let response = report(self.notifier.as_ref(), outcome, success, failure)?;
        let redirect = CheckoutRedirect::from(response);
        // a pending payment changes nothing until the provider calls back
        if matches!(redirect, CheckoutRedirect::Done(_)) {
            self.refresh().await.ok();
        }
        Ok(redirect)
    }
}
