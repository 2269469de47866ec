use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubscriptionStatus {
    Trial,
    Active,
    PastDue,
    Cancelled,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    /// Ordering of tiers; a higher tier is an upgrade.
    pub tier: u32,
    pub price_per_seat_monthly: Decimal,
    pub price_per_seat_yearly: Decimal,
    #[serde(default)]
    pub min_seats: u32,
    #[serde(default)]
    pub max_seats: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Plan {
    pub fn price_per_seat(&self, cycle: BillingCycle) -> Decimal {
        match cycle {
            BillingCycle::Monthly => self.price_per_seat_monthly,
            BillingCycle::Yearly => self.price_per_seat_yearly,
        }
    }

    /// Price shown before checkout; the invoice amount comes from the server.
    pub fn quote(&self, cycle: BillingCycle, seats: u32) -> Decimal {
        self.price_per_seat(cycle) * Decimal::from(seats)
    }

    pub fn accepts_seats(&self, seats: u32) -> bool {
        seats >= self.min_seats.max(1) && self.max_seats.is_none_or(|max| seats <= max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub billing_cycle: BillingCycle,
    pub seats: u32,
    #[serde(default)]
    pub used_seats: u32,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub trial_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub trial_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancel_at_period_end: bool,
}

impl Subscription {
    pub fn is_trialing(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Trial && self.trial_end.is_some_and(|end| now < end)
    }

    pub fn available_seats(&self) -> u32 {
        self.seats.saturating_sub(self.used_seats)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub payment_url: Option<String>,
    pub issued_at: DateTime<Utc>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn can_cancel(&self) -> bool {
        self.status == InvoiceStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckoutRequest {
    pub plan_id: Uuid,
    pub billing_cycle: BillingCycle,
    pub seats: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChangePlanRequest {
    pub plan_id: Uuid,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChangeSeatsRequest {
    pub seats: u32,
}

/// Answer of the billing mutations. When `payment_url` is set the user must
/// be sent to the hosted checkout page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingResponse {
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub invoice_id: Option<Uuid>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
pub(crate) fn sample_plan(tier: u32) -> Plan {
    Plan {
        id: Uuid::new_v4(),
        name: format!("Tier {tier}"),
        tier,
        price_per_seat_monthly: Decimal::new(25_000, 0),
        price_per_seat_yearly: Decimal::new(250_000, 0),
        min_seats: 5,
        max_seats: Some(200),
        features: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_uses_cycle_price() {
        let plan = sample_plan(1);
        assert_eq!(plan.quote(BillingCycle::Monthly, 10), Decimal::new(250_000, 0));
        assert_eq!(plan.quote(BillingCycle::Yearly, 10), Decimal::new(2_500_000, 0));
    }

    #[test]
    fn seat_bounds() {
        let plan = sample_plan(1);
        assert!(!plan.accepts_seats(4));
        assert!(plan.accepts_seats(5));
        assert!(!plan.accepts_seats(201));
    }
}
