use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per employee, per leave type, per year balance. Every figure is computed
/// by the server; the client only displays it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveQuota {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type_id: Uuid,
    #[serde(default)]
    pub leave_type_name: Option<String>,
    pub year: i32,
    pub opening_quota: f64,
    pub earned_quota: f64,
    pub adjustment_quota: f64,
    pub used_quota: f64,
    pub pending_quota: f64,
    pub available_quota: f64,
}

impl LeaveQuota {
    /// opening + earned + adjustment - used - pending
    pub fn computed_available(&self) -> f64 {
        self.opening_quota + self.earned_quota + self.adjustment_quota
            - self.used_quota
            - self.pending_quota
    }

    /// True when the server figure disagrees with the components it sent.
    pub fn is_inconsistent(&self) -> bool {
        (self.computed_available() - self.available_quota).abs() > f64::EPSILON * 16.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuotaQuery {
    pub employee_id: Option<Uuid>,
    pub year: Option<i32>,
}

impl QuotaQuery {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(id) = self.employee_id {
            query.push(("employee_id".to_string(), id.to_string()));
        }
        if let Some(year) = self.year {
            query.push(("year".to_string(), year.to_string()));
        }
        query
    }
}

/// Body of `POST /leave/quota/adjust`; `adjustment` is a signed delta.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuotaAdjustment {
    pub employee_id: Uuid,
    pub leave_type_id: Uuid,
    pub year: i32,
    pub adjustment: f64,
    pub reason: String,
}

#[cfg(test)]
pub(crate) fn sample_quota(available: f64) -> LeaveQuota {
    LeaveQuota {
        id: Uuid::new_v4(),
        employee_id: Uuid::new_v4(),
        leave_type_id: Uuid::new_v4(),
        leave_type_name: Some("Annual".into()),
        year: 2026,
        opening_quota: available,
        earned_quota: 0.0,
        adjustment_quota: 0.0,
        used_quota: 0.0,
        pending_quota: 0.0,
        available_quota: available,
    }
}
