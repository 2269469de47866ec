use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LeaveStatus {
    WaitingApproval,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, LeaveStatus::WaitingApproval)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LeaveDurationType {
    FullDay,
    HalfDayMorning,
    HalfDayAfternoon,
}

impl LeaveDurationType {
    pub fn is_half_day(&self) -> bool {
        !matches!(self, LeaveDurationType::FullDay)
    }

    /// Days counted per calendar day of the range.
    pub fn day_factor(&self) -> f64 {
        if self.is_half_day() { 0.5 } else { 1.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub leave_type_id: Uuid,
    #[serde(default)]
    pub leave_type_name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_type: LeaveDurationType,
    pub total_days: f64,
    pub status: LeaveStatus,
    pub reason: String,
    #[serde(default)]
    pub attachment_url: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct LeaveFilter {
    pub employee_id: Option<Uuid>,
    pub leave_type_id: Option<Uuid>,
    pub status: Option<LeaveStatus>,
}

impl LeaveFilter {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(id) = self.employee_id {
            query.push(("employee_id".to_string(), id.to_string()));
        }
        if let Some(id) = self.leave_type_id {
            query.push(("leave_type_id".to_string(), id.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status".to_string(), status.to_string()));
        }
        query
    }
}

#[cfg(test)]
pub(crate) fn sample_leave(status: LeaveStatus) -> LeaveRequest {
    LeaveRequest {
        id: Uuid::new_v4(),
        employee_id: Uuid::new_v4(),
        employee_name: Some("Rina Wijaya".into()),
        leave_type_id: Uuid::new_v4(),
        leave_type_name: Some("Annual".into()),
        start_date: NaiveDate::from_ymd_opt(2026, 4, 6).expect("valid date"),
        end_date: NaiveDate::from_ymd_opt(2026, 4, 8).expect("valid date"),
        duration_type: LeaveDurationType::FullDay,
        total_days: 3.0,
        status,
        reason: "Family event out of town".into(),
        attachment_url: None,
        rejection_reason: None,
        created_at: None,
    }
}
