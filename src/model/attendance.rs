use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::model::geo::GeoPoint;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    WaitingApproval,
    OnLeave,
    Holiday,
}

impl AttendanceStatus {
    /// Only records waiting for review offer approve/reject.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, AttendanceStatus::WaitingApproval)
    }
}

/// One attendance record per employee per day. Status and the minute counts
/// are assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub id: Uuid,
    pub employee_id: Uuid,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub date: NaiveDate,
    pub clock_in_time: Option<DateTime<Utc>>,
    pub clock_out_time: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub working_hours: Option<f64>,
    #[serde(default)]
    pub late_minutes: u32,
    #[serde(default)]
    pub early_leave_minutes: u32,
    #[serde(default)]
    pub clock_in_location: Option<GeoPoint>,
    #[serde(default)]
    pub clock_out_location: Option<GeoPoint>,
    #[serde(default)]
    pub clock_in_photo_url: Option<String>,
    #[serde(default)]
    pub clock_out_photo_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Attendance {
    pub fn has_clocked_out(&self) -> bool {
        self.clock_out_time.is_some()
    }
}

/// Query parameters of the attendance list.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub employee_id: Option<Uuid>,
}

impl AttendanceFilter {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(d) = self.start_date {
            query.push(("start_date".to_string(), d.to_string()));
        }
        if let Some(d) = self.end_date {
            query.push(("end_date".to_string(), d.to_string()));
        }
        if let Some(s) = self.status {
            query.push(("status".to_string(), s.to_string()));
        }
        if let Some(id) = self.employee_id {
            query.push(("employee_id".to_string(), id.to_string()));
        }
        query
    }
}

/// Per-status counts behind the attendance chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub counts: BTreeMap<AttendanceStatus, usize>,
    pub total_late_minutes: u64,
    pub total_working_hours: f64,
}

impl AttendanceSummary {
    pub fn from_records(records: &[Attendance]) -> Self {
        let mut summary = Self::default();
        for record in records {
            *summary.counts.entry(record.status).or_default() += 1;
            summary.total_late_minutes += u64::from(record.late_minutes);
            summary.total_working_hours += record.working_hours.unwrap_or_default();
        }
        summary
    }

    pub fn count(&self, status: AttendanceStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }
}

#[cfg(test)]
pub(crate) fn sample_attendance(status: AttendanceStatus) -> Attendance {
    Attendance {
        id: Uuid::new_v4(),
        employee_id: Uuid::new_v4(),
        employee_name: Some("Budi Santoso".into()),
        date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
        clock_in_time: None,
        clock_out_time: None,
        status,
        working_hours: Some(8.0),
        late_minutes: if status == AttendanceStatus::Late { 15 } else { 0 },
        early_leave_minutes: 0,
        clock_in_location: None,
        clock_out_location: None,
        clock_in_photo_url: None,
        clock_out_photo_url: None,
        notes: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_format() {
        let json = serde_json::to_string(&AttendanceStatus::WaitingApproval).unwrap();
        assert_eq!(json, "\"waiting_approval\"");
        assert_eq!(AttendanceStatus::OnLeave.to_string(), "on_leave");
    }

    #[test]
    fn summary_counts_by_status() {
        let records = vec![
            sample_attendance(AttendanceStatus::Present),
            sample_attendance(AttendanceStatus::Late),
            sample_attendance(AttendanceStatus::Late),
        ];
        let summary = AttendanceSummary::from_records(&records);
        assert_eq!(summary.count(AttendanceStatus::Late), 2);
        assert_eq!(summary.count(AttendanceStatus::Absent), 0);
        assert_eq!(summary.total_late_minutes, 30);
        assert_eq!(summary.total_working_hours, 24.0);
    }

    #[test]
    fn filter_query_skips_empty_fields() {
        let filter = AttendanceFilter {
            status: Some(AttendanceStatus::WaitingApproval),
            ..Default::default()
        };
        assert_eq!(
            filter.to_query(),
            vec![("status".to_string(), "waiting_approval".to_string())]
        );
    }
}
