//! Leave request dialog state and its client-side checks.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::forms::upload::ATTACHMENT_POLICY;
use crate::http::{FilePart, MultipartForm};
use crate::model::leave_quota::{LeaveQuota, QuotaAdjustment};
use crate::model::leave_request::LeaveDurationType;
use crate::model::leave_type::LeaveType;

pub const MIN_REASON_LEN: usize = 10;

#[derive(Debug, Clone)]
pub struct LeaveRequestForm {
    pub leave_type: Option<LeaveType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_type: LeaveDurationType,
    pub reason: String,
    pub attachment: Option<FilePart>,
}

impl Default for LeaveRequestForm {
    fn default() -> Self {
        Self {
            leave_type: None,
            start_date: None,
            end_date: None,
            duration_type: LeaveDurationType::FullDay,
            reason: String::new(),
            attachment: None,
        }
    }
}

/// A request that passed every client-side check.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveSubmission {
    pub leave_type_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_type: LeaveDurationType,
    pub total_days: f64,
    pub reason: String,
    pub attachment: Option<FilePart>,
}

impl LeaveSubmission {
    pub fn to_multipart(&self) -> MultipartForm {
        let form = MultipartForm::new()
            .text("leave_type_id", self.leave_type_id)
            .text("start_date", self.start_date)
            .text("end_date", self.end_date)
            .text("duration_type", self.duration_type)
            .text("reason", &self.reason);
        match &self.attachment {
            Some(file) => form.file(file.clone()),
            None => form,
        }
    }
}

impl LeaveRequestForm {
    /// Selecting a start date drops an end date that would now precede it.
    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = Some(date);
        if self.end_date.is_some_and(|end| end < date) {
            self.end_date = None;
        }
    }

    pub fn set_end_date(&mut self, date: NaiveDate) -> Result<(), ValidationError> {
        if self.is_end_date_disabled(date) {
            return Err(ValidationError::new(
                "end_date",
                "End date cannot be before start date",
            ));
        }
        self.end_date = Some(date);
        Ok(())
    }

    /// Calendar predicate for the end-date picker: days before the chosen
    /// start date are disabled.
    pub fn is_end_date_disabled(&self, candidate: NaiveDate) -> bool {
        self.start_date.is_some_and(|start| candidate < start)
    }

    /// Days requested: inclusive day count, halved for half-day types.
    pub fn requested_days(&self) -> Option<f64> {
        let (start, end) = (self.start_date?, self.end_date?);
        if end < start {
            return None;
        }
        let days = (end - start).num_days() + 1;
        Some(days as f64 * self.duration_type.day_factor())
    }

    /// Warning shown under the date pickers when the balance is too low.
    pub fn quota_warning(&self, quota: Option<&LeaveQuota>) -> Option<String> {
        let requested = self.requested_days()?;
        let available = quota?.available_quota;
        (requested > available).then(|| {
            format!(
                "Insufficient leave quota: requesting {requested} day(s) \
                 but only {available} available"
            )
        })
    }

    pub fn validate(&self) -> Result<LeaveSubmission, ValidationError> {
        let leave_type = self
            .leave_type
            .as_ref()
            .ok_or_else(|| ValidationError::new("leave_type_id", "Please select a leave type"))?;
        let start_date = self
            .start_date
            .ok_or_else(|| ValidationError::new("start_date", "Please select a start date"))?;
        let end_date = self
            .end_date
            .ok_or_else(|| ValidationError::new("end_date", "Please select an end date"))?;
        if end_date < start_date {
            return Err(ValidationError::new(
                "end_date",
                "End date cannot be before start date",
            ));
        }
        if self.duration_type.is_half_day() && !leave_type.allow_half_day {
            return Err(ValidationError::new(
                "duration_type",
                format!("{} cannot be taken as half day", leave_type.name),
            ));
        }

        let reason = self.reason.trim();
        if reason.chars().count() < MIN_REASON_LEN {
            return Err(ValidationError::new(
                "reason",
                format!("Reason must be at least {MIN_REASON_LEN} characters"),
            ));
        }

        match &self.attachment {
            Some(file) => ATTACHMENT_POLICY.check_part(file)?,
            None if leave_type.requires_attachment => {
                return Err(ValidationError::new(
                    "attachment",
                    format!("{} requires a supporting document", leave_type.name),
                ));
            }
            None => {}
        }

        Ok(LeaveSubmission {
            leave_type_id: leave_type.id,
            start_date,
            end_date,
            duration_type: self.duration_type,
            total_days: self.requested_days().unwrap_or_default(),
            reason: reason.to_string(),
            attachment: self.attachment.clone(),
        })
    }
}

/// Checks for the quota adjustment dialog.
pub fn validate_adjustment(adjustment: &QuotaAdjustment) -> Result<(), ValidationError> {
    if adjustment.adjustment == 0.0 || !adjustment.adjustment.is_finite() {
        return Err(ValidationError::new(
            "adjustment",
            "Adjustment must be a non-zero number of days",
        ));
    }
    if (adjustment.adjustment * 2.0).fract() != 0.0 {
        return Err(ValidationError::new(
            "adjustment",
            "Adjustment must be in half-day steps",
        ));
    }
    if adjustment.reason.trim().is_empty() {
        return Err(ValidationError::new("reason", "Please give a reason for the adjustment"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave_quota::sample_quota;

    fn annual() -> LeaveType {
        LeaveType {
            id: Uuid::new_v4(),
            name: "Annual Leave".into(),
            code: Some("AL".into()),
            default_quota: 12.0,
            is_paid: true,
            requires_attachment: false,
            allow_half_day: true,
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    fn filled() -> LeaveRequestForm {
        LeaveRequestForm {
            leave_type: Some(annual()),
            start_date: Some(date(6)),
            end_date: Some(date(8)),
            reason: "Family wedding in Surabaya".into(),
            ..Default::default()
        }
    }

    #[test]
    fn short_reason_is_rejected() {
        let mut form = filled();
        form.reason = "  too short ".into(); // 9 chars once trimmed
        let err = form.validate().unwrap_err();
        assert_eq!(err.field, "reason");
        assert_eq!(err.message, "Reason must be at least 10 characters");
    }

    #[test]
    fn days_before_start_are_disabled() {
        let mut form = LeaveRequestForm::default();
        assert!(!form.is_end_date_disabled(date(1)));

        form.set_start_date(date(10));
        assert!(form.is_end_date_disabled(date(9)));
        assert!(!form.is_end_date_disabled(date(10)));
        assert!(form.set_end_date(date(9)).is_err());
        assert!(form.end_date.is_none());
    }

    #[test]
    fn moving_start_past_end_clears_end() {
        let mut form = filled();
        form.set_start_date(date(9));
        assert_eq!(form.end_date, None);
    }

    #[test]
    fn full_day_counts_inclusive_days() {
        let form = filled();
        assert_eq!(form.requested_days(), Some(3.0));
    }

    #[test]
    fn half_day_counts_half() {
        let mut form = filled();
        form.duration_type = LeaveDurationType::HalfDayMorning;
        assert_eq!(form.requested_days(), Some(1.5));

        form.end_date = form.start_date;
        assert_eq!(form.requested_days(), Some(0.5));
    }

    #[test]
    fn quota_warning_when_requesting_more_than_available() {
        let form = filled();
        assert!(form.quota_warning(Some(&sample_quota(3.0))).is_none());

        let warning = form.quota_warning(Some(&sample_quota(2.5))).unwrap();
        assert!(warning.contains("requesting 3 day(s)"), "{warning}");
        assert!(form.quota_warning(None).is_none());
    }

    #[test]
    fn valid_form_builds_multipart_submission() {
        let submission = filled().validate().unwrap();
        assert_eq!(submission.total_days, 3.0);

        let body = submission.to_multipart();
        assert_eq!(body.field("duration_type"), Some("full_day"));
        assert_eq!(body.field("start_date"), Some("2026-04-06"));
        assert!(body.files.is_empty());
    }

    #[test]
    fn required_attachment_and_half_day_rules() {
        let mut form = filled();
        let mut sick = annual();
        sick.name = "Sick Leave".into();
        sick.requires_attachment = true;
        sick.allow_half_day = false;
        form.leave_type = Some(sick);

        assert_eq!(form.validate().unwrap_err().field, "attachment");

        form.duration_type = LeaveDurationType::HalfDayAfternoon;
        assert_eq!(form.validate().unwrap_err().field, "duration_type");
    }

    #[test]
    fn oversized_attachment_is_rejected() {
        let mut form = filled();
        form.attachment = Some(FilePart {
            field: "attachment".into(),
            file_name: "scan.pdf".into(),
            mime: "application/pdf".into(),
            bytes: vec![0; 10 * 1024 * 1024 + 1],
        });
        assert_eq!(form.validate().unwrap_err().field, "attachment");
    }

    #[test]
    fn adjustment_rules() {
        let mut adj = QuotaAdjustment {
            employee_id: Uuid::new_v4(),
            leave_type_id: Uuid::new_v4(),
            year: 2026,
            adjustment: 0.0,
            reason: "Carry over".into(),
        };
        assert!(validate_adjustment(&adj).is_err());
        adj.adjustment = 1.25;
        assert!(validate_adjustment(&adj).is_err());
        adj.adjustment = -1.5;
        assert!(validate_adjustment(&adj).is_ok());
        adj.reason = " ".into();
        assert!(validate_adjustment(&adj).is_err());
    }
}
