use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, StrumDisplay, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PayrollStatus {
    Draft,
    Paid,
}

/// Month/year a payroll record belongs to, shown as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display(fmt = "{:04}-{:02}", period_year, period_month)]
pub struct PayrollPeriod {
    pub period_month: u32,
    pub period_year: i32,
}

impl PayrollPeriod {
    pub fn new(period_month: u32, period_year: i32) -> Option<Self> {
        (1..=12).contains(&period_month).then_some(Self {
            period_month,
            period_year,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(flatten)]
    pub period: PayrollPeriod,
    pub base_salary: Decimal,
    #[serde(default)]
    pub allowances: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub deductions: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub overtime_minutes: u32,
    #[serde(default)]
    pub overtime_amount: Decimal,
    #[serde(default)]
    pub late_minutes: u32,
    #[serde(default)]
    pub late_deduction: Decimal,
    #[serde(default)]
    pub early_leave_minutes: u32,
    #[serde(default)]
    pub early_leave_deduction: Decimal,
    pub gross_salary: Decimal,
    pub net_salary: Decimal,
    pub status: PayrollStatus,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

impl PayrollRecord {
    pub fn total_allowances(&self) -> Decimal {
        self.allowances.values().copied().sum()
    }

    pub fn total_deductions(&self) -> Decimal {
        self.deductions.values().copied().sum()
    }

    /// Finalizing is the only transition the client triggers, and only once.
    pub fn can_finalize(&self) -> bool {
        self.status == PayrollStatus::Draft
    }
}

#[derive(Debug, Clone, Default)]
pub struct PayrollQuery {
    pub period: Option<PayrollPeriod>,
    pub status: Option<PayrollStatus>,
    pub employee_id: Option<Uuid>,
}

impl PayrollQuery {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(p) = self.period {
            query.push(("period_month".to_string(), p.period_month.to_string()));
            query.push(("period_year".to_string(), p.period_year.to_string()));
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

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinalizePayroll {
    pub payroll_ids: Vec<Uuid>,
}

/// Company wide payroll rules, edited on the settings screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollSettings {
    pub late_deduction_per_minute: Decimal,
    pub early_leave_deduction_per_minute: Decimal,
    pub overtime_rate_per_hour: Decimal,
    #[serde(default)]
    pub late_tolerance_minutes: u32,
    pub payday: u32,
}

#[cfg(test)]
pub(crate) fn sample_payroll(status: PayrollStatus) -> PayrollRecord {
    PayrollRecord {
        id: Uuid::new_v4(),
        employee_id: Uuid::new_v4(),
        employee_name: Some("Agus Pratama".into()),
        period: PayrollPeriod {
            period_month: 3,
            period_year: 2026,
        },
        base_salary: Decimal::new(8_000_000, 0),
        allowances: BTreeMap::from([("transport".to_string(), Decimal::new(500_000, 0))]),
        deductions: BTreeMap::from([("bpjs".to_string(), Decimal::new(160_000, 0))]),
        overtime_minutes: 0,
        overtime_amount: Decimal::ZERO,
        late_minutes: 0,
        late_deduction: Decimal::ZERO,
        early_leave_minutes: 0,
        early_leave_deduction: Decimal::ZERO,
        gross_salary: Decimal::new(8_500_000, 0),
        net_salary: Decimal::new(8_340_000, 0),
        status,
        paid_at: None,
    }
}
