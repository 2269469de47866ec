use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EmploymentType {
    Permanent,
    Contract,
    Probation,
    Internship,
    Freelance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EmploymentStatus {
    Active,
    Inactive,
    Resigned,
    Terminated,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankDetails {
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_holder: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub employee_code: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub position_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub grade_id: Option<Uuid>,
    #[serde(default)]
    pub position_name: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
    pub employment_type: EmploymentType,
    pub employment_status: EmploymentStatus,
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub bank: BankDetails,
}

/// Body of `POST /employees`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateEmployee {
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub position_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub grade_id: Option<Uuid>,
    pub employment_type: EmploymentType,
    pub join_date: NaiveDate,
    #[serde(flatten)]
    pub bank: BankDetails,
}

/// Partial update; only provided fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateEmployee {
    pub employee_code: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub grade_id: Option<Uuid>,
    pub employment_type: Option<EmploymentType>,
    pub employment_status: Option<EmploymentStatus>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_holder: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeQuery {
    pub search: Option<String>,
    pub branch_id: Option<Uuid>,
    pub status: Option<EmploymentStatus>,
}

impl EmployeeQuery {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(s) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("search".to_string(), s.to_string()));
        }
        if let Some(id) = self.branch_id {
            query.push(("branch_id".to_string(), id.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("employment_status".to_string(), status.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_details_are_flattened() {
        let json = r#"{
            "id": "7a0c3c1e-5d1e-4a43-9a57-0a1b8b4f9d11",
            "employee_code": "EMP-001",
            "full_name": "Siti Rahma",
            "position_id": null, "branch_id": null, "grade_id": null,
            "employment_type": "permanent",
            "employment_status": "active",
            "bank_name": "BCA",
            "account_number": "1234567890"
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.bank.bank_name.as_deref(), Some("BCA"));
        assert_eq!(employee.employment_status, EmploymentStatus::Active);
    }

    #[test]
    fn blank_search_is_not_sent() {
        let q = EmployeeQuery {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert!(q.to_query().is_empty());
    }
}
