use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveType {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub default_quota: f64,
    #[serde(default = "default_true")]
    pub is_paid: bool,
    #[serde(default)]
    pub requires_attachment: bool,
    #[serde(default)]
    pub allow_half_day: bool,
}

fn default_true() -> bool {
    true
}

/// Body of `POST /leave/types` and `PUT /leave/types/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveTypePayload {
    pub name: String,
    pub code: Option<String>,
    pub default_quota: f64,
    pub is_paid: bool,
    pub requires_attachment: bool,
    pub allow_half_day: bool,
}
