use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Role {
    SuperAdmin,
    Admin,
    Hr,
    Manager,
    Employee,
}

impl Role {
    /// Roles allowed into the admin screens (master data, payroll, billing).
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }

    /// Roles allowed to review attendance and leave.
    pub fn can_review(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin | Role::Hr | Role::Manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_wire_names() {
        assert_eq!(Role::from_str("super_admin").unwrap(), Role::SuperAdmin);
        assert_eq!(Role::from_str("HR").unwrap(), Role::Hr);
        assert!(Role::from_str("janitor").is_err());
        assert_eq!(Role::Manager.to_string(), "manager");
    }

    #[test]
    fn review_rights() {
        assert!(Role::Manager.can_review());
        assert!(!Role::Manager.is_admin());
        assert!(!Role::Employee.can_review());
    }
}
