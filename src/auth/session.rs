use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::auth::jwt::read_claims;
use crate::error::{ClientError, ClientResult};
use crate::model::role::Role;

/// Authenticated user context, passed explicitly to every screen.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    pub username: String,
    pub role: Role,
    pub user_id: Option<Uuid>,

    /// Present only if this user is linked to an employee record
    pub employee_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn from_token(token: impl Into<String>) -> ClientResult<Self> {
        let token = token.into();
        let claims = read_claims(&token)?;

        let role = Role::from_str(&claims.role)
            .map_err(|_| ClientError::Session(format!("Invalid role: {}", claims.role)))?;
        let expires_at = Utc
            .timestamp_opt(claims.exp as i64, 0)
            .single()
            .ok_or_else(|| ClientError::Session("Invalid expiry".to_string()))?;

        Ok(Self {
            token,
            username: claims.sub,
            role,
            user_id: claims.user_id,
            employee_id: claims.employee_id,
            company_id: claims.company_id,
            expires_at,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn require_admin(&self) -> ClientResult<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(ClientError::Forbidden("Admin only".to_string()))
        }
    }

    pub fn require_reviewer(&self) -> ClientResult<()> {
        if self.role.can_review() {
            Ok(())
        } else {
            Err(ClientError::Forbidden("HR/Admin only".to_string()))
        }
    }

    /// Employee record of the logged in user, needed for clock-in and leave.
    pub fn require_employee(&self) -> ClientResult<Uuid> {
        self.employee_id
            .ok_or_else(|| ClientError::Forbidden("No employee profile".to_string()))
    }
}

#[cfg(test)]
pub(crate) fn test_session(role: &str, employee_id: Option<Uuid>) -> Session {
    use crate::auth::jwt::issue_test_token;
    use crate::models::Claims;

    let token = issue_test_token(&Claims {
        sub: "tester@example.com".into(),
        exp: 4_102_444_800,
        role: role.into(),
        user_id: Some(Uuid::new_v4()),
        employee_id,
        company_id: None,
    });
    Session::from_token(token).expect("test session")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn employee_cannot_enter_admin_screens() {
        let session = test_session("employee", Some(Uuid::new_v4()));
        assert!(matches!(session.require_admin(), Err(ClientError::Forbidden(_))));
        assert!(session.require_employee().is_ok());
    }

    #[test]
    fn admin_without_profile_cannot_clock_in() {
        let session = test_session("admin", None);
        assert!(session.require_admin().is_ok());
        assert!(session.require_employee().is_err());
    }

    #[test]
    fn expiry_is_checked_against_now() {
        let session = test_session("hr", None);
        assert!(!session.is_expired(Utc::now()));
        assert!(session.is_expired(session.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = Session::from_token(crate::auth::jwt::issue_test_token(&crate::models::Claims {
            sub: "x".into(),
            exp: 4_102_444_800,
            role: "intern".into(),
            user_id: None,
            employee_id: None,
            company_id: None,
        }))
        .unwrap_err();
        assert!(matches!(err, ClientError::Session(_)));
    }
}
