use crate::error::ValidationError;
use crate::model::employee::{CreateEmployee, UpdateEmployee};

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn looks_like_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    (8..=15).contains(&digits)
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
}

fn check_phone(phone: Option<&str>) -> Result<(), ValidationError> {
    match phone.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) if !looks_like_phone(p) => {
            Err(ValidationError::new("phone", "Phone number is not valid"))
        }
        _ => Ok(()),
    }
}

pub fn validate_new_employee(payload: &CreateEmployee) -> Result<(), ValidationError> {
    if payload.employee_code.trim().is_empty() {
        return Err(ValidationError::new("employee_code", "Employee code is required"));
    }
    if payload.full_name.trim().is_empty() {
        return Err(ValidationError::new("full_name", "Full name is required"));
    }
    if !looks_like_email(&payload.email) {
        return Err(ValidationError::new("email", "Email address is not valid"));
    }
    check_phone(payload.phone.as_deref())
}

pub fn validate_employee_update(payload: &UpdateEmployee) -> Result<(), ValidationError> {
    if payload.full_name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(ValidationError::new("full_name", "Full name cannot be empty"));
    }
    if payload.email.as_deref().is_some_and(|e| !looks_like_email(e)) {
        return Err(ValidationError::new("email", "Email address is not valid"));
    }
    check_phone(payload.phone.as_deref())
}
