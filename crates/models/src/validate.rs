//! Field-level checks shared by the services. These never touch the store.

use crate::errors::ModelError;

pub fn require_text(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), ModelError> {
    require_text("email", value)?;
    if !value.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

/// CPF must carry 11 digits; `.` and `-` separators are accepted.
pub fn validate_cpf(value: &str) -> Result<(), ModelError> {
    let digits = value.chars().filter(|c| !matches!(c, '.' | '-')).collect::<String>();
    if digits.len() != 11 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ModelError::Validation("cpf must have 11 digits".into()));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::Validation(format!("{field} must be >= 0")));
    }
    Ok(())
}

pub fn gestational_week(value: i32) -> Result<(), ModelError> {
    if !(1..=45).contains(&value) {
        return Err(ModelError::Validation("semana_gestacional must be in 1..=45".into()));
    }
    Ok(())
}
