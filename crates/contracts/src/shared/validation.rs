//! Domain validation performed before any request leaves the client.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("station users must be assigned to a station")]
    MissingStation,
    #[error("nothing to update")]
    EmptyUpdate,
    #[error("mobile money number must contain at least 10 digits")]
    InvalidMomoNumber,
}

/// Trimmed value of a required text field.
pub fn require(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed.to_string())
}

/// Parse a non-negative amount typed into a form field.
pub fn parse_amount(value: &str, field: &'static str) -> Result<f64, ValidationError> {
    let text = require(value, field)?;
    let amount = text
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber(field))?;
    if !amount.is_finite() {
        return Err(ValidationError::NotANumber(field));
    }
    if amount < 0.0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(amount)
}

/// Validate a mobile-money number: digits only (spaces ignored), at least 10 of them.
pub fn validate_momo_number(value: &str) -> Result<String, ValidationError> {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() < 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidMomoNumber);
    }
    Ok(digits)
}
