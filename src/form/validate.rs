use regex::Regex;
use std::sync::LazyLock;

use super::payload::Payload;
use crate::error::ValidationError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Basic `local@domain.tld` shape check. Not RFC 5322.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check required fields in form order, stopping at the first failure.
pub fn validate(payload: &Payload) -> Result<(), ValidationError> {
    if payload.business_name.is_empty() {
        return Err(ValidationError::MissingBusinessName);
    }

    if payload.email.is_empty() || !is_valid_email(&payload.email) {
        return Err(ValidationError::InvalidEmail);
    }

    if payload.service_type.is_empty() {
        return Err(ValidationError::MissingServiceType);
    }

    if payload.service_area.is_empty() {
        return Err(ValidationError::MissingServiceArea);
    }

    if payload.lead_handling_method.is_empty() {
        return Err(ValidationError::MissingLeadHandling);
    }

    Ok(())
}
