//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Maximum accepted party size on a single guest row.
const MAX_PARTY_SIZE: i32 = 100;

lazy_static! {
    /// Loose phone pattern: optional leading +, then digits, spaces or dashes.
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{5,19}$").unwrap();
}

/// Validates that a phone number looks dialable.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone.trim()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone number must contain 6-20 digits".into());
        Err(err)
    }
}

/// Validates that a party size is within range (1 to 100).
pub fn validate_party_size(size: i32) -> Result<(), ValidationError> {
    if (1..=MAX_PARTY_SIZE).contains(&size) {
        Ok(())
    } else {
        let mut err = ValidationError::new("party_size_range");
        err.message = Some("Number of guests must be between 1 and 100".into());
        Err(err)
    }
}

/// Validates that a monetary amount is non-negative.
pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if amount >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_range");
        err.message = Some("Amount must be non-negative".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("012345678").is_ok());
        assert!(validate_phone("+855 12 345 678").is_ok());
        assert!(validate_phone("012-345-678").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("not a phone").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_validate_party_size() {
        assert!(validate_party_size(1).is_ok());
        assert!(validate_party_size(100).is_ok());
        assert!(validate_party_size(0).is_err());
        assert!(validate_party_size(101).is_err());
        assert!(validate_party_size(-1).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(1250.75).is_ok());
        assert!(validate_amount(-0.01).is_err());
    }
}
