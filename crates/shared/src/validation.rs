//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Maximum registrant name length.
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum free-form note length.
pub const MAX_NOTE_LENGTH: usize = 1000;

lazy_static! {
    /// Accepts local Ghanaian numbers (0XXXXXXXXX) and international
    /// formats with an optional leading +.
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9][0-9\s-]{6,17}$").expect("valid phone regex");
}

/// Normalizes an email for the `(event_id, email)` uniqueness check.
///
/// The composite unique index compares registrations case-insensitively,
/// so all emails are trimmed and lowercased before they reach the store.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates a phone number format.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone.trim()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone number must be 7-18 digits, optionally starting with +".into());
        Err(err)
    }
}

/// Validates that a registrant name is non-blank and within length limits.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("name_blank");
        err.message = Some("Name must not be blank".into());
        return Err(err);
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        let mut err = ValidationError::new("name_length");
        err.message = Some("Name must be at most 120 characters".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_lowercases() {
        assert_eq!(normalize_email("Alice@Example.COM"), "alice@example.com");
    }

    #[test]
    fn test_normalize_email_trims() {
        assert_eq!(normalize_email("  bob@x.com  "), "bob@x.com");
    }

    #[test]
    fn test_normalize_email_idempotent() {
        let once = normalize_email("Carol@Y.org");
        assert_eq!(normalize_email(&once), once);
    }

    #[test]
    fn test_validate_phone_local_format() {
        assert!(validate_phone("0543358413").is_ok());
    }

    #[test]
    fn test_validate_phone_international_format() {
        assert!(validate_phone("+233543358413").is_ok());
    }

    #[test]
    fn test_validate_phone_rejects_letters() {
        assert!(validate_phone("054abc8413").is_err());
    }

    #[test]
    fn test_validate_phone_rejects_too_short() {
        assert!(validate_phone("12345").is_err());
    }

    #[test]
    fn test_validate_name_rejects_blank() {
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_name_rejects_too_long() {
        assert!(validate_name(&"a".repeat(121)).is_err());
    }

    #[test]
    fn test_validate_name_accepts_normal() {
        assert!(validate_name("Alice Mensah").is_ok());
    }
}
