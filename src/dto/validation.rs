//! Validation helpers for DTOs.

use validator::ValidationError;

/// Rejects text made only of whitespace, which would pass a plain length check.
///
/// # Examples
///
/// ```ignore
/// validate_not_blank("Fifa 21") // Ok
/// validate_not_blank("   ")     // Err
/// ```
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must contain at least one non-whitespace character".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank_accepts_text() {
        assert!(validate_not_blank("Fifa 21").is_ok());
        assert!(validate_not_blank(" EA ").is_ok());
    }

    #[test]
    fn test_validate_not_blank_rejects_whitespace() {
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("\t\n").is_err());
    }
}
