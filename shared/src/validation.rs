//! Validation for disease report submissions
//!
//! Matches the bounds of the submission form: disease name up to 50
//! characters, description up to 255, severity on the 1-10 slider scale.
//! Stored rows are never re-validated on read; whether out-of-range severity
//! can arrive from the store is left to the store.

pub const DISEASE_NAME_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 255;
pub const SEVERITY_MIN: i32 = 1;
pub const SEVERITY_MAX: i32 = 10;

/// Validate a disease name from the form (non-empty, at most 50 chars).
pub fn validate_disease_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Disease name must not be empty");
    }
    if name.len() > DISEASE_NAME_MAX_LEN {
        return Err("Disease name must be at most 50 characters");
    }
    Ok(())
}

/// Validate severity against the 1-10 slider scale.
pub fn validate_severity(severity: i32) -> Result<(), &'static str> {
    if !(SEVERITY_MIN..=SEVERITY_MAX).contains(&severity) {
        return Err("Severity must be between 1 and 10");
    }
    Ok(())
}

/// Validate the free-text description (may be empty, at most 255 chars).
pub fn validate_description(description: &str) -> Result<(), &'static str> {
    if description.len() > DESCRIPTION_MAX_LEN {
        return Err("Description must be at most 255 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disease_name_bounds() {
        assert!(validate_disease_name("Blight").is_ok());
        assert!(validate_disease_name("").is_err());
        assert!(validate_disease_name("   ").is_err());
        assert!(validate_disease_name(&"x".repeat(50)).is_ok());
        assert!(validate_disease_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn severity_bounds() {
        assert!(validate_severity(1).is_ok());
        assert!(validate_severity(10).is_ok());
        assert!(validate_severity(0).is_err());
        assert!(validate_severity(11).is_err());
        assert!(validate_severity(-3).is_err());
    }

    #[test]
    fn description_bounds() {
        assert!(validate_description("").is_ok());
        assert!(validate_description(&"y".repeat(255)).is_ok());
        assert!(validate_description(&"y".repeat(256)).is_err());
    }
}
