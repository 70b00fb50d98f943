//! Input validation utilities

use crate::constants;

/// Validate programming language key
pub fn validate_language(language: &str) -> Result<(), &'static str> {
    if constants::languages::ALL.contains(&language) {
        Ok(())
    } else {
        Err("Unsupported programming language")
    }
}

/// Validate submitted source code
pub fn validate_source_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Source code must not be empty");
    }
    if code.len() > constants::MAX_SOURCE_CODE_SIZE {
        return Err("Source code exceeds the maximum allowed size");
    }
    Ok(())
}

/// Validate ad-hoc custom input for a sample run
pub fn validate_custom_input(input: &str) -> Result<(), &'static str> {
    if input.len() > constants::MAX_CUSTOM_INPUT_SIZE {
        return Err("Custom input exceeds the maximum allowed size");
    }
    Ok(())
}

/// Validate user role
pub fn validate_role(role: &str) -> Result<(), &'static str> {
    match role {
        constants::roles::USER | constants::roles::ADMIN => Ok(()),
        _ => Err("Invalid role"),
    }
}
