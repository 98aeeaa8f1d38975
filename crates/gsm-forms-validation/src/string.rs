//! String validation functions
//!
//! Lengths are counted in characters, not bytes, so Cyrillic organization
//! names are measured the way a user types them.

use alloc::format;
use alloc::string::String;

/// Number of characters in `s`
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Validates minimum string length
pub fn validate_min_length(s: &str, min: usize) -> Result<(), String> {
    if char_len(s) >= min {
        Ok(())
    } else {
        Err(format!("Must be at least {} characters", min))
    }
}

/// Validates maximum string length
pub fn validate_max_length(s: &str, max: usize) -> Result<(), String> {
    if char_len(s) <= max {
        Ok(())
    } else {
        Err(format!("Must be at most {} characters", max))
    }
}

/// True when every character is an ASCII digit and the string is non-empty
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
