//! Numeric validation functions
//!
//! Values that failed numeric coercion arrive as NaN. NaN compares false
//! against every bound, so it never produces a range error.

use alloc::format;
use alloc::string::String;

/// Formats a bound without a trailing `.0` for whole numbers
fn fmt_bound(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Validates minimum value
pub fn validate_min(value: f64, min: f64) -> Result<(), String> {
    if value < min {
        Err(format!("Must be at least {}", fmt_bound(min)))
    } else {
        Ok(())
    }
}

/// Validates maximum value
pub fn validate_max(value: f64, max: f64) -> Result<(), String> {
    if value > max {
        Err(format!("Must be at most {}", fmt_bound(max)))
    } else {
        Ok(())
    }
}
