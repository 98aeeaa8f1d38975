//! GSM Forms Validation Core
//!
//! Primitive checks shared by the form engine: presence, string length and
//! numeric bounds. Each check returns `Err` with a default human-readable
//! message that callers may replace with a rule-specific one.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod numeric;
pub mod presence;
pub mod string;

// Re-export all validators
pub use numeric::*;
pub use presence::*;
pub use string::*;
