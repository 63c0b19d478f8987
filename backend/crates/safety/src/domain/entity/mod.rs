//! Entity Module

pub mod hazard;
pub mod safety_card;

use crate::error::{SafetyError, SafetyResult};

/// Trim `value`, rejecting it if nothing is left
fn required(field: &str, value: &str) -> SafetyResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SafetyError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}
