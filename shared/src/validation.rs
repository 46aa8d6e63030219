//! Input validation functions
//!
//! Field-level checks live on the request types as `validator` derives.
//! This module holds the checks that need a custom message or ordering.

use validator::ValidationErrors;

/// Lowest accepted rating value
pub const RATING_MIN: f64 = 0.0;

/// Highest accepted rating value
pub const RATING_MAX: f64 = 5.0;

/// Validate a rating value, inclusive on both ends
pub fn validate_rating(value: f64) -> Result<(), String> {
    if !value.is_finite() || !(RATING_MIN..=RATING_MAX).contains(&value) {
        return Err(format!(
            "{} is invalid, Rating range should be from {} to {}",
            value, RATING_MIN, RATING_MAX
        ));
    }
    Ok(())
}

/// Flatten `validator` errors into one human-readable line
///
/// Fields are listed alphabetically so the output is stable.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
