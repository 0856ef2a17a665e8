//! Shared field validators and helpers to turn `validator` reports into
//! plain messages.

use chrono::{NaiveDate, Utc};
use validator::{Validate, ValidationError};

use crate::errors::ModelError;

/// Rejects empty or whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Rejects dates before today (UTC). Today itself is accepted.
pub fn not_in_past(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date < Utc::now().date_naive() {
        return Err(ValidationError::new("past_date"));
    }
    Ok(())
}

/// All violation messages of `input`, sorted for stable output.
pub fn violations<T: Validate>(input: &T) -> Vec<String> {
    let Err(errors) = input.validate() else { return Vec::new() };
    let mut out: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|e| match &e.message {
            Some(m) => m.to_string(),
            None => e.code.to_string(),
        })
        .collect();
    out.sort();
    out
}

/// Validate and fold every violation into a single `ModelError::Validation`.
pub fn check<T: Validate>(input: &T) -> Result<(), ModelError> {
    let v = violations(input);
    if v.is_empty() {
        Ok(())
    } else {
        Err(ModelError::Validation(v.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detects_whitespace() {
        assert!(not_blank("  \t").is_err());
        assert!(not_blank("").is_err());
        assert!(not_blank(" x ").is_ok());
    }

    #[test]
    fn today_is_not_in_the_past() {
        let today = Utc::now().date_naive();
        assert!(not_in_past(&today).is_ok());
        assert!(not_in_past(&(today - chrono::Duration::days(1))).is_err());
    }
}
