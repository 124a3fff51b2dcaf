use chrono::NaiveDateTime;

use crate::error::ApiError;

/// Parses a `now` override such as `2024-01-01T10:00` or `2024-01-01T10:00:00`.
pub fn validate_now(value: &str) -> Result<NaiveDateTime, ApiError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| {
            ApiError::BadRequest("now must look like YYYY-MM-DDTHH:MM[:SS]".into())
        })
}
