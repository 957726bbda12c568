use crate::server::error::{internal::InternalError, AppError};

/// Parses a u64 value from a string slice
///
/// # Arguments
/// - `value` - The string to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed string to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: &str) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: value.to_string(),
            source: e,
        })?;

    Ok(result)
}

/// Parses a Discord snowflake taken from a URL path.
///
/// Snowflakes are never zero, so `0` is rejected along with anything non-numeric.
pub fn parse_snowflake(value: &str) -> Option<u64> {
    value.parse::<u64>().ok().filter(|id| *id != 0)
}
