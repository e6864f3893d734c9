//! Listing price parsing.

use crate::CommandError;

/// Parse a price into the integer amount signed as `uint256`.
///
/// Integer text is taken as-is. Anything else must be a finite, non-negative,
/// integral float (`"10.0"` is 10, `"10.5"` is rejected).
pub fn parse_price(raw: &str) -> Result<u64, CommandError> {
    let text = raw.trim();
    if let Ok(value) = text.parse::<u64>() {
        return Ok(value);
    }

    let value: f64 = text
        .parse()
        .map_err(|_| CommandError::malformed(format!("price is not a number: {raw:?}")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(CommandError::malformed(format!(
            "price must be non-negative: {raw:?}"
        )));
    }
    if value.fract() != 0.0 {
        return Err(CommandError::malformed(format!(
            "price must be a whole amount: {raw:?}"
        )));
    }
    // u64::MAX rounds up to 2^64 as f64, so the bound is exclusive.
    if value >= u64::MAX as f64 {
        return Err(CommandError::malformed(format!("price out of range: {raw:?}")));
    }
    Ok(value as u64)
}
