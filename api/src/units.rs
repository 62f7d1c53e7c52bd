use alloy::primitives::U256;

use crate::{consts::DECIMALS, error::GitStakeError};

/// One whole unit of the native asset, in base units.
pub fn base_unit_scale() -> U256 {
    U256::from(10u64).pow(U256::from(DECIMALS))
}

/// Parses a human decimal string ("1.5", ".25", "3.") into base units.
///
/// Rejects signs, exponents, separators, and anything with more than
/// [`DECIMALS`] fractional digits. Nothing is ever truncated.
pub fn to_base_units(input: &str) -> Result<U256, GitStakeError> {
    let invalid = |reason: &'static str| GitStakeError::InvalidAmount {
        input: input.to_string(),
        reason,
    };

    let amount = input.trim();
    if amount.is_empty() {
        return Err(invalid("amount is empty"));
    }

    let (whole, frac) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("amount has no digits"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("amount must be a non-negative decimal number"));
    }
    if frac.len() > DECIMALS {
        return Err(invalid("amount has more than 18 fractional digits"));
    }

    let whole = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).map_err(|_| invalid("amount is too large"))?
    };

    // At most 18 digits, always fits in a u64.
    let frac = format!("{frac:0<width$}", width = DECIMALS)
        .parse::<u64>()
        .map_err(|_| invalid("amount must be a non-negative decimal number"))?;

    whole
        .checked_mul(base_unit_scale())
        .and_then(|v| v.checked_add(U256::from(frac)))
        .ok_or_else(|| invalid("amount is too large"))
}

/// Renders base units as the shortest exact decimal string.
pub fn to_decimal(amount: U256) -> String {
    let scale = base_unit_scale();
    let whole = amount / scale;
    let frac = amount % scale;
    if frac.is_zero() {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", frac.to_string(), width = DECIMALS);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Display helper: like [`to_decimal`] but cut to `precision` fractional digits.
pub fn format_amount(amount: U256, precision: usize) -> String {
    let exact = to_decimal(amount);
    match exact.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac[..frac.len().min(precision)].trim_end_matches('0');
            if frac.is_empty() {
                whole.to_string()
            } else {
                format!("{whole}.{frac}")
            }
        }
        None => exact,
    }
}
