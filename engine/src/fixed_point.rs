//! 256-bit fixed-point arithmetic against oracle prices.
//!
//! Two scaling constants: `PRECISION` is the scale shared by the stablecoin,
//! USD values, and health factors (18 decimals). `FEED_SCALE` lifts an
//! 8-decimal oracle price up to that 18-decimal scale.

use crate::error::EngineError;
use primitive_types::U256;

/// Decimal exponent shared by the stablecoin, USD values, and health factors.
pub const PRECISION_EXP: u32 = 18;

/// Decimal exponent the oracle's raw price is quoted in.
pub const ORACLE_PRICE_EXP: u32 = 8;

/// Multiplier that lifts an 8-decimal oracle price up to 18-decimal USD.
pub const FEED_SCALE_EXP: u32 = PRECISION_EXP - ORACLE_PRICE_EXP;

/// `10^18`, as a [`U256`].
pub fn precision() -> U256 {
    U256::exp10(PRECISION_EXP as usize)
}

/// `10^10`, as a [`U256`].
pub fn feed_scale() -> U256 {
    U256::exp10(FEED_SCALE_EXP as usize)
}

/// `usd_value = price * FEED_SCALE * amount / PRECISION`.
///
/// `price_8dec` must be strictly positive — the caller is responsible for
/// having validated that (division by a zero price is a programming fault,
/// not a recoverable error, per spec). `amount_18dec` may be zero.
pub fn usd_value(price_8dec: U256, amount_18dec: U256) -> Result<U256, EngineError> {
    debug_assert!(!price_8dec.is_zero(), "usd_value: price must be positive");
    price_8dec
        .checked_mul(feed_scale())
        .and_then(|v| v.checked_mul(amount_18dec))
        .and_then(|v| v.checked_div(precision()))
        .ok_or(EngineError::Overflow)
}

/// `asset_amount = usd * PRECISION / (price * FEED_SCALE)`.
///
/// The inverse of [`usd_value`]: how much of an asset, at the given price,
/// is equivalent to `usd_18dec` dollars.
pub fn asset_amount(price_8dec: U256, usd_18dec: U256) -> Result<U256, EngineError> {
    debug_assert!(
        !price_8dec.is_zero(),
        "asset_amount: price must be positive"
    );
    let denom = price_8dec.checked_mul(feed_scale()).ok_or(EngineError::Overflow)?;
    usd_18dec
        .checked_mul(precision())
        .and_then(|v| v.checked_div(denom))
        .ok_or(EngineError::Overflow)
}
