//! Health factor computation.
//!
//! Mirrors `contracts/lending/src/views.rs::compute_health_factor`, generalized
//! from the teacher's single-collateral-asset, 4-decimal `HEALTH_FACTOR_SCALE`
//! to the 18-decimal scale shared with [`crate::fixed_point`], over a
//! multi-asset USD collateral total supplied by [`crate::ledger::Ledger`].

use crate::fixed_point::precision;
use primitive_types::U256;

/// Liquidation threshold, expressed as a percentage: only this fraction of a
/// user's collateral counts toward their health factor. 50 means a user's
/// collateral must be worth at least 2x their debt to stay healthy.
pub const LIQUIDATION_THRESHOLD: u64 = 50;

/// Denominator `LIQUIDATION_THRESHOLD` is a percentage of.
pub const LIQUIDATION_PRECISION: u64 = 100;

/// Health factor below which a position is liquidatable.
pub fn health_factor_min() -> U256 {
    precision()
}

/// `health_factor = (collateral_usd * LIQUIDATION_THRESHOLD / LIQUIDATION_PRECISION) * PRECISION / debt_usd`.
///
/// A user with zero debt is maximally healthy regardless of collateral —
/// returns `U256::MAX` per spec §4.4, mirroring the teacher's
/// `HEALTH_FACTOR_NO_DEBT` sentinel generalized to the full width of the type.
pub fn health_factor(collateral_usd: U256, debt_usd: U256) -> U256 {
    if debt_usd.is_zero() {
        return U256::MAX;
    }
    let adjusted_collateral = match collateral_usd.checked_mul(U256::from(LIQUIDATION_THRESHOLD)) {
        Some(scaled) => scaled / U256::from(LIQUIDATION_PRECISION),
        None => return U256::MAX,
    };
    adjusted_collateral
        .checked_mul(precision())
        .map(|scaled| scaled / debt_usd)
        .unwrap_or(U256::MAX)
}

/// Is a position with the given health factor liquidatable?
pub fn is_liquidatable(factor: U256) -> bool {
    factor < health_factor_min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_debt_is_maximally_healthy() {
        let factor = health_factor(U256::from(1_000u64) * precision(), U256::zero());
        assert_eq!(factor, U256::MAX);
        assert!(!is_liquidatable(factor));
    }

    #[test]
    fn at_exactly_the_threshold_is_not_liquidatable() {
        // 200 USD collateral, 100 USD debt: adjusted collateral = 100, hf = 1.0.
        let collateral = U256::from(200u64) * precision();
        let debt = U256::from(100u64) * precision();
        let factor = health_factor(collateral, debt);
        assert_eq!(factor, precision());
        assert!(!is_liquidatable(factor));
    }

    #[test]
    fn below_threshold_is_liquidatable() {
        // 150 USD collateral, 100 USD debt: adjusted collateral = 75, hf = 0.75.
        let collateral = U256::from(150u64) * precision();
        let debt = U256::from(100u64) * precision();
        let factor = health_factor(collateral, debt);
        assert!(factor < precision());
        assert!(is_liquidatable(factor));
    }

    #[test]
    fn above_threshold_is_healthy() {
        // 300 USD collateral, 100 USD debt: adjusted collateral = 150, hf = 1.5.
        let collateral = U256::from(300u64) * precision();
        let debt = U256::from(100u64) * precision();
        let factor = health_factor(collateral, debt);
        assert!(factor > precision());
        assert!(!is_liquidatable(factor));
    }
}
