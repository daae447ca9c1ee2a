//! Tests for `mint.rs`.

use crate::testutil::*;
use crate::EngineError;
use primitive_types::U256;

fn precision() -> U256 {
    crate::fixed_point::precision()
}

#[test]
fn minting_past_the_limit_rolls_back_debt() {
    let (mut engine, eth, _, _, token, _) = setup_single_asset(2_000_00000000);
    let user = account(1);
    token.fund(user, U256::from(10u64) * precision());
    engine.deposit(user, eth, U256::from(10u64) * precision(), 0).unwrap();
    engine.mint(user, U256::from(10_000u64) * precision(), 0).unwrap();

    let err = engine.mint(user, U256::from(1u64), 0).unwrap_err();
    assert!(matches!(err, EngineError::LowHealthFactor(_)));
    assert_eq!(engine.ledger().debt(&user), U256::from(10_000u64) * precision());
}

#[test]
fn zero_amount_is_rejected() {
    let (mut engine, _, _, _, _, _) = setup_single_asset(2_000_00000000);
    let user = account(1);
    let err = engine.mint(user, U256::zero(), 0).unwrap_err();
    assert_eq!(err, EngineError::AmountZero);
}
