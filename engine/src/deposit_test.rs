//! Tests for `deposit.rs`.

use crate::testutil::*;
use crate::EngineError;
use primitive_types::U256;

#[test]
fn zero_amount_is_rejected() {
    let (mut engine, eth, _, _, _, _) = setup_single_asset(2_000_00000000);
    let user = account(1);
    let err = engine.deposit(user, eth, U256::zero(), 0).unwrap_err();
    assert_eq!(err, EngineError::AmountZero);
}

#[test]
fn unsupported_asset_is_rejected() {
    let (mut engine, _, _, _, _, _) = setup_single_asset(2_000_00000000);
    let user = account(1);
    let other = asset(99);
    let err = engine.deposit(user, other, U256::from(1u64), 0).unwrap_err();
    assert_eq!(err, EngineError::AssetUnsupported);
}

#[test]
fn failed_transfer_rolls_back_the_ledger() {
    let (mut engine, eth, _, _, token, _) = setup_single_asset(2_000_00000000);
    let user = account(1);
    token.fund(user, U256::from(100u64));
    token.fail_next_call();

    let err = engine.deposit(user, eth, U256::from(10u64), 0).unwrap_err();
    assert_eq!(err, EngineError::TransferFailed);
    assert_eq!(engine.ledger().collateral_balance(&user, &eth), U256::zero());
}
