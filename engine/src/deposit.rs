//! `deposit` — lock collateral without minting against it.
//!
//! Grounded on `contracts/lending/src/deposit.rs`'s guard-then-mutate-then-emit
//! shape; deposits cannot break the health invariant (more collateral only
//! helps), so spec §4.5 requires no post-check here.

use crate::asset::{AccountId, AssetId};
use crate::engine::DebtEngine;
use crate::error::EngineError;
use crate::events::{emit, Event};
use primitive_types::U256;

pub fn deposit(
    engine: &mut DebtEngine,
    caller: AccountId,
    asset: AssetId,
    amount: U256,
    now: u64,
) -> Result<(), EngineError> {
    deposit_unlocked(engine, caller, asset, amount, now)
}

/// Core logic shared with `deposit_and_mint`, which must perform both
/// mutations under a single lock acquisition.
pub fn deposit_unlocked(
    engine: &mut DebtEngine,
    caller: AccountId,
    asset: AssetId,
    amount: U256,
    _now: u64,
) -> Result<(), EngineError> {
    if amount.is_zero() {
        return Err(EngineError::AmountZero);
    }
    engine.require_asset_usable(&asset)?;

    let prior_balance = engine.ledger.collateral_balance(&caller, &asset);
    engine.ledger.increase_collateral(caller, asset, amount)?;

    let token = engine.ledger.token_mut(&asset)?;
    if let Err(err) = token.pull(&caller, amount) {
        engine.ledger.set_collateral_balance(caller, asset, prior_balance);
        return Err(err);
    }

    emit(&Event::CollateralDeposited { user: caller, asset, amount });
    Ok(())
}
