//! `redeem` — withdraw collateral, subject to the post-withdrawal health
//! check.
//!
//! Grounded on `contracts/lending/src/withdraw.rs`, which cross-references
//! the borrow module's debt map to validate the post-withdrawal collateral
//! ratio; here that cross-reference is `DebtEngine::require_healthy`.

use crate::asset::{AccountId, AssetId};
use crate::engine::DebtEngine;
use crate::error::EngineError;
use crate::events::{emit, Event};
use primitive_types::U256;

pub fn redeem(
    engine: &mut DebtEngine,
    caller: AccountId,
    asset: AssetId,
    amount: U256,
    now: u64,
) -> Result<(), EngineError> {
    redeem_unlocked(engine, caller, asset, amount, now)
}

/// Core logic shared with `redeem_for_dsc`, which burns debt first so the
/// post-redeem health check sees the already-reduced debt.
pub fn redeem_unlocked(
    engine: &mut DebtEngine,
    caller: AccountId,
    asset: AssetId,
    amount: U256,
    now: u64,
) -> Result<(), EngineError> {
    if amount.is_zero() {
        return Err(EngineError::AmountZero);
    }
    engine.require_asset_usable(&asset)?;

    let prior_balance = engine.ledger.collateral_balance(&caller, &asset);
    engine.ledger.decrease_collateral(caller, asset, amount)?;

    // Post-check before the external transfer, so a failed check never
    // needs to claw back a completed withdrawal.
    if let Err(err) = engine.require_healthy(&caller, now) {
        engine.ledger.set_collateral_balance(caller, asset, prior_balance);
        return Err(err);
    }

    let token = engine.ledger.token_mut(&asset)?;
    if let Err(err) = token.push(&caller, amount) {
        engine.ledger.set_collateral_balance(caller, asset, prior_balance);
        return Err(err);
    }

    emit(&Event::CollateralRedeemed { from: caller, to: caller, asset, amount });
    Ok(())
}
