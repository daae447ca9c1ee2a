//! `mint` — issue DSC against existing collateral.

use crate::asset::AccountId;
use crate::engine::DebtEngine;
use crate::error::EngineError;
use primitive_types::U256;

pub fn mint(engine: &mut DebtEngine, caller: AccountId, amount: U256, now: u64) -> Result<(), EngineError> {
    mint_unlocked(engine, caller, amount, now)
}

/// Core logic shared with `deposit_and_mint`.
pub fn mint_unlocked(
    engine: &mut DebtEngine,
    caller: AccountId,
    amount: U256,
    now: u64,
) -> Result<(), EngineError> {
    if amount.is_zero() {
        return Err(EngineError::AmountZero);
    }
    engine.require_system_unfrozen()?;

    let prior_debt = engine.ledger.debt(&caller);
    engine.ledger.increase_debt(caller, amount)?;

    // Post-check runs against the already-mutated ledger, before the
    // external mint — a failure here needs no compensating burn, since the
    // token was never minted.
    if let Err(err) = engine.require_healthy(&caller, now) {
        engine.ledger.set_debt(caller, prior_debt);
        return Err(err);
    }

    if let Err(err) = engine.stablecoin.mint(&caller, amount) {
        engine.ledger.set_debt(caller, prior_debt);
        return Err(err);
    }
    Ok(())
}
