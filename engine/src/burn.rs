//! `burn` — repay DSC debt. Can only improve health, so spec §4.5 calls the
//! post-check on this path trivial; it is omitted rather than computed twice.

use crate::asset::AccountId;
use crate::engine::DebtEngine;
use crate::error::EngineError;
use primitive_types::U256;

pub fn burn(engine: &mut DebtEngine, caller: AccountId, amount: U256) -> Result<(), EngineError> {
    burn_unlocked(engine, caller, amount)
}

/// Core logic shared with `redeem_for_dsc`, which burns before redeeming.
pub fn burn_unlocked(engine: &mut DebtEngine, caller: AccountId, amount: U256) -> Result<(), EngineError> {
    if amount.is_zero() {
        return Err(EngineError::AmountZero);
    }
    engine.require_system_unfrozen()?;

    let prior_debt = engine.ledger.debt(&caller);
    engine.ledger.decrease_debt(caller, amount)?;

    if let Err(err) = engine.stablecoin.transfer_from(&caller, amount) {
        engine.ledger.set_debt(caller, prior_debt);
        return Err(err);
    }
    // `burn` failing here leaves the transferred DSC in the adapter's
    // custody, unburned; the adapter is expected to treat this as fatal
    // rather than a recoverable condition, so the ledger is not restored.
    engine.stablecoin.burn(amount)?;
    Ok(())
}
