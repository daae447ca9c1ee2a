//! `liquidate` — third-party repayment of an unhealthy account's debt in
//! exchange for a bonus share of its collateral.
//!
//! Grounded on the liquidation check shape in
//! `a7af2ba1_dijkstra-keystone-keystone__examples-stylus-lending-src-lib.rs.rs`
//! (`calculate_liquidation_amounts`/`is_liquidatable`), adapted to this
//! engine's ledger and CEI discipline.

use crate::asset::{AccountId, AssetId};
use crate::engine::DebtEngine;
use crate::error::EngineError;
use crate::fixed_point::asset_amount;
use crate::health::is_liquidatable;
use crate::oracle::fetch_price;
use primitive_types::U256;

/// Percentage of the covered USD debt paid to the liquidator as a bonus,
/// beyond the collateral equivalent of the debt itself.
pub(crate) const LIQUIDATION_BONUS_PCT: u64 = 10;

pub fn liquidate(
    engine: &mut DebtEngine,
    caller: AccountId,
    asset: AssetId,
    victim: AccountId,
    debt_to_cover: U256,
    now: u64,
) -> Result<(), EngineError> {
    if debt_to_cover.is_zero() {
        return Err(EngineError::AmountZero);
    }
    engine.require_system_unfrozen()?;

    let hf0 = engine.health_factor(&victim, now)?;
    if !is_liquidatable(hf0) {
        return Err(EngineError::HealthOk);
    }

    // Caller's own health never changes as a result of this operation (only
    // the victim's ledger entry is mutated below), so this gate can run
    // ahead of every external call instead of after them.
    engine.require_healthy(&caller, now)?;

    let oracle_id = engine.ledger.oracle_id(&asset)?.clone();
    let price = fetch_price(engine.oracle.as_ref(), &oracle_id, now, engine.now_stale_after())?;

    let c_base = asset_amount(price, debt_to_cover)?;
    let bonus = c_base
        .checked_mul(U256::from(LIQUIDATION_BONUS_PCT))
        .and_then(|v| v.checked_div(U256::from(100u64)))
        .ok_or(EngineError::Overflow)?;
    let c_seize = c_base.checked_add(bonus).ok_or(EngineError::Overflow)?;

    // Ledger mutations (Effects) precede external calls (Interactions).
    // Open Question (c): an underflow here — the victim's collateral is
    // worth less than `c_seize` because the price moved adversely between
    // the health check above and this seizure — aborts the whole operation
    // rather than silently clamping the seized amount.
    let prior_collateral = engine.ledger.collateral_balance(&victim, &asset);
    let prior_debt = engine.ledger.debt(&victim);
    engine.ledger.decrease_collateral(victim, asset, c_seize)?;
    engine.ledger.decrease_debt(victim, debt_to_cover)?;

    // Checked against the already-mutated ledger, ahead of the external
    // calls, so a `HealthNotImproved` failure needs no compensating transfer.
    let hf1 = engine.health_factor(&victim, now)?;
    if hf1 <= hf0 {
        engine.ledger.set_collateral_balance(victim, asset, prior_collateral);
        engine.ledger.set_debt(victim, prior_debt);
        return Err(EngineError::HealthNotImproved);
    }

    let token = engine.ledger.token_mut(&asset)?;
    if let Err(err) = token.push(&caller, c_seize) {
        engine.ledger.set_collateral_balance(victim, asset, prior_collateral);
        engine.ledger.set_debt(victim, prior_debt);
        return Err(err);
    }

    if let Err(err) = engine.stablecoin.transfer_from(&caller, debt_to_cover) {
        engine.ledger.set_collateral_balance(victim, asset, prior_collateral);
        engine.ledger.set_debt(victim, prior_debt);
        return Err(err);
    }
    // `burn` failing here leaves the covered debt pulled from the liquidator
    // but unburned; treated as fatal rather than recoverable, as in `burn`.
    engine.stablecoin.burn(debt_to_cover)?;

    Ok(())
}
