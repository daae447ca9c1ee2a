//! Read-only getters.
//!
//! Mirrors `contracts/lending/src/views.rs`'s public view surface
//! (`get_collateral_balance`, `get_debt_balance`, `get_health_factor`,
//! `get_user_position`, ...), generalized to this engine's multi-asset
//! ledger. Per spec §8 (P7), none of these mutate state.

use crate::asset::{AccountId, AssetId};
use crate::engine::DebtEngine;
use crate::error::EngineError;
use primitive_types::U256;

/// Snapshot of one account's position, analogous to the teacher's
/// `UserPositionSummary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPosition {
    pub debt: U256,
    pub collateral_value_usd: U256,
    pub health_factor: U256,
}

pub fn collateral_balance(engine: &DebtEngine, account: &AccountId, asset: &AssetId) -> U256 {
    engine.ledger().collateral_balance(account, asset)
}

pub fn debt_balance(engine: &DebtEngine, account: &AccountId) -> U256 {
    engine.ledger().debt(account)
}

pub fn collateral_value_usd(engine: &DebtEngine, account: &AccountId, now: u64) -> Result<U256, EngineError> {
    engine
        .ledger()
        .total_collateral_value_usd(account, engine.oracle(), now, engine.now_stale_after())
}

pub fn user_position(engine: &DebtEngine, account: &AccountId, now: u64) -> Result<UserPosition, EngineError> {
    let collateral_value_usd = collateral_value_usd(engine, account, now)?;
    let debt = debt_balance(engine, account);
    Ok(UserPosition {
        debt,
        collateral_value_usd,
        health_factor: engine.health_factor(account, now)?,
    })
}

pub fn is_asset_supported(engine: &DebtEngine, asset: &AssetId) -> bool {
    engine.ledger().is_supported(asset)
}

pub fn is_asset_frozen(engine: &DebtEngine, asset: &AssetId) -> bool {
    engine.freeze_controller().is_asset_frozen(asset)
}

pub fn is_system_frozen(engine: &DebtEngine) -> bool {
    engine.freeze_controller().is_system_frozen()
}
