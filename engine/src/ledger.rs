//! Per-account, per-asset collateral balances and per-account debt.
//!
//! Generalizes `contracts/lending/src/cross_asset.rs`'s `UserCrossPosition`
//! (a `Map<Address, i128>` of collateral/debt balances per asset) from
//! Soroban's `Map` to a plain `HashMap` — spec §9 notes account/asset keys
//! "have no ordering requirement", so a hash map is the accurate model, not
//! a sorted one.

use crate::asset::{AccountId, AssetId, CollateralAsset, OracleId};
use crate::error::EngineError;
use crate::oracle::{fetch_price, PriceOracleClient};
use primitive_types::U256;
use std::collections::HashMap;

/// A collateral asset registered with the engine: its oracle binding and the
/// adapter used to move the underlying token.
pub struct SupportedAsset {
    pub asset_id: AssetId,
    pub oracle_id: OracleId,
    pub token: Box<dyn CollateralAsset>,
}

/// The engine's in-memory ledger: supported assets, per-account collateral
/// balances, and per-account debt. No on-disk persistence — per spec §6 this
/// is the engine's entire state, plus externally-held token balances.
#[derive(Default)]
pub struct Ledger {
    assets: HashMap<AssetId, SupportedAsset>,
    asset_order: Vec<AssetId>,
    collateral: HashMap<(AccountId, AssetId), U256>,
    debt: HashMap<AccountId, U256>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new supported collateral asset. `oracle_id` must be
    /// non-empty per spec §3; each asset may be registered exactly once.
    pub fn add_asset(
        &mut self,
        asset_id: AssetId,
        oracle_id: OracleId,
        token: Box<dyn CollateralAsset>,
    ) -> Result<(), EngineError> {
        if oracle_id.0.is_empty() {
            return Err(EngineError::BadConfig);
        }
        if self.assets.contains_key(&asset_id) {
            return Err(EngineError::AssetAlreadySupported);
        }
        self.asset_order.push(asset_id);
        self.assets.insert(
            asset_id,
            SupportedAsset {
                asset_id,
                oracle_id,
                token,
            },
        );
        Ok(())
    }

    pub fn is_supported(&self, asset: &AssetId) -> bool {
        self.assets.contains_key(asset)
    }

    pub fn oracle_id(&self, asset: &AssetId) -> Result<&OracleId, EngineError> {
        self.assets
            .get(asset)
            .map(|a| &a.oracle_id)
            .ok_or(EngineError::AssetUnsupported)
    }

    pub fn supported_assets(&self) -> impl Iterator<Item = &AssetId> {
        self.asset_order.iter()
    }

    pub fn token_mut(&mut self, asset: &AssetId) -> Result<&mut (dyn CollateralAsset), EngineError> {
        self.assets
            .get_mut(asset)
            .map(|a| a.token.as_mut())
            .ok_or(EngineError::AssetUnsupported)
    }

    pub fn collateral_balance(&self, user: &AccountId, asset: &AssetId) -> U256 {
        self.collateral
            .get(&(*user, *asset))
            .copied()
            .unwrap_or_else(U256::zero)
    }

    pub fn increase_collateral(
        &mut self,
        user: AccountId,
        asset: AssetId,
        amount: U256,
    ) -> Result<U256, EngineError> {
        let current = self.collateral_balance(&user, &asset);
        let new_balance = current.checked_add(amount).ok_or(EngineError::Overflow)?;
        self.collateral.insert((user, asset), new_balance);
        Ok(new_balance)
    }

    pub fn decrease_collateral(
        &mut self,
        user: AccountId,
        asset: AssetId,
        amount: U256,
    ) -> Result<U256, EngineError> {
        let current = self.collateral_balance(&user, &asset);
        let new_balance = current.checked_sub(amount).ok_or(EngineError::Overflow)?;
        self.collateral.insert((user, asset), new_balance);
        Ok(new_balance)
    }

    /// Overwrite a balance directly, used only to roll back a prior mutation
    /// when a later step in the same operation fails (spec §5: a failed
    /// external call must unwind every ledger change already made).
    pub fn set_collateral_balance(&mut self, user: AccountId, asset: AssetId, balance: U256) {
        self.collateral.insert((user, asset), balance);
    }

    pub fn debt(&self, user: &AccountId) -> U256 {
        self.debt.get(user).copied().unwrap_or_else(U256::zero)
    }

    pub fn increase_debt(&mut self, user: AccountId, amount: U256) -> Result<U256, EngineError> {
        let current = self.debt(&user);
        let new_debt = current.checked_add(amount).ok_or(EngineError::Overflow)?;
        self.debt.insert(user, new_debt);
        Ok(new_debt)
    }

    pub fn decrease_debt(&mut self, user: AccountId, amount: U256) -> Result<U256, EngineError> {
        let current = self.debt(&user);
        let new_debt = current.checked_sub(amount).ok_or(EngineError::Overflow)?;
        self.debt.insert(user, new_debt);
        Ok(new_debt)
    }

    /// Overwrite a debt balance directly, used only to roll back a prior
    /// mutation when a later step in the same operation fails.
    pub fn set_debt(&mut self, user: AccountId, debt: U256) {
        self.debt.insert(user, debt);
    }

    /// Sum the USD value of every collateral asset `user` holds, using the
    /// current oracle price of each.
    pub fn total_collateral_value_usd(
        &self,
        user: &AccountId,
        oracle: &dyn PriceOracleClient,
        now: u64,
        stale_after: u64,
    ) -> Result<U256, EngineError> {
        let mut total = U256::zero();
        for asset_id in &self.asset_order {
            let balance = self.collateral_balance(user, asset_id);
            if balance.is_zero() {
                continue;
            }
            let asset = self.assets.get(asset_id).expect("asset_order is in sync");
            let price = fetch_price(oracle, &asset.oracle_id, now, stale_after)?;
            let value = crate::fixed_point::usd_value(price, balance)?;
            total = total.checked_add(value).ok_or(EngineError::Overflow)?;
        }
        Ok(total)
    }
}
