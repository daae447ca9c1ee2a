//! The public `DebtEngine` surface: deposit, mint, burn, redeem, liquidate,
//! and the admin-gated freeze/parameter controls.
//!
//! Structured like `contracts/lending/src/lib.rs`'s `LendingContract`, which
//! holds no logic itself and delegates every operation to a sibling module
//! (`borrow::borrow`, `deposit::deposit`, ...). Here the delegation targets
//! are `crate::deposit`, `crate::mint`, `crate::burn`, `crate::redeem`,
//! `crate::liquidate` rather than free functions taking an `Env`, since this
//! engine owns its state directly instead of reading it out of host storage.

use crate::asset::{AccountId, AssetId, CollateralAsset, OracleId};
use crate::error::EngineError;
use crate::fixed_point::precision;
use crate::freeze::FreezeController;
use crate::health::{health_factor, is_liquidatable};
use crate::ledger::Ledger;
use crate::oracle::PriceOracleClient;
use primitive_types::U256;
use std::collections::HashMap;

/// The collateralized debt engine. Owns the ledger, freeze controller,
/// stablecoin adapter, admin identity, and the reentrancy lock.
///
/// No on-disk persistence: every field here is the engine's entire state,
/// per spec §6 — a fresh `DebtEngine` and a fresh host process are the same
/// starting point.
pub struct DebtEngine {
    pub(crate) ledger: Ledger,
    pub(crate) freeze: FreezeController,
    pub(crate) stablecoin: Box<dyn crate::asset::StablecoinAdapter>,
    pub(crate) oracle: Box<dyn PriceOracleClient>,
    pub(crate) admin: AccountId,
    pub(crate) stale_after: u64,
    locked: bool,
}

impl DebtEngine {
    pub fn new(
        admin: AccountId,
        oracle: Box<dyn PriceOracleClient>,
        stablecoin: Box<dyn crate::asset::StablecoinAdapter>,
        max_drop_pct: u64,
        check_interval: u64,
        stale_after: u64,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            ledger: Ledger::new(),
            freeze: FreezeController::new(max_drop_pct, check_interval)?,
            stablecoin,
            oracle,
            admin,
            stale_after,
            locked: false,
        })
    }

    /// Acquire the non-reentrancy lock per spec §5. Any mutating operation
    /// begins with this; a re-entrant call observed while the lock is held
    /// fails with `Reentered` rather than deadlocking, mirroring the boolean
    /// flag `contracts/lending/src/flash_loan.rs::ReentrancyGuard` stores in
    /// instance storage.
    fn enter(&mut self) -> Result<(), EngineError> {
        if self.locked {
            tracing::warn!("rejected re-entrant call while the engine lock is held");
            return Err(EngineError::Reentered);
        }
        self.locked = true;
        Ok(())
    }

    fn exit(&mut self) {
        self.locked = false;
    }

    /// Run `body` under the reentrancy lock, releasing it on every exit path
    /// (success, early return, or error) exactly as spec §5 requires.
    fn with_lock<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        self.enter()?;
        let result = body(self);
        self.exit();
        result
    }

    pub fn admin(&self) -> AccountId {
        self.admin
    }

    pub fn require_admin(&self, caller: &AccountId) -> Result<(), EngineError> {
        if *caller != self.admin {
            return Err(EngineError::Unauthorized);
        }
        Ok(())
    }

    pub fn now_stale_after(&self) -> u64 {
        self.stale_after
    }

    pub fn oracle(&self) -> &dyn PriceOracleClient {
        self.oracle.as_ref()
    }

    /// Register a new supported collateral asset (admin only).
    pub fn add_asset(
        &mut self,
        caller: &AccountId,
        asset: AssetId,
        oracle_id: OracleId,
        token: Box<dyn CollateralAsset>,
    ) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        self.ledger.add_asset(asset, oracle_id, token)?;
        self.freeze.register_asset(asset);
        Ok(())
    }

    pub fn deposit(&mut self, caller: AccountId, asset: AssetId, amount: U256, now: u64) -> Result<(), EngineError> {
        self.with_lock(|engine| crate::deposit::deposit(engine, caller, asset, amount, now))
    }

    pub fn mint(&mut self, caller: AccountId, amount: U256, now: u64) -> Result<(), EngineError> {
        self.with_lock(|engine| crate::mint::mint(engine, caller, amount, now))
    }

    pub fn deposit_and_mint(
        &mut self,
        caller: AccountId,
        asset: AssetId,
        collateral_amount: U256,
        mint_amount: U256,
        now: u64,
    ) -> Result<(), EngineError> {
        self.with_lock(|engine| {
            crate::deposit::deposit_unlocked(engine, caller, asset, collateral_amount, now)?;
            crate::mint::mint_unlocked(engine, caller, mint_amount, now)
        })
    }

    pub fn burn(&mut self, caller: AccountId, amount: U256) -> Result<(), EngineError> {
        self.with_lock(|engine| crate::burn::burn(engine, caller, amount))
    }

    pub fn redeem(&mut self, caller: AccountId, asset: AssetId, amount: U256, now: u64) -> Result<(), EngineError> {
        self.with_lock(|engine| crate::redeem::redeem(engine, caller, asset, amount, now))
    }

    pub fn redeem_for_dsc(
        &mut self,
        caller: AccountId,
        asset: AssetId,
        collateral_amount: U256,
        dsc_amount: U256,
        now: u64,
    ) -> Result<(), EngineError> {
        self.with_lock(|engine| {
            crate::burn::burn_unlocked(engine, caller, dsc_amount)?;
            crate::redeem::redeem_unlocked(engine, caller, asset, collateral_amount, now)
        })
    }

    pub fn liquidate(
        &mut self,
        caller: AccountId,
        asset: AssetId,
        victim: AccountId,
        debt_to_cover: U256,
        now: u64,
    ) -> Result<(), EngineError> {
        self.with_lock(|engine| crate::liquidate::liquidate(engine, caller, asset, victim, debt_to_cover, now))
    }

    /// Admin-only: sample `asset`'s oracle price and freeze it if the drop
    /// exceeds the configured threshold.
    pub fn check_price_drop(&mut self, asset: AssetId, now: u64) -> Result<bool, EngineError> {
        let oracle_id = self.ledger.oracle_id(&asset)?.clone();
        let stale_after = self.stale_after;
        self.freeze
            .check_price_drop(asset, self.oracle.as_ref(), &oracle_id, now, stale_after)
    }

    pub fn unfreeze_asset(&mut self, caller: &AccountId, asset: AssetId, now: u64) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        let oracle_id = self.ledger.oracle_id(&asset)?.clone();
        let price = crate::oracle::fetch_price(self.oracle.as_ref(), &oracle_id, now, self.stale_after)?;
        self.freeze.unfreeze_asset(asset, price)
    }

    pub fn unfreeze_system(&mut self, caller: &AccountId, now: u64) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        let mut prices = HashMap::new();
        for asset in self.ledger.supported_assets() {
            let oracle_id = self.ledger.oracle_id(asset)?.clone();
            let price = crate::oracle::fetch_price(self.oracle.as_ref(), &oracle_id, now, self.stale_after)?;
            prices.insert(*asset, price);
        }
        self.freeze.unfreeze_system(now, &prices)
    }

    pub fn update_parameters(
        &mut self,
        caller: &AccountId,
        max_drop_pct: u64,
        check_interval: u64,
    ) -> Result<(), EngineError> {
        self.require_admin(caller)?;
        self.freeze.update_parameters(max_drop_pct, check_interval)
    }

    /// Guard (G2)/(G3)/(G4): asset must be supported, not frozen, and the
    /// system must not be frozen.
    pub(crate) fn require_asset_usable(&self, asset: &AssetId) -> Result<(), EngineError> {
        if self.freeze.is_system_frozen() {
            return Err(EngineError::SystemFrozen);
        }
        if !self.ledger.is_supported(asset) {
            return Err(EngineError::AssetUnsupported);
        }
        if self.freeze.is_asset_frozen(asset) {
            return Err(EngineError::AssetFrozen);
        }
        Ok(())
    }

    /// Guard (G4) alone, for operations that do not name a specific asset
    /// (`mint`, `burn`).
    pub(crate) fn require_system_unfrozen(&self) -> Result<(), EngineError> {
        if self.freeze.is_system_frozen() {
            return Err(EngineError::SystemFrozen);
        }
        Ok(())
    }

    /// Health factor of `account`, per spec §4.4: the sum of USD collateral
    /// value across every supported asset, haircut by the liquidation
    /// threshold, divided by debt; `U256::MAX` if debt is zero.
    pub fn health_factor(&self, account: &AccountId, now: u64) -> Result<U256, EngineError> {
        let collateral_usd =
            self.ledger
                .total_collateral_value_usd(account, self.oracle.as_ref(), now, self.stale_after)?;
        let debt = self.ledger.debt(account);
        Ok(health_factor(collateral_usd, debt))
    }

    pub(crate) fn require_healthy(&self, account: &AccountId, now: u64) -> Result<(), EngineError> {
        let factor = self.health_factor(account, now)?;
        if is_liquidatable(factor) {
            return Err(EngineError::LowHealthFactor(factor));
        }
        Ok(())
    }

    /// `MIN_HF = 10^18`: the minimum healthy value a health factor may take.
    pub fn min_health_factor() -> U256 {
        precision()
    }

    /// `PRECISION = 10^18`: the stablecoin, USD-value, and health-factor scale.
    pub fn precision() -> U256 {
        precision()
    }

    /// `FEED_SCALE = 10^10`: multiplier lifting an 8-decimal oracle price to
    /// 18-decimal USD.
    pub fn feed_scale() -> U256 {
        crate::fixed_point::feed_scale()
    }

    /// Haircut applied to collateral value when computing a health factor, as
    /// a percentage (`liq_threshold() / liq_precision()` = 50%).
    pub fn liq_threshold() -> u64 {
        crate::health::LIQUIDATION_THRESHOLD
    }

    /// Denominator `liq_threshold()` is a percentage of.
    pub fn liq_precision() -> u64 {
        crate::health::LIQUIDATION_PRECISION
    }

    /// Liquidation bonus, as a percentage of the USD debt covered.
    pub fn liq_bonus() -> u64 {
        crate::liquidate::LIQUIDATION_BONUS_PCT
    }

    /// Consecutive frozen assets that trip the system-wide freeze.
    pub fn asset_freeze_threshold() -> u32 {
        crate::freeze::ASSET_FREEZE_THRESHOLD
    }

    /// Minimum time a system-wide freeze must hold before it can be thawed.
    pub fn min_freeze_duration() -> u64 {
        crate::freeze::MIN_FREEZE_DURATION_SECS
    }

    /// Snapshot of `account`'s position: debt, USD collateral value, and
    /// health factor, per spec §4.7.
    pub fn user_position(&self, account: &AccountId, now: u64) -> Result<crate::views::UserPosition, EngineError> {
        crate::views::user_position(self, account, now)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn freeze_controller(&self) -> &FreezeController {
        &self.freeze
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::*;

    /// A re-entrant call observed while the lock is held fails with
    /// `Reentered` rather than deadlocking or corrupting state.
    #[test]
    fn with_lock_rejects_reentry() {
        let (mut engine, _, _, _, _, _) = setup_single_asset(2_000_00000000);
        let outer = engine.with_lock(|engine| {
            let inner = engine.with_lock(|_| Ok::<(), crate::EngineError>(()));
            assert_eq!(inner, Err(crate::EngineError::Reentered));
            Ok::<(), crate::EngineError>(())
        });
        assert!(outer.is_ok());
    }

    /// The lock is released on the success path, so a later operation is
    /// free to acquire it again.
    #[test]
    fn lock_is_released_after_a_successful_operation() {
        let (mut engine, _, _, _, _, _) = setup_single_asset(2_000_00000000);
        assert!(!engine.locked);
        engine.with_lock(|_| Ok::<(), crate::EngineError>(())).unwrap();
        assert!(!engine.locked);
    }

    /// The lock is released on the error path too, per spec §5 ("released at
    /// every exit path").
    #[test]
    fn lock_is_released_after_a_failed_operation() {
        let (mut engine, _, _, _, _, _) = setup_single_asset(2_000_00000000);
        let _ = engine.with_lock(|_| Err::<(), _>(crate::EngineError::AmountZero));
        assert!(!engine.locked);
    }
}
