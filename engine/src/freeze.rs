//! Per-asset and global freeze state machine.
//!
//! Generalizes `contracts/lending/src/pause.rs`'s `PauseType`/`PauseDataKey`
//! state machine (global pause gating a per-type pause) from an
//! admin-triggered boolean into an oracle-driven one: freezes are triggered
//! by observed price drops, not by direct admin action, and admin may only
//! thaw once a recovery predicate holds.

use crate::asset::AssetId;
use crate::error::EngineError;
use crate::events::{emit, Event};
use crate::oracle::{fetch_price, PriceOracleClient};
use primitive_types::U256;
use std::collections::HashMap;

/// Percentage points above which an asset's observed price drop freezes it.
/// Must stay in `1..=50`; see [`FreezeController::update_parameters`].
pub const MAX_DROP_PCT_UPPER_BOUND: u64 = 50;

/// Minimum spacing, in seconds, between successive `check_price_drop` calls
/// for a given asset.
pub const MIN_CHECK_INTERVAL_SECS: u64 = 60 * 60;

/// Number of simultaneously-frozen assets that trips the global freeze.
pub const ASSET_FREEZE_THRESHOLD: u32 = 2;

/// Minimum time a system-wide freeze must stand before `unfreeze_system` may
/// succeed, regardless of individual asset recovery.
pub const MIN_FREEZE_DURATION_SECS: u64 = 24 * 60 * 60;

/// Recovery threshold: an asset is eligible to thaw once its current price
/// is at least this percentage of its preserved `last_observed_price`.
const RECOVERY_PCT: u64 = 90;

#[derive(Debug, Clone, Copy, Default)]
struct AssetFreezeState {
    frozen: bool,
    /// Preserved per Open Question (a): only updated when a check does *not*
    /// trigger a freeze, so a frozen asset's recovery is measured against
    /// the price last observed before the freeze, not any price seen since.
    last_observed_price: U256,
    last_check_time: u64,
}

/// Oracle-driven circuit breaker gating every mutating [`crate::engine::DebtEngine`]
/// operation.
pub struct FreezeController {
    assets: HashMap<AssetId, AssetFreezeState>,
    system_frozen: bool,
    frozen_asset_count: u32,
    freeze_time: u64,
    max_drop_pct: u64,
    check_interval: u64,
}

impl FreezeController {
    /// Construct with admin-supplied parameters. Rejects misconfiguration per
    /// Open Question (d): a `max_drop_pct` of zero would freeze every asset on
    /// its first check, and a value above 50 is meaningless (spec: "≤ 50").
    pub fn new(max_drop_pct: u64, check_interval: u64) -> Result<Self, EngineError> {
        validate_parameters(max_drop_pct, check_interval)?;
        Ok(Self {
            assets: HashMap::new(),
            system_frozen: false,
            frozen_asset_count: 0,
            freeze_time: 0,
            max_drop_pct,
            check_interval,
        })
    }

    pub fn register_asset(&mut self, asset: AssetId) {
        self.assets.entry(asset).or_default();
    }

    pub fn is_asset_frozen(&self, asset: &AssetId) -> bool {
        self.assets.get(asset).map(|s| s.frozen).unwrap_or(false)
    }

    pub fn is_system_frozen(&self) -> bool {
        self.system_frozen
    }

    pub fn frozen_asset_count(&self) -> u32 {
        self.frozen_asset_count
    }

    pub fn max_drop_pct(&self) -> u64 {
        self.max_drop_pct
    }

    pub fn check_interval(&self) -> u64 {
        self.check_interval
    }

    /// Admin-only: replace the drop threshold and check interval.
    pub fn update_parameters(&mut self, max_drop_pct: u64, check_interval: u64) -> Result<(), EngineError> {
        validate_parameters(max_drop_pct, check_interval)?;
        self.max_drop_pct = max_drop_pct;
        self.check_interval = check_interval;
        Ok(())
    }

    /// Sample `asset`'s current oracle price and decide whether to freeze it.
    /// Returns `true` if this call froze the asset.
    pub fn check_price_drop(
        &mut self,
        asset: AssetId,
        oracle: &dyn PriceOracleClient,
        oracle_id: &crate::asset::OracleId,
        now: u64,
        stale_after: u64,
    ) -> Result<bool, EngineError> {
        if self.is_asset_frozen(&asset) {
            return Err(EngineError::AssetFrozen);
        }
        let state = self.assets.entry(asset).or_default();
        if now.saturating_sub(state.last_check_time) < self.check_interval {
            return Err(EngineError::CheckTooSoon);
        }

        let current = fetch_price(oracle, oracle_id, now, stale_after)?;

        if state.last_observed_price.is_zero() {
            state.last_observed_price = current;
            state.last_check_time = now;
            return Ok(false);
        }

        let last = state.last_observed_price;
        // Open Question (b): increases must never underflow; treat as a 0% drop.
        let drop = last.saturating_sub(current);
        let drop_pct = (drop * U256::from(100u64) / last).as_u64();

        if drop_pct >= self.max_drop_pct {
            state.frozen = true;
            self.frozen_asset_count += 1;
            emit(&Event::AssetFrozen {
                asset,
                last_price: last,
                current_price: current,
                drop_pct,
            });
            if self.frozen_asset_count >= ASSET_FREEZE_THRESHOLD && !self.system_frozen {
                self.system_frozen = true;
                self.freeze_time = now;
                emit(&Event::SystemFrozen {
                    frozen_count: self.frozen_asset_count,
                });
            }
            Ok(true)
        } else {
            state.last_observed_price = current;
            state.last_check_time = now;
            Ok(false)
        }
    }

    /// Admin-only: thaw a single frozen asset once its price has recovered to
    /// at least 90% of its preserved baseline.
    pub fn unfreeze_asset(&mut self, asset: AssetId, current_price: U256) -> Result<(), EngineError> {
        let state = self
            .assets
            .get_mut(&asset)
            .ok_or(EngineError::AssetUnsupported)?;
        if !state.frozen {
            return Err(EngineError::AssetNotFrozen);
        }
        let recovered = current_price * U256::from(100u64)
            >= state.last_observed_price * U256::from(RECOVERY_PCT);
        if !recovered {
            return Err(EngineError::PriceDropExceeded);
        }
        state.frozen = false;
        self.frozen_asset_count = self.frozen_asset_count.saturating_sub(1);
        if self.frozen_asset_count == 0 && self.system_frozen {
            self.system_frozen = false;
            emit(&Event::SystemUnfrozen);
        } else {
            tracing::info!(?asset, "asset thawed");
        }
        Ok(())
    }

    /// Admin-only: thaw the whole system. Requires the minimum freeze
    /// duration to have elapsed and every frozen asset to have independently
    /// recovered (caller supplies each frozen asset's current price).
    pub fn unfreeze_system(
        &mut self,
        now: u64,
        current_prices: &HashMap<AssetId, U256>,
    ) -> Result<(), EngineError> {
        if !self.system_frozen {
            return Err(EngineError::SystemFrozen);
        }
        if now < self.freeze_time.saturating_add(MIN_FREEZE_DURATION_SECS) {
            return Err(EngineError::TooEarly);
        }
        for (asset, state) in &self.assets {
            if !state.frozen {
                continue;
            }
            let current = current_prices
                .get(asset)
                .ok_or(EngineError::OracleFault)?;
            let recovered = *current * U256::from(100u64)
                >= state.last_observed_price * U256::from(RECOVERY_PCT);
            if !recovered {
                return Err(EngineError::PriceDropExceeded);
            }
        }
        for state in self.assets.values_mut() {
            state.frozen = false;
        }
        self.frozen_asset_count = 0;
        self.system_frozen = false;
        emit(&Event::SystemUnfrozen);
        Ok(())
    }
}

fn validate_parameters(max_drop_pct: u64, check_interval: u64) -> Result<(), EngineError> {
    if max_drop_pct == 0 || max_drop_pct > MAX_DROP_PCT_UPPER_BOUND {
        return Err(EngineError::BadConfig);
    }
    if check_interval < MIN_CHECK_INTERVAL_SECS {
        return Err(EngineError::BadConfig);
    }
    Ok(())
}
