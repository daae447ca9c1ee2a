//! Advisory events.
//!
//! The teacher's on-chain contracts publish `#[contractevent]` structs
//! (`BorrowEvent`, `DepositEvent`, `WithdrawEvent`, `PauseEvent`); its
//! off-chain `client` crate logs with `tracing`. This engine is shaped like
//! the latter, so events are emitted as structured `tracing` records built
//! from the variants below. Per spec §5, events are advisory only — no
//! invariant depends on them being observed.

use crate::asset::{AccountId, AssetId};
use primitive_types::U256;

/// Every event spec §6 names, emitted after the ledger mutation it describes.
#[derive(Debug, Clone)]
pub enum Event {
    CollateralDeposited {
        user: AccountId,
        asset: AssetId,
        amount: U256,
    },
    CollateralRedeemed {
        from: AccountId,
        to: AccountId,
        asset: AssetId,
        amount: U256,
    },
    AssetFrozen {
        asset: AssetId,
        last_price: U256,
        current_price: U256,
        drop_pct: u64,
    },
    SystemFrozen {
        frozen_count: u32,
    },
    SystemUnfrozen,
}

/// Emit `event` as a structured `tracing` record.
pub fn emit(event: &Event) {
    match event {
        Event::CollateralDeposited { user, asset, amount } => {
            tracing::info!(?user, ?asset, %amount, "collateral deposited");
        }
        Event::CollateralRedeemed { from, to, asset, amount } => {
            tracing::info!(?from, ?to, ?asset, %amount, "collateral redeemed");
        }
        Event::AssetFrozen {
            asset,
            last_price,
            current_price,
            drop_pct,
        } => {
            tracing::warn!(
                ?asset,
                %last_price,
                %current_price,
                drop_pct,
                "asset frozen: oracle-observed price drop exceeded threshold"
            );
        }
        Event::SystemFrozen { frozen_count } => {
            tracing::warn!(frozen_count, "system frozen: too many assets frozen");
        }
        Event::SystemUnfrozen => {
            tracing::info!("system unfrozen");
        }
    }
}
