//! Collateralized debt engine for an over-collateralized, USD-pegged
//! stablecoin.
//!
//! Host-agnostic core: nothing here binds to a particular ledger runtime.
//! A caller wires in a [`oracle::PriceOracleClient`], an
//! [`asset::StablecoinAdapter`], and one [`asset::CollateralAsset`] per
//! supported collateral, then drives [`engine::DebtEngine`] directly.

pub mod asset;
pub mod burn;
pub mod deposit;
pub mod engine;
pub mod error;
pub mod events;
pub mod fixed_point;
pub mod freeze;
pub mod health;
pub mod ledger;
pub mod liquidate;
pub mod mint;
pub mod oracle;
pub mod redeem;
pub mod views;

pub use asset::{AccountId, AssetId, CollateralAsset, OracleId, StablecoinAdapter};
pub use engine::DebtEngine;
pub use error::EngineError;
pub use oracle::{PriceOracleClient, PriceQuote};
pub use views::UserPosition;

#[cfg(test)]
mod testutil;

#[cfg(test)]
mod deposit_test;
#[cfg(test)]
mod mint_test;
