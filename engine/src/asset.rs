//! Account/asset identity and the external collaborator traits.
//!
//! Per spec §9's design notes: accounts and assets are opaque byte
//! identifiers compared byte-wise with no ordering requirement (modeled here
//! as fixed-width newtypes over byte arrays, not partially constructed), and
//! the engine is polymorphic over two narrow capability sets rather than any
//! inheritance hierarchy: collateral assets expose `{pull, push, balance_of}`,
//! the stablecoin exposes `{mint, burn, transfer_from}`.

use crate::error::EngineError;
use primitive_types::U256;
use std::fmt;

/// Opaque 20-byte account identifier (mirrors the source contract's address
/// type without committing to any particular chain's address format).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub [u8; 20]);

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId(0x")?;
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

/// Opaque 20-byte collateral asset identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub [u8; 20]);

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId(0x")?;
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

/// Identifier binding a [`AssetId`] to a price feed on the
/// [`PriceOracleClient`]. Unlike account/asset ids this is a short, human
/// legible string rather than a fixed-width handle — spec §3 only requires
/// it to be "non-empty" and "listed exactly once".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OracleId(pub String);

impl OracleId {
    pub fn new(id: impl Into<String>) -> Self {
        OracleId(id.into())
    }
}

/// Capability set an exogenous collateral asset must provide. The engine
/// physically holds collateral on behalf of accounts, so `pull` moves tokens
/// from a user into the engine and `push` moves them back out.
pub trait CollateralAsset {
    /// Pull `amount` of this asset from `from` into the engine's custody.
    /// Returns `Ok(())` on success, `Err(EngineError::TransferFailed)` if the
    /// external transfer failed.
    fn pull(&mut self, from: &AccountId, amount: U256) -> Result<(), EngineError>;

    /// Push `amount` of this asset out of the engine's custody to `to`.
    fn push(&mut self, to: &AccountId, amount: U256) -> Result<(), EngineError>;

    /// The asset's externally-held balance for `account` (used by property
    /// tests to check asset conservation; not consulted by the engine's
    /// normal operation path, which tracks balances in the ledger).
    fn balance_of(&self, account: &AccountId) -> U256;
}

/// Capability set the stablecoin token must provide. Only the engine may
/// call `mint`/`burn`; the underlying token is expected to reject calls from
/// any other principal.
pub trait StablecoinAdapter {
    /// Mint `amount` of the stablecoin to `to`.
    fn mint(&mut self, to: &AccountId, amount: U256) -> Result<(), EngineError>;

    /// Burn `amount` of the stablecoin already held by the engine.
    fn burn(&mut self, amount: U256) -> Result<(), EngineError>;

    /// Pull `amount` of the stablecoin from `from` into the engine, ahead of
    /// burning it.
    fn transfer_from(&mut self, from: &AccountId, amount: U256) -> Result<(), EngineError>;

    /// Total stablecoin supply outstanding (used by property tests to check
    /// debt conservation).
    fn total_supply(&self) -> U256;
}
