//! External price oracle abstraction.
//!
//! Mirrors `contracts/lending/src/views.rs::get_asset_price` — a narrow,
//! read-only external call whose result the engine must not trust beyond the
//! staleness and sign guarantees spec §4.1 documents.

use crate::asset::OracleId;
use crate::error::EngineError;
use primitive_types::U256;

/// A single price observation as reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    /// Price, 8 decimals. May be negative on a faulty feed — callers must
    /// reject negative prices rather than casting them unchecked.
    pub price: i64,
    /// Host clock time the quote was last updated.
    pub updated_at: u64,
}

/// Per-asset USD price source. Named `latest_round` per spec §9's design
/// note (spec §4.1 calls the same capability `latest_price` in prose; both
/// names refer to the same single-method capability).
pub trait PriceOracleClient {
    /// Fetch the most recent quote for `oracle_id`.
    ///
    /// # Errors
    /// * [`EngineError::NoSuchOracle`] if `oracle_id` is unknown.
    /// * [`EngineError::OracleFault`] on any downstream failure.
    fn latest_round(&self, oracle_id: &OracleId) -> Result<PriceQuote, EngineError>;
}

/// Fetch and validate a price: checks staleness against `stale_after` and
/// rejects non-positive prices, lifting the result into a [`U256`].
///
/// This is the only place a raw oracle quote is turned into a value the rest
/// of the engine operates on, so every consumer (ledger valuation, freeze
/// controller, liquidation) goes through it.
pub fn fetch_price(
    oracle: &dyn PriceOracleClient,
    oracle_id: &OracleId,
    now: u64,
    stale_after: u64,
) -> Result<U256, EngineError> {
    let quote = oracle.latest_round(oracle_id)?;
    if now.saturating_sub(quote.updated_at) > stale_after {
        return Err(EngineError::OracleStale);
    }
    if quote.price <= 0 {
        return Err(EngineError::OracleFault);
    }
    Ok(U256::from(quote.price as u64))
}
