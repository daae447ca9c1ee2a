//! Shared test doubles for the oracle, collateral tokens, and stablecoin.
//!
//! Mirrors the `setup_test`-style helper the teacher's `borrow_test.rs`
//! builds per test module, generalized into one reusable set of mocks.

use crate::asset::{AccountId, AssetId, CollateralAsset, OracleId, StablecoinAdapter};
use crate::engine::DebtEngine;
use crate::error::EngineError;
use crate::oracle::{PriceOracleClient, PriceQuote};
use primitive_types::U256;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub fn account(byte: u8) -> AccountId {
    AccountId([byte; 20])
}

pub fn asset(byte: u8) -> AssetId {
    AssetId([byte; 20])
}

/// Oracle double: prices are set directly by the test, not computed.
#[derive(Default)]
pub struct MockOracle {
    quotes: RefCell<HashMap<String, PriceQuote>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_price(&self, oracle_id: &OracleId, price: i64, updated_at: u64) {
        self.quotes
            .borrow_mut()
            .insert(oracle_id.0.clone(), PriceQuote { price, updated_at });
    }
}

impl PriceOracleClient for MockOracle {
    fn latest_round(&self, oracle_id: &OracleId) -> Result<PriceQuote, EngineError> {
        self.quotes
            .borrow()
            .get(&oracle_id.0)
            .copied()
            .ok_or(EngineError::NoSuchOracle)
    }
}

/// A collateral token double holding balances in a shared cell, so a test
/// can both drive deposits/redemptions through the engine and independently
/// inspect externally-held balances afterward (needed for asset-conservation
/// assertions — the engine itself never reads this state back).
#[derive(Clone, Default)]
pub struct MockToken {
    balances: Rc<RefCell<HashMap<AccountId, U256>>>,
    /// Total pulled into custody and not yet pushed back out — the
    /// "externally-held balance" P2 checks against the sum of ledger
    /// balances.
    held: Rc<RefCell<U256>>,
    fail_next: Rc<RefCell<bool>>,
}

impl MockToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fund(&self, account: AccountId, amount: U256) {
        *self.balances.borrow_mut().entry(account).or_insert_with(U256::zero) += amount;
    }

    pub fn fail_next_call(&self) {
        *self.fail_next.borrow_mut() = true;
    }

    pub fn held_by_engine(&self) -> U256 {
        *self.held.borrow()
    }

    fn take_failure(&self) -> bool {
        let mut flag = self.fail_next.borrow_mut();
        let was_set = *flag;
        *flag = false;
        was_set
    }
}

impl CollateralAsset for MockToken {
    fn pull(&mut self, from: &AccountId, amount: U256) -> Result<(), EngineError> {
        if self.take_failure() {
            return Err(EngineError::TransferFailed);
        }
        let mut balances = self.balances.borrow_mut();
        let balance = balances.entry(*from).or_insert_with(U256::zero);
        if *balance < amount {
            return Err(EngineError::TransferFailed);
        }
        *balance -= amount;
        *self.held.borrow_mut() += amount;
        Ok(())
    }

    fn push(&mut self, to: &AccountId, amount: U256) -> Result<(), EngineError> {
        if self.take_failure() {
            return Err(EngineError::TransferFailed);
        }
        let mut held = self.held.borrow_mut();
        *held = held.checked_sub(amount).ok_or(EngineError::Overflow)?;
        *self.balances.borrow_mut().entry(*to).or_insert_with(U256::zero) += amount;
        Ok(())
    }

    fn balance_of(&self, account: &AccountId) -> U256 {
        self.balances
            .borrow()
            .get(account)
            .copied()
            .unwrap_or_else(U256::zero)
    }
}

/// Stablecoin double: tracks holder balances and total supply.
#[derive(Clone, Default)]
pub struct MockStablecoin {
    balances: Rc<RefCell<HashMap<AccountId, U256>>>,
    total_supply: Rc<RefCell<U256>>,
}

impl MockStablecoin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &AccountId) -> U256 {
        self.balances
            .borrow()
            .get(account)
            .copied()
            .unwrap_or_else(U256::zero)
    }
}

impl StablecoinAdapter for MockStablecoin {
    fn mint(&mut self, to: &AccountId, amount: U256) -> Result<(), EngineError> {
        *self.balances.borrow_mut().entry(*to).or_insert_with(U256::zero) += amount;
        *self.total_supply.borrow_mut() += amount;
        Ok(())
    }

    fn burn(&mut self, amount: U256) -> Result<(), EngineError> {
        let mut supply = self.total_supply.borrow_mut();
        *supply = supply.checked_sub(amount).ok_or(EngineError::Overflow)?;
        Ok(())
    }

    fn transfer_from(&mut self, from: &AccountId, amount: U256) -> Result<(), EngineError> {
        let mut balances = self.balances.borrow_mut();
        let balance = balances.entry(*from).or_insert_with(U256::zero);
        if *balance < amount {
            return Err(EngineError::TransferFailed);
        }
        *balance -= amount;
        Ok(())
    }

    fn total_supply(&self) -> U256 {
        *self.total_supply.borrow()
    }
}

pub const DEFAULT_MAX_DROP_PCT: u64 = 10;
pub const DEFAULT_CHECK_INTERVAL: u64 = 60 * 60;
pub const DEFAULT_STALE_AFTER: u64 = 60 * 60;

/// `MockOracle` is driven through a shared `Rc` so a test can update prices
/// after handing the engine its own oracle handle.
struct SharedOracle(Rc<MockOracle>);

impl PriceOracleClient for SharedOracle {
    fn latest_round(&self, oracle_id: &OracleId) -> Result<PriceQuote, EngineError> {
        self.0.latest_round(oracle_id)
    }
}

/// Build an engine with one registered collateral asset ("ETH") and an
/// admin of `account(0)`, returning the engine plus handles to its mocks.
pub fn setup_single_asset(
    eth_price_8dec: i64,
) -> (DebtEngine, AssetId, OracleId, Rc<MockOracle>, MockToken, MockStablecoin) {
    let admin = account(0);
    let oracle = Rc::new(MockOracle::new());
    let oracle_id = OracleId::new("eth-usd");
    oracle.set_price(&oracle_id, eth_price_8dec, 0);

    let stablecoin = MockStablecoin::new();
    let mut engine = DebtEngine::new(
        admin,
        Box::new(SharedOracle(oracle.clone())),
        Box::new(stablecoin.clone()),
        DEFAULT_MAX_DROP_PCT,
        DEFAULT_CHECK_INTERVAL,
        DEFAULT_STALE_AFTER,
    )
    .expect("valid freeze parameters");

    let eth = asset(1);
    let token = MockToken::new();
    engine
        .add_asset(&admin, eth, oracle_id.clone(), Box::new(token.clone()))
        .expect("asset registration");

    (engine, eth, oracle_id, oracle, token, stablecoin)
}
