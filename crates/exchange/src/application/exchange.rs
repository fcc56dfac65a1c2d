use herald_core::{
    AccountKind, Ledger, Money, Order, Participant, ParticipantId, Price, Security, SecurityList,
};
use herald_ports::{ExchangeGateway, GatewayResult, PriceSource};
use log::{debug, info};
use parking_lot::{Mutex, RwLock};

use crate::error::{ExchangeError, Result};
use crate::infrastructure::{AccountBook, OrderLog, PriceList};
use crate::model::SharedLedger;

/// Recording stock exchange
///
/// Accepts orders and files them; it never matches. Prices come from a
/// static list seeded at startup. All methods take `&self` so one
/// `Arc<StockExchange>` serves as gateway and price source for every agent.
#[derive(Debug, Default)]
pub struct StockExchange {
    /// Listed securities
    securities: RwLock<SecurityList>,

    /// Participant ledgers in opening order
    accounts: RwLock<AccountBook>,

    /// Current prices
    prices: RwLock<PriceList>,

    /// Submitted orders
    log: Mutex<OrderLog>,

    /// Fees collected through `charge_fee`
    total_fees: Mutex<Money>,
}

impl StockExchange {
    /// Create an empty exchange
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Securities ============

    /// List a security, replacing the description if already listed
    pub fn list_security(&self, security: Security) {
        debug!("Listing {}", security);
        self.securities.write().add(security);
    }

    pub fn security(&self, ticker: &str) -> Option<Security> {
        self.securities.read().get(ticker).cloned()
    }

    pub fn is_listed(&self, ticker: &str) -> bool {
        self.securities.read().contains(ticker)
    }

    pub fn securities(&self) -> Vec<Security> {
        self.securities.read().iter().cloned().collect()
    }

    // ============ Account Management ============

    /// Open an account for `owner`, with the fee policy of `kind`
    pub fn open_account(
        &self,
        owner: Participant,
        initial_balance: Money,
        kind: AccountKind,
    ) -> Result<SharedLedger> {
        info!(
            "Opening {:?} account for {} with balance {}",
            kind, owner, initial_balance
        );
        self.accounts
            .write()
            .open(Ledger::new(owner, initial_balance, kind.fee_policy()))
    }

    pub fn ledger(&self, id: ParticipantId) -> Option<SharedLedger> {
        self.accounts.read().get(id)
    }

    pub fn ledger_by_name(&self, title: &str) -> Option<SharedLedger> {
        self.accounts.read().find_by_name(title)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.read().len()
    }

    /// (owner, balance) for every account, in opening order
    pub fn balances(&self) -> Vec<(Participant, Money)> {
        self.accounts.read().balances()
    }

    // ============ Prices ============

    pub fn set_price(&self, ticker: impl Into<String>, price: Price) {
        self.prices.write().set(ticker, price);
    }

    pub fn price_count(&self) -> usize {
        self.prices.read().len()
    }

    // ============ Fee Management ============

    /// Charge the trader's fee for `order` to its ledger
    ///
    /// Returns the fee charged. The balance may go negative.
    pub fn charge_fee(&self, order: &Order) -> Result<Money> {
        let ledger = self
            .ledger(order.trader.id())
            .ok_or(ExchangeError::AccountNotFound(order.trader.id()))?;

        let fee = ledger.write().apply_fee(order);
        *self.total_fees.lock() += fee;
        Ok(fee)
    }

    pub fn total_fees(&self) -> Money {
        *self.total_fees.lock()
    }

    // ============ Order Log ============

    /// Snapshot of every submitted order, in arrival order
    pub fn orders(&self) -> Vec<Order> {
        self.log.lock().orders().to_vec()
    }

    pub fn bids(&self) -> Vec<Order> {
        self.log.lock().bids().to_vec()
    }

    pub fn asks(&self) -> Vec<Order> {
        self.log.lock().asks().to_vec()
    }

    pub fn order_count(&self) -> usize {
        self.log.lock().len()
    }

    /// Compact log `[trader ticker price qty]...` used to compare runs
    pub fn order_summary(&self) -> String {
        self.log.lock().summary()
    }
}

impl ExchangeGateway for StockExchange {
    fn submit_order(&self, order: Order) -> GatewayResult<()> {
        if !self.is_listed(order.ticker()) {
            return Err(ExchangeError::SymbolNotFound(order.ticker().to_string()).into());
        }

        info!(
            "Submitting order: id={}, trader={}, symbol={}, side={}, price={}, qty={}, t={}",
            order.id,
            order.trader.id(),
            order.ticker(),
            order.side,
            order.price,
            order.quantity,
            order.time
        );

        self.log.lock().record(order);
        Ok(())
    }
}

impl PriceSource for StockExchange {
    fn price(&self, ticker: &str) -> Option<Price> {
        self.prices.read().get(ticker)
    }
}
