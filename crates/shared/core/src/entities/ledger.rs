use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{FeePolicy, Order, Participant, PositionBook};
use crate::error::LedgerError;
use crate::values::{Money, Quantity};

/// A participant's exchange account: money balance plus holdings
///
/// Balance rules are deliberately asymmetric:
/// - [`debit`](Self::debit) never overdraws; an insufficient balance is a
///   silent no-op.
/// - [`apply_fee`](Self::apply_fee) always charges, even into the negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    owner: Participant,
    balance: Money,
    positions: PositionBook,
    fee_policy: FeePolicy,
}

impl Ledger {
    /// Open a ledger for `owner` with an initial balance
    pub fn new(owner: Participant, initial_balance: Money, fee_policy: FeePolicy) -> Self {
        Self {
            owner,
            balance: initial_balance,
            positions: PositionBook::new(),
            fee_policy,
        }
    }

    pub fn owner(&self) -> &Participant {
        &self.owner
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn fee_policy(&self) -> FeePolicy {
        self.fee_policy
    }

    pub fn positions(&self) -> &PositionBook {
        &self.positions
    }

    /// Add `amount` to the balance. Any sign is accepted.
    pub fn credit(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// Withdraw `amount` if the balance covers it.
    ///
    /// Returns whether the withdrawal happened.
    pub fn debit(&mut self, amount: Money) -> bool {
        if self.balance >= amount {
            self.balance -= amount;
            true
        } else {
            false
        }
    }

    /// Fee this ledger's policy charges for a trade of `quantity` units
    pub fn fee_for(&self, quantity: Quantity) -> Money {
        self.fee_policy.fee(quantity)
    }

    /// Charge the fee for `order`. Unguarded: may leave the balance negative.
    ///
    /// Returns the fee charged.
    pub fn apply_fee(&mut self, order: &Order) -> Money {
        let fee = self.fee_for(order.quantity);
        self.balance -= fee;
        debug!(
            "Charged fee {} to {} for order {} (balance {})",
            fee, self.owner, order.id, self.balance
        );
        fee
    }

    /// Quantity held in `ticker` (0 when absent)
    pub fn position(&self, ticker: &str) -> Quantity {
        self.positions.get(ticker)
    }

    pub fn set_position(&mut self, ticker: &str, quantity: Quantity) {
        self.positions.set(ticker, quantity);
    }

    pub fn add_position(&mut self, ticker: &str, delta: Quantity) {
        self.positions.add(ticker, delta);
    }

    /// Deduct `delta` units from `ticker`.
    ///
    /// A missing entry or an insufficient quantity is logged and returned;
    /// the positions are left unchanged in both cases.
    pub fn remove_position(&mut self, ticker: &str, delta: Quantity) -> Result<(), LedgerError> {
        self.positions.remove(ticker, delta).inspect_err(|e| {
            warn!("Ledger of {}: cannot deduct {} {}: {}", self.owner, delta, ticker, e);
        })
    }
}
