use serde::{Deserialize, Serialize};

use super::{Participant, Side};
use crate::instruments::Security;
use crate::values::{Price, Quantity, Tick};

/// Unique identifier for an order
pub type OrderId = u64;

/// Order parameters chosen by a reaction policy
///
/// The agent completes a ticket into an [`Order`] by adding its identity,
/// the security and the event time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTicket {
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

impl OrderTicket {
    pub fn bid(price: Price, quantity: Quantity) -> Self {
        Self {
            side: Side::Bid,
            price,
            quantity,
        }
    }

    pub fn ask(price: Price, quantity: Quantity) -> Self {
        Self {
            side: Side::Ask,
            price,
            quantity,
        }
    }
}

/// Full order details, as handed to the exchange gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub trader: Participant,
    pub security: Security,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    /// Tick at which the order was created
    pub time: Tick,
}

impl Order {
    pub fn new(
        id: OrderId,
        trader: Participant,
        security: Security,
        side: Side,
        price: Price,
        quantity: Quantity,
        time: Tick,
    ) -> Self {
        Self {
            id,
            trader,
            security,
            side,
            price,
            quantity,
            time,
        }
    }

    /// Build an order from a policy ticket
    pub fn from_ticket(
        id: OrderId,
        trader: Participant,
        security: Security,
        ticket: OrderTicket,
        time: Tick,
    ) -> Self {
        Self::new(
            id,
            trader,
            security,
            ticket.side,
            ticket.price,
            ticket.quantity,
            time,
        )
    }

    /// Get the ticker as a string slice
    pub fn ticker(&self) -> &str {
        self.security.ticker()
    }

    /// Notional value (price x quantity)
    pub fn notional(&self) -> i64 {
        self.price * self.quantity
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:3}  {}  {:6}  {:6}]",
            self.trader.id(),
            self.security.ticker(),
            self.price,
            self.quantity
        )
    }
}
