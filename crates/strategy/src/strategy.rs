//! Reaction Policy Trait
//!
//! Defines the interface between a trading agent and the rule that turns a
//! news event into order parameters.

use herald_core::{NewsEvent, OrderTicket, Price, Quantity, Sentiment};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Multipliers applied to the current price and position
///
/// Good news buys (bid) at `price x good_price` for `position x good_size`;
/// bad news sells (ask) at `price x bad_price` for `position x bad_size`.
/// Both products are rounded half-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCoefficients {
    pub good_price: Decimal,
    pub good_size: Decimal,
    pub bad_price: Decimal,
    pub bad_size: Decimal,
}

impl ReactionCoefficients {
    pub fn aggressive() -> Self {
        Self {
            good_price: dec!(1.05),
            good_size: dec!(0.5),
            bad_price: dec!(0.90),
            bad_size: dec!(0.8),
        }
    }

    pub fn conservative() -> Self {
        Self {
            good_price: dec!(1.05),
            good_size: dec!(0.2),
            bad_price: dec!(0.95),
            bad_size: dec!(0.2),
        }
    }

    /// Order parameters for `sentiment` at the given position and price
    ///
    /// Returns `None` only if a rounded value does not fit an `i64`.
    pub fn ticket(
        &self,
        sentiment: Sentiment,
        position: Quantity,
        price: Price,
    ) -> Option<OrderTicket> {
        let (price_factor, size_factor) = match sentiment {
            Sentiment::Good => (self.good_price, self.good_size),
            Sentiment::Bad => (self.bad_price, self.bad_size),
        };

        let order_price = round_half_up(Decimal::from(price) * price_factor)?;
        let quantity = round_half_up(Decimal::from(position) * size_factor)?;

        Some(match sentiment {
            Sentiment::Good => OrderTicket::bid(order_price, quantity),
            Sentiment::Bad => OrderTicket::ask(order_price, quantity),
        })
    }
}

/// Round to the nearest integer, halves towards positive infinity
///
/// `floor(x + 0.5)`: 2.5 -> 3, -2.5 -> -2.
pub fn round_half_up(value: Decimal) -> Option<i64> {
    (value + dec!(0.5)).floor().to_i64()
}

/// Reaction policy trait - implement this to change how agents trade news
///
/// Policies are stateless with respect to the simulation: the same inputs
/// always give the same ticket.
pub trait ReactionPolicy: Send + Sync {
    /// Policy name for logging
    fn name(&self) -> &str;

    /// Order to place in response to `event`, if any
    ///
    /// `position` is the agent's holding in the event's security and `price`
    /// its current price. The caller has already checked `position > 0`.
    fn decide(&self, event: &NewsEvent, position: Quantity, price: Price) -> Option<OrderTicket>;
}
