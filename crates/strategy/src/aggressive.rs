//! Aggressive news reaction
//!
//! Buys half the position on good news, dumps 80% at a 10% discount on bad
//! news.

use crate::strategy::{ReactionCoefficients, ReactionPolicy};
use herald_core::{NewsEvent, OrderTicket, Price, Quantity};
use log::debug;

pub struct AggressivePolicy {
    coefficients: ReactionCoefficients,
}

impl AggressivePolicy {
    pub fn new() -> Self {
        Self::with_coefficients(ReactionCoefficients::aggressive())
    }

    pub fn with_coefficients(coefficients: ReactionCoefficients) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &ReactionCoefficients {
        &self.coefficients
    }
}

impl Default for AggressivePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactionPolicy for AggressivePolicy {
    fn name(&self) -> &str {
        "Aggressive"
    }

    fn decide(&self, event: &NewsEvent, position: Quantity, price: Price) -> Option<OrderTicket> {
        let ticket = self
            .coefficients
            .ticket(event.sentiment(), position, price);
        debug!(
            "Aggressive reaction to {} (position {}, price {}): {:?}",
            event, position, price, ticket
        );
        ticket
    }
}
