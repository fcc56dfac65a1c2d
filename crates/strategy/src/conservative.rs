//! Conservative news reaction: trades a fifth of the position either way.

use crate::strategy::{ReactionCoefficients, ReactionPolicy};
use herald_core::{NewsEvent, OrderTicket, Price, Quantity};
use log::debug;

pub struct ConservativePolicy {
    coefficients: ReactionCoefficients,
}

impl ConservativePolicy {
    pub fn new() -> Self {
        Self::with_coefficients(ReactionCoefficients::conservative())
    }

    pub fn with_coefficients(coefficients: ReactionCoefficients) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &ReactionCoefficients {
        &self.coefficients
    }
}

impl Default for ConservativePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactionPolicy for ConservativePolicy {
    fn name(&self) -> &str {
        "Conservative"
    }

    fn decide(&self, event: &NewsEvent, position: Quantity, price: Price) -> Option<OrderTicket> {
        let ticket = self
            .coefficients
            .ticket(event.sentiment(), position, price);
        debug!(
            "Conservative reaction to {} (position {}, price {}): {:?}",
            event, position, price, ticket
        );
        ticket
    }
}
