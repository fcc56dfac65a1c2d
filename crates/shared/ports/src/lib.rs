//! Herald Ports
//!
//! Port definitions (traits) for the Herald simulation.
//! These define the boundaries between the agents, the news board and the
//! exchange, so each side can be swapped for a test double.

mod clock;
mod error;
mod gateway;
mod observer;
mod price;

pub use clock::Clock;
pub use error::{GatewayError, GatewayResult, ReactionError, ReactionResult};
pub use gateway::ExchangeGateway;
pub use observer::{NewsObserver, ObserverId};
pub use price::PriceSource;
