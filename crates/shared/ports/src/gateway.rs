use herald_core::Order;

use crate::error::GatewayResult;

/// Port for submitting orders to an exchange
///
/// Implementations take `&self`: agents share one gateway and the
/// implementation owns its own locking.
pub trait ExchangeGateway: Send + Sync {
    /// Hand an order to the exchange
    fn submit_order(&self, order: Order) -> GatewayResult<()>;
}
