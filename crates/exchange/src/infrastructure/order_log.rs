use herald_core::{Order, Side};

/// Everything submitted to the exchange, in arrival order
///
/// Orders are also filed into a bid half and an ask half. Nothing is ever
/// matched or removed.
#[derive(Debug, Clone, Default)]
pub struct OrderLog {
    submitted: Vec<Order>,
    bids: Vec<Order>,
    asks: Vec<Order>,
}

impl OrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, order: Order) {
        match order.side {
            Side::Bid => self.bids.push(order.clone()),
            Side::Ask => self.asks.push(order.clone()),
        }
        self.submitted.push(order);
    }

    pub fn orders(&self) -> &[Order] {
        &self.submitted
    }

    pub fn bids(&self) -> &[Order] {
        &self.bids
    }

    pub fn asks(&self) -> &[Order] {
        &self.asks
    }

    pub fn len(&self) -> usize {
        self.submitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submitted.is_empty()
    }

    /// Compact rendering of the whole log, one bracketed entry per order
    pub fn summary(&self) -> String {
        self.submitted.iter().map(Order::to_string).collect()
    }
}
