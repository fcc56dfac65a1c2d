use herald_core::Price;

/// Port for reading the current price of a security
pub trait PriceSource: Send + Sync {
    /// Current price for `ticker`, if one is known
    fn price(&self, ticker: &str) -> Option<Price>;
}
