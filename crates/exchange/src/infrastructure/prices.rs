use herald_core::Price;
use std::collections::HashMap;

/// Current price per ticker, seeded from the price file
#[derive(Debug, Clone, Default)]
pub struct PriceList {
    prices: HashMap<String, Price>,
}

impl PriceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price, replacing any previous one
    pub fn set(&mut self, ticker: impl Into<String>, price: Price) {
        self.prices.insert(ticker.into(), price);
    }

    pub fn get(&self, ticker: &str) -> Option<Price> {
        self.prices.get(ticker).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
