use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::LedgerError;
use crate::values::Quantity;

/// Holdings per ticker
///
/// A ticker with no entry is held at zero. Quantities are signed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionBook {
    positions: HashMap<String, Quantity>,
}

impl PositionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity held in `ticker` (0 when absent)
    pub fn get(&self, ticker: &str) -> Quantity {
        self.positions.get(ticker).copied().unwrap_or(0)
    }

    /// Whether the book has an entry for `ticker`
    pub fn contains(&self, ticker: &str) -> bool {
        self.positions.contains_key(ticker)
    }

    /// Set the position to `quantity`, creating the entry if needed
    pub fn set(&mut self, ticker: &str, quantity: Quantity) {
        self.positions.insert(ticker.to_string(), quantity);
    }

    /// Add `delta` to the position, creating the entry if needed
    pub fn add(&mut self, ticker: &str, delta: Quantity) {
        *self.positions.entry(ticker.to_string()).or_insert(0) += delta;
    }

    /// Remove `delta` units. Fails without touching the book when the entry
    /// is missing or holds less than `delta`.
    pub fn remove(&mut self, ticker: &str, delta: Quantity) -> Result<(), LedgerError> {
        let Some(held) = self.positions.get_mut(ticker) else {
            return Err(LedgerError::NoPosition {
                ticker: ticker.to_string(),
            });
        };

        if *held < delta {
            return Err(LedgerError::InsufficientPosition {
                ticker: ticker.to_string(),
                held: *held,
                requested: delta,
            });
        }

        *held -= delta;
        Ok(())
    }

    /// Tickers with an entry, sorted for stable output
    pub fn tickers(&self) -> Vec<&str> {
        let mut tickers: Vec<&str> = self.positions.keys().map(String::as_str).collect();
        tickers.sort_unstable();
        tickers
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_ticker_is_zero() {
        let book = PositionBook::new();
        assert_eq!(book.get("MSFT"), 0);
        assert!(!book.contains("MSFT"));
    }

    #[test]
    fn test_set_and_add() {
        let mut book = PositionBook::new();
        book.add("MSFT", 5);
        book.add("MSFT", 3);
        assert_eq!(book.get("MSFT"), 8);

        book.set("MSFT", 2);
        assert_eq!(book.get("MSFT"), 2);

        book.add("AAPL", -4);
        assert_eq!(book.get("AAPL"), -4);
        assert_eq!(book.tickers(), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_remove_missing_entry() {
        let mut book = PositionBook::new();
        let err = book.remove("TICK", 5).unwrap_err();
        assert_eq!(
            err,
            LedgerError::NoPosition {
                ticker: "TICK".to_string()
            }
        );
        assert!(book.is_empty());
    }

    #[test]
    fn test_remove_insufficient() {
        let mut book = PositionBook::new();
        book.set("TICK", 3);

        assert!(matches!(
            book.remove("TICK", 5),
            Err(LedgerError::InsufficientPosition { held: 3, requested: 5, .. })
        ));
        assert_eq!(book.get("TICK"), 3);

        book.remove("TICK", 3).unwrap();
        assert_eq!(book.get("TICK"), 0);
        assert!(book.contains("TICK"));
    }
}
