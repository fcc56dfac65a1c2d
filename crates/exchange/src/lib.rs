// Application layer
pub mod application;

// Infrastructure layer
pub mod infrastructure;

// Cross-cutting concerns
pub mod error;
pub mod model;

// Re-export main types for convenience
pub use application::StockExchange;
pub use error::{ExchangeError, Result};
pub use infrastructure::{AccountBook, OrderLog, PriceList};
pub use model::SharedLedger;
