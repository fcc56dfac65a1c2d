mod exchange;

pub use exchange::StockExchange;
