mod accounts;
mod order_log;
mod prices;

pub use accounts::AccountBook;
pub use order_log::OrderLog;
pub use prices::PriceList;
