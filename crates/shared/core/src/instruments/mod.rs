//! Securities traded on the exchange
//!
//! A security is identified by its ticker. The [`SecurityList`] is the
//! registry every ticker reference (events, positions, prices, orders) is
//! resolved against.

mod security;

pub use security::{Security, SecurityList};
