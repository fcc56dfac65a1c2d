//! Herald Core Domain
//!
//! Pure domain types for the Herald news-reaction simulation.
//! This crate contains no I/O and is 100% unit testable.

pub mod entities;
pub mod error;
pub mod ids;
pub mod instruments;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Accounts
    AccountKind,
    FeePolicy,
    Ledger,
    // News
    NewsEvent,
    Sentiment,
    // Orders
    Order,
    OrderId,
    OrderTicket,
    // Participants
    Participant,
    ParticipantId,
    ParticipantKind,
    PositionBook,
    Side,
};
pub use error::{LedgerError, ParseError};
pub use ids::{IdAllocator, IdContext};
pub use instruments::{Security, SecurityList};
pub use values::{Money, Price, Quantity, Tick, Ticker};
