// Re-export domain types from herald-core used across the exchange
pub use herald_core::{
    AccountKind, FeePolicy, Ledger, Money, Order, Participant, ParticipantId, Price, Security,
    SecurityList, Side,
};

use parking_lot::RwLock;
use std::sync::Arc;

/// Ledger handle shared between the exchange and the owning agent
///
/// The exchange charges fees through it, the agent reads positions through
/// it; both see the same state.
pub type SharedLedger = Arc<RwLock<Ledger>>;
