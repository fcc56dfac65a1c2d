//! Herald Strategy Framework
//!
//! Reaction policies decide what a trading agent does with a news event:
//! - `ReactionPolicy` trait, injected into agents as a trait object
//! - `ReactionCoefficients` holding the price and size multipliers
//! - Built-in aggressive and conservative policies
//!
//! ## Architecture
//!
//! ```text
//!   NewsEvent ──┐
//!   position ───┼──► ReactionPolicy::decide ──► Option<OrderTicket>
//!   price ──────┘                                      │
//!                                                      ▼
//!                                     agent builds Order, submits to gateway
//! ```
//!
//! Policies are pure: they never see the ledger or the exchange. The
//! position > 0 gate lives in the agent.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use herald_strategy::{AggressivePolicy, ReactionPolicy};
//!
//! let policy = AggressivePolicy::default();
//! let ticket = policy.decide(&event, 10, 100);
//! ```

pub mod aggressive;
pub mod conservative;
pub mod strategy;
pub mod style;

// Re-export main types
pub use aggressive::AggressivePolicy;
pub use conservative::ConservativePolicy;
pub use strategy::{ReactionCoefficients, ReactionPolicy, round_half_up};
pub use style::{ReactionStyle, StyleError, policy_for};
