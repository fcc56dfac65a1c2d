//! Herald Runner - news-driven trading simulation
//!
//! Orchestrates the simulation:
//!
//! - **Event Feed**: the news board (event queue + observer registry)
//! - **Agent**: trading agents reacting to news through a policy
//! - **Bootstrap**: exchange and agent setup from CSV data files
//! - **Simulation**: pull or push delivery over a tick range
//! - **Config**: JSON run configuration
//!
//! ## Architecture
//!
//! ```text
//!                    ┌─────────────────┐
//!                    │   News Board    │
//!                    │ (queue + subs)  │
//!                    └───┬─────────┬───┘
//!          peek_at(t)    │         │   publish(event)
//!          (pull)        ▼         ▼   (push)
//! ┌──────────────────────────────────────────────────┐
//! │                 TRADING AGENTS                   │
//! │                                                  │
//! │   position > 0 ? ──► ReactionPolicy::decide      │
//! │                            │ OrderTicket         │
//! └────────────────────────────┼─────────────────────┘
//!                              │ Order
//!                              ▼
//!                  ┌───────────────────────┐
//!                  │     StockExchange     │
//!                  │ (log, ledgers, prices)│
//!                  └───────────────────────┘
//! ```

pub mod agent;
pub mod bootstrap;
pub mod config;
pub mod event_feed;
pub mod simulation;

// Re-export main types
pub use agent::{AgentError, AgentFactory, TradingAgent};
pub use bootstrap::{BootstrapError, BootstrapReport, SimulationBootstrap};
pub use config::{ConfigError, DataFiles, SimulationConfig};
pub use event_feed::{DeliveryReport, EventRow, LoadReport, NewsBoard};
pub use simulation::{DeliveryMode, SimulationError, SimulationResults, TradingSimulation};
