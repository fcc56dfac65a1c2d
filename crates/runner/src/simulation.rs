//! Simulation - drives agents through simulated time
//!
//! Two delivery modes share one setup:
//! - **Pull**: for each tick from start to horizon, every agent polls the
//!   news board in account order.
//! - **Push**: the board drains its queue and publishes each event to every
//!   subscribed agent in subscription order.
//!
//! With at most one event per tick both modes submit the same orders in the
//! same order. When several events share a tick, polling only ever sees the
//! first of them.

use herald_clock::SimulationClock;
use herald_core::{IdAllocator, IdContext, Money, Order, Participant, Tick};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::agent::TradingAgent;
use crate::bootstrap::{BootstrapError, BootstrapReport, SimulationBootstrap};
use crate::config::{ConfigError, SimulationConfig};
use crate::event_feed::DeliveryReport;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Bootstrap error: {0}")]
    Bootstrap(#[from] BootstrapError),

    #[error("Unknown delivery mode: {0}")]
    UnknownMode(String),
}

/// How events reach agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Agents poll the board every tick
    #[default]
    Pull,
    /// The board publishes to subscribed agents
    Push,
}

impl FromStr for DeliveryMode {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pull") {
            Ok(DeliveryMode::Pull)
        } else if s.eq_ignore_ascii_case("push") {
            Ok(DeliveryMode::Push)
        } else {
            Err(SimulationError::UnknownMode(s.to_string()))
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Pull => f.write_str("pull"),
            DeliveryMode::Push => f.write_str("push"),
        }
    }
}

/// Simulation results
#[derive(Debug, Clone, Default)]
pub struct SimulationResults {
    pub mode: DeliveryMode,
    /// Orders submitted by agents during the run, in submission order
    pub orders: Vec<Order>,
    /// Events seen and per-agent reaction outcomes
    pub delivery: DeliveryReport,
    /// Fees charged after the run (0 unless fee charging is on)
    pub fees_charged: Money,
    /// Final (owner, balance) per account
    pub balances: Vec<(Participant, Money)>,
    /// Events still queued after the horizon
    pub events_remaining: usize,
}

impl SimulationResults {
    pub fn total_orders(&self) -> usize {
        self.orders.len()
    }

    /// Compact `[trader ticker price qty]` rendering of the run's orders
    pub fn summary(&self) -> String {
        self.orders.iter().map(Order::to_string).collect()
    }
}

/// Full news-reaction simulation
pub struct TradingSimulation {
    setup: SimulationBootstrap,
    clock: SimulationClock,
    charge_fees: bool,
}

impl TradingSimulation {
    /// Wrap an already loaded setup; ticks run `start..=horizon`
    pub fn new(setup: SimulationBootstrap, start: Tick, horizon: Tick) -> Self {
        Self {
            setup,
            clock: SimulationClock::new(start, horizon),
            charge_fees: false,
        }
    }

    /// Load every data file named by `config`
    pub fn from_config(
        config: &SimulationConfig,
    ) -> Result<(Self, BootstrapReport), SimulationError> {
        config.validate()?;
        info!("Preparing simulation {:?}", config.name);

        let ids = IdContext {
            participants: IdAllocator::starting_at(config.first_id),
            orders: IdAllocator::starting_at(config.first_id),
        };
        let mut setup = SimulationBootstrap::with_ids(ids);
        let report = setup.load(&config.data)?;

        let mut simulation = Self::new(setup, config.start_tick, config.horizon);
        simulation.charge_fees = config.charge_fees;
        Ok((simulation, report))
    }

    pub fn with_fee_charging(mut self, charge_fees: bool) -> Self {
        self.charge_fees = charge_fees;
        self
    }

    pub fn setup(&self) -> &SimulationBootstrap {
        &self.setup
    }

    pub fn agents(&self) -> &[Arc<TradingAgent>] {
        &self.setup.agents
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn run(&self, mode: DeliveryMode) -> SimulationResults {
        match mode {
            DeliveryMode::Pull => self.run_polling(),
            DeliveryMode::Push => self.run_push(),
        }
    }

    /// Poll every agent at every tick, start to horizon
    ///
    /// A failed reaction is logged and the run continues. Agents that already
    /// polled a tick are skipped and not counted. Events due by the horizon
    /// that polling never saw are discarded afterwards.
    pub fn run_polling(&self) -> SimulationResults {
        info!(
            "Polling {} agents over ticks {}..={}",
            self.agents().len(),
            self.clock.start(),
            self.clock.horizon()
        );
        let first_order = self.setup.exchange.order_count();
        let mut delivery = DeliveryReport::default();

        for tick in self.clock.ticks() {
            let due = self.setup.news.peek_at(tick).is_some();
            if due {
                delivery.events += 1;
            }

            for agent in self.agents() {
                if agent.has_polled(tick) {
                    debug!("[{}] Skipping t={}, already polled", agent.participant(), tick);
                    continue;
                }
                match agent.advance_to(tick) {
                    Ok(_) if due => delivery.deliveries += 1,
                    Ok(_) => {}
                    Err(e) => {
                        warn!("[{}] Reaction failed at t={}: {}", agent.participant(), tick, e);
                        delivery.failures += 1;
                    }
                }
            }
        }

        let unseen = self
            .setup
            .news
            .discard_before(self.clock.horizon().saturating_add(1));
        if unseen > 0 {
            debug!("Discarded {} events polling never reached", unseen);
        }

        self.finish(DeliveryMode::Pull, first_order, delivery)
    }

    /// Publish every event due by the horizon to the subscribed agents
    ///
    /// Events before the start tick are discarded unseen, as polling would.
    pub fn run_push(&self) -> SimulationResults {
        info!(
            "Publishing events over ticks {}..={} to {} subscribers",
            self.clock.start(),
            self.clock.horizon(),
            self.setup.news.subscriber_count()
        );
        let first_order = self.setup.exchange.order_count();

        self.setup.news.discard_before(self.clock.start());
        let delivery = self.setup.news.run_events_through(self.clock.horizon());
        self.clock.advance_to(self.clock.horizon());

        self.finish(DeliveryMode::Push, first_order, delivery)
    }

    fn finish(
        &self,
        mode: DeliveryMode,
        first_order: usize,
        delivery: DeliveryReport,
    ) -> SimulationResults {
        let exchange = &self.setup.exchange;
        let orders: Vec<Order> = exchange.orders().into_iter().skip(first_order).collect();

        let mut fees_charged = 0;
        if self.charge_fees {
            for order in &orders {
                match exchange.charge_fee(order) {
                    Ok(fee) => fees_charged += fee,
                    Err(e) => warn!("No fee charged for order {}: {}", order.id, e),
                }
            }
        }

        let results = SimulationResults {
            mode,
            orders,
            delivery,
            fees_charged,
            balances: exchange.balances(),
            events_remaining: self.setup.news.pending(),
        };

        info!(
            "Simulation complete ({}): {} orders, {} reaction failures, {} events left",
            mode,
            results.total_orders(),
            results.delivery.failures,
            results.events_remaining
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_clock::Clock;
    use herald_core::{Security, Sentiment};

    #[test]
    fn test_delivery_mode_parse() {
        assert_eq!("PULL".parse::<DeliveryMode>().unwrap(), DeliveryMode::Pull);
        assert_eq!("push".parse::<DeliveryMode>().unwrap(), DeliveryMode::Push);
        assert!("both".parse::<DeliveryMode>().is_err());
        assert_eq!(DeliveryMode::Push.to_string(), "push");
    }

    #[test]
    fn test_push_skips_events_before_start() {
        let setup = SimulationBootstrap::new();
        let ibm = Security::new("IBM", "IBM");
        setup.news.announce(1, ibm.clone(), Sentiment::Good);
        setup.news.announce(5, ibm.clone(), Sentiment::Good);
        setup.news.announce(12, ibm, Sentiment::Bad);

        let simulation = TradingSimulation::new(setup, 3, 10);
        let results = simulation.run_push();

        assert_eq!(results.delivery.events, 1);
        assert_eq!(results.events_remaining, 1);
        assert_eq!(simulation.clock().now(), 10);
    }

    #[test]
    fn test_polling_counts_due_ticks() {
        let setup = SimulationBootstrap::new();
        let ibm = Security::new("IBM", "IBM");
        setup.news.announce(0, ibm.clone(), Sentiment::Good);
        setup.news.announce(4, ibm, Sentiment::Bad);

        let results = TradingSimulation::new(setup, 0, 3).run_polling();

        assert_eq!(results.delivery.events, 1);
        assert_eq!(results.events_remaining, 1);
        assert!(results.orders.is_empty());
    }

    #[test]
    fn test_polling_drops_unseen_events_through_horizon() {
        let setup = SimulationBootstrap::new();
        let ibm = Security::new("IBM", "IBM");
        setup.news.announce(3, ibm.clone(), Sentiment::Good);
        setup.news.announce(3, ibm.clone(), Sentiment::Bad);
        setup.news.announce(4, ibm, Sentiment::Bad);

        let simulation = TradingSimulation::new(setup, 0, 3);
        let results = simulation.run_polling();

        assert_eq!(results.delivery.events, 1);
        assert_eq!(results.events_remaining, 1);
        assert_eq!(simulation.run_push().delivery, DeliveryReport::default());
    }
}
