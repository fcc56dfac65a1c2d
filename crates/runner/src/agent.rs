//! Trading Agent - reacts to news on behalf of one participant
//!
//! Each agent wraps a reaction policy and handles:
//! - Polling the news board as the clock advances (pull)
//! - Receiving published events as a board observer (push)
//! - Gating reactions on its current position
//! - Turning policy tickets into orders on the exchange gateway
//!
//! Both delivery paths go through the same [`TradingAgent::react`], so the
//! orders an agent submits depend only on the events it sees.

use herald_core::{IdContext, NewsEvent, Order, Participant, ParticipantKind, Tick};
use herald_exchange::SharedLedger;
use herald_ports::{
    ExchangeGateway, NewsObserver, ObserverId, PriceSource, ReactionError, ReactionResult,
};
use herald_strategy::{ReactionPolicy, ReactionStyle};
use log::{debug, info, trace};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use thiserror::Error;

use crate::event_feed::NewsBoard;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("Unknown participant kind: {0}")]
    UnknownKind(String),

    #[error("Unknown reaction style: {0}")]
    UnknownStyle(String),

    #[error("Agent kind {requested:?} does not match participant kind {actual:?}")]
    KindMismatch {
        requested: ParticipantKind,
        actual: ParticipantKind,
    },
}

/// A participant's automated trader
pub struct TradingAgent {
    participant: Participant,
    ledger: SharedLedger,
    gateway: Arc<dyn ExchangeGateway>,
    prices: Arc<dyn PriceSource>,
    news: Arc<NewsBoard>,
    policy: RwLock<Arc<dyn ReactionPolicy>>,
    ids: Arc<IdContext>,
    /// Last tick seen through `advance_to`
    last_polled: Mutex<Option<Tick>>,
}

impl TradingAgent {
    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub fn id(&self) -> ObserverId {
        self.participant.id()
    }

    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    pub fn policy_name(&self) -> String {
        self.policy.read().name().to_string()
    }

    /// Swap the reaction policy; takes effect from the next event
    pub fn set_policy(&self, policy: Arc<dyn ReactionPolicy>) {
        info!(
            "[{}] Policy {} -> {}",
            self.participant,
            self.policy_name(),
            policy.name()
        );
        *self.policy.write() = policy;
    }

    /// Stop receiving published events
    pub fn detach(&self) -> bool {
        self.news.unsubscribe(self.id())
    }

    /// Whether `time` is not later than the last tick polled
    pub fn has_polled(&self, time: Tick) -> bool {
        self.last_polled.lock().is_some_and(|previous| time <= previous)
    }

    /// Pull delivery: check the board for an event due at `time`
    ///
    /// Each tick is handled at most once; polling a tick that is not later
    /// than the last one polled does nothing. Returns the submitted order,
    /// if any.
    pub fn advance_to(&self, time: Tick) -> ReactionResult<Option<Order>> {
        {
            let mut last = self.last_polled.lock();
            if let Some(previous) = (*last).filter(|&previous| time <= previous) {
                debug!(
                    "[{}] Already polled t={}, ignoring t={}",
                    self.participant, previous, time
                );
                return Ok(None);
            }
            *last = Some(time);
        }

        match self.news.peek_at(time) {
            Some(event) => self.react(&event),
            None => Ok(None),
        }
    }

    /// Shared reaction path for both delivery modes
    ///
    /// Only a positive holding in the event's security triggers the policy.
    pub fn react(&self, event: &NewsEvent) -> ReactionResult<Option<Order>> {
        let ticker = event.ticker();
        let position = self.ledger.read().position(ticker);
        if position <= 0 {
            trace!(
                "[{}] No holding in {}, ignoring {}",
                self.participant, ticker, event
            );
            return Ok(None);
        }

        let price = self
            .prices
            .price(ticker)
            .ok_or_else(|| ReactionError::PriceUnavailable(ticker.to_string()))?;

        let policy = self.policy.read().clone();
        let Some(ticket) = policy.decide(event, position, price) else {
            debug!("[{}] {} declined {}", self.participant, policy.name(), event);
            return Ok(None);
        };

        let order = Order::from_ticket(
            self.ids.orders.next_id(),
            self.participant.clone(),
            event.security().clone(),
            ticket,
            event.time(),
        );
        debug!(
            "[{}] {} reacts to {} with order {}: {} {} @ {}",
            self.participant,
            policy.name(),
            event,
            order.id,
            order.side,
            order.quantity,
            order.price
        );

        self.gateway.submit_order(order.clone())?;
        Ok(Some(order))
    }
}

impl NewsObserver for TradingAgent {
    fn observer_id(&self) -> ObserverId {
        self.id()
    }

    fn on_event(&self, event: &NewsEvent) -> ReactionResult<()> {
        self.react(event).map(|_| ())
    }
}

impl std::fmt::Debug for TradingAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingAgent")
            .field("participant", &self.participant)
            .field("policy", &self.policy_name())
            .field("last_polled", &*self.last_polled.lock())
            .finish()
    }
}

/// Builds agents wired to one exchange, one news board and one id context
#[derive(Clone)]
pub struct AgentFactory {
    gateway: Arc<dyn ExchangeGateway>,
    prices: Arc<dyn PriceSource>,
    news: Arc<NewsBoard>,
    ids: Arc<IdContext>,
}

impl AgentFactory {
    pub fn new(
        gateway: Arc<dyn ExchangeGateway>,
        prices: Arc<dyn PriceSource>,
        news: Arc<NewsBoard>,
        ids: Arc<IdContext>,
    ) -> Self {
        Self {
            gateway,
            prices,
            news,
            ids,
        }
    }

    pub fn news(&self) -> &Arc<NewsBoard> {
        &self.news
    }

    pub fn ids(&self) -> &Arc<IdContext> {
        &self.ids
    }

    /// Build an agent with `policy` and subscribe it to the news board
    pub fn build(
        &self,
        ledger: SharedLedger,
        policy: Arc<dyn ReactionPolicy>,
    ) -> Arc<TradingAgent> {
        let participant = ledger.read().owner().clone();
        let agent = Arc::new(TradingAgent {
            participant,
            ledger,
            gateway: self.gateway.clone(),
            prices: self.prices.clone(),
            news: self.news.clone(),
            policy: RwLock::new(policy),
            ids: self.ids.clone(),
            last_polled: Mutex::new(None),
        });

        self.news.subscribe(&agent);
        debug!(
            "Created {} agent for {}",
            agent.policy_name(),
            agent.participant
        );
        agent
    }

    /// Build an agent with one of the built-in styles
    pub fn spawn(&self, ledger: SharedLedger, style: ReactionStyle) -> Arc<TradingAgent> {
        self.build(ledger, style.policy())
    }

    /// Build an agent from textual kind and style
    ///
    /// Both names are matched case-insensitively; unknown names are
    /// rejected, as is a kind that differs from the ledger owner's.
    pub fn create(
        &self,
        kind: &str,
        style: &str,
        ledger: SharedLedger,
    ) -> Result<Arc<TradingAgent>, AgentError> {
        let requested: ParticipantKind = kind
            .parse()
            .map_err(|_| AgentError::UnknownKind(kind.to_string()))?;
        let style: ReactionStyle = style
            .parse()
            .map_err(|_| AgentError::UnknownStyle(style.to_string()))?;

        let actual = ledger.read().owner().kind();
        if requested != actual {
            return Err(AgentError::KindMismatch { requested, actual });
        }

        Ok(self.spawn(ledger, style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::{AccountKind, Security, Sentiment, Side};
    use herald_exchange::StockExchange;

    struct Fixture {
        exchange: Arc<StockExchange>,
        factory: AgentFactory,
    }

    fn fixture() -> Fixture {
        let exchange = Arc::new(StockExchange::new());
        exchange.list_security(Security::new("IBM", "International Business Machines"));
        exchange.set_price("IBM", 100);

        let factory = AgentFactory::new(
            exchange.clone(),
            exchange.clone(),
            Arc::new(NewsBoard::new()),
            Arc::new(IdContext::new()),
        );
        Fixture { exchange, factory }
    }

    fn ledger(fx: &Fixture, kind: ParticipantKind, position: i64) -> SharedLedger {
        let participant = Participant::allocate(&fx.factory.ids().participants, "Trader", kind);
        let ledger = fx
            .exchange
            .open_account(participant, 10_000, AccountKind::Basic)
            .unwrap();
        ledger.write().set_position("IBM", position);
        ledger
    }

    fn ibm() -> Security {
        Security::new("IBM", "International Business Machines")
    }

    #[test]
    fn test_no_holding_no_order() {
        let fx = fixture();
        let flat = fx.factory.spawn(
            ledger(&fx, ParticipantKind::Retail, 0),
            ReactionStyle::Aggressive,
        );
        let short = fx.factory.spawn(
            ledger(&fx, ParticipantKind::Retail, -5),
            ReactionStyle::Aggressive,
        );

        let event = NewsEvent::new(0, ibm(), Sentiment::Good);
        assert_eq!(flat.react(&event), Ok(None));
        assert_eq!(short.react(&event), Ok(None));
        assert_eq!(fx.exchange.order_count(), 0);
        assert_eq!(fx.factory.ids().orders.issued(), 0);
    }

    #[test]
    fn test_reaction_submits_order() {
        let fx = fixture();
        let agent = fx.factory.spawn(
            ledger(&fx, ParticipantKind::Retail, 10),
            ReactionStyle::Aggressive,
        );

        let order = agent
            .react(&NewsEvent::new(4, ibm(), Sentiment::Bad))
            .unwrap()
            .unwrap();

        assert_eq!(order.id, 1);
        assert_eq!(order.side, Side::Ask);
        assert_eq!((order.price, order.quantity, order.time), (90, 8, 4));
        assert_eq!(fx.exchange.orders(), vec![order]);
    }

    #[test]
    fn test_missing_price_is_an_error() {
        let fx = fixture();
        fx.exchange.list_security(Security::new("AAPL", "Apple Inc."));
        let ledger = ledger(&fx, ParticipantKind::Retail, 0);
        ledger.write().set_position("AAPL", 10);
        let agent = fx.factory.spawn(ledger, ReactionStyle::Aggressive);

        let aapl = Security::new("AAPL", "Apple Inc.");
        let result = agent.react(&NewsEvent::new(0, aapl, Sentiment::Good));

        assert_eq!(
            result,
            Err(ReactionError::PriceUnavailable("AAPL".to_string()))
        );
        assert_eq!(fx.exchange.order_count(), 0);
    }

    #[test]
    fn test_poll_each_tick_once() {
        let fx = fixture();
        let agent = fx.factory.spawn(
            ledger(&fx, ParticipantKind::Retail, 10),
            ReactionStyle::Conservative,
        );
        fx.factory.news().announce(3, ibm(), Sentiment::Good);

        assert!(!agent.has_polled(0));
        assert_eq!(agent.advance_to(2), Ok(None));
        assert!(agent.has_polled(2));
        assert!(!agent.has_polled(3));
        assert!(agent.advance_to(3).unwrap().is_some());
        assert_eq!(agent.advance_to(3), Ok(None));
        assert_eq!(agent.advance_to(1), Ok(None));
        assert!(agent.has_polled(1));
        assert_eq!(fx.exchange.order_count(), 1);
    }

    #[test]
    fn test_set_policy_takes_effect() {
        let fx = fixture();
        let agent = fx.factory.spawn(
            ledger(&fx, ParticipantKind::Retail, 10),
            ReactionStyle::Aggressive,
        );
        agent.set_policy(ReactionStyle::Conservative.policy());

        let order = agent
            .react(&NewsEvent::new(0, ibm(), Sentiment::Good))
            .unwrap()
            .unwrap();

        assert_eq!(agent.policy_name(), "Conservative");
        assert_eq!(order.quantity, 2);
    }

    #[test]
    fn test_factory_is_strict() {
        let fx = fixture();

        let agent = fx
            .factory
            .create(
                "institutional",
                "CONSERVATIVE",
                ledger(&fx, ParticipantKind::Institutional, 1),
            )
            .unwrap();
        assert_eq!(agent.policy_name(), "Conservative");
        assert!(fx.factory.news().is_subscribed(agent.id()));

        assert_eq!(
            fx.factory
                .create("Hedge", "Aggressive", ledger(&fx, ParticipantKind::Retail, 1))
                .unwrap_err(),
            AgentError::UnknownKind("Hedge".to_string())
        );
        assert_eq!(
            fx.factory
                .create("Retail", "Cautious", ledger(&fx, ParticipantKind::Retail, 1))
                .unwrap_err(),
            AgentError::UnknownStyle("Cautious".to_string())
        );
        assert!(matches!(
            fx.factory.create(
                "Retail",
                "Aggressive",
                ledger(&fx, ParticipantKind::Institutional, 1)
            ),
            Err(AgentError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_detach_stops_push_delivery() {
        let fx = fixture();
        let agent = fx.factory.spawn(
            ledger(&fx, ParticipantKind::Retail, 10),
            ReactionStyle::Aggressive,
        );
        assert!(agent.detach());

        fx.factory.news().announce(0, ibm(), Sentiment::Good);
        fx.factory.news().run_events();

        assert_eq!(fx.exchange.order_count(), 0);
    }
}
