//! Event Feed - the news board agents read from
//!
//! Holds every pending news event in a min-queue ordered by
//! `(time, insertion seq)` and a registry of subscribed observers.
//! Events reach agents two ways:
//!
//! - **Pull**: each agent polls [`NewsBoard::peek_at`] as the clock advances.
//! - **Push**: [`NewsBoard::run_events`] drains the queue and publishes each
//!   event to every subscriber before moving to the next.
//!
//! Observers are held weakly: an agent owns an `Arc<NewsBoard>`, so a strong
//! handle back would leak both.

use herald_core::{NewsEvent, Security, SecurityList, Sentiment, Tick};
use herald_ports::{NewsObserver, ObserverId};
use log::{debug, trace, warn};
use parking_lot::{Mutex, RwLock};
use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::sync::{Arc, Weak};

/// Raw event row as read from a news file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub time: Tick,
    pub ticker: String,
    pub sentiment: String,
}

impl EventRow {
    pub fn new(time: Tick, ticker: impl Into<String>, sentiment: impl Into<String>) -> Self {
        Self {
            time,
            ticker: ticker.into(),
            sentiment: sentiment.into(),
        }
    }
}

/// Outcome of a bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

impl LoadReport {
    pub fn total(&self) -> usize {
        self.loaded + self.skipped
    }
}

/// Outcome of publishing one or more events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Events published
    pub events: usize,
    /// Successful `on_event` calls
    pub deliveries: usize,
    /// `on_event` calls that returned an error
    pub failures: usize,
}

impl DeliveryReport {
    fn absorb(&mut self, other: DeliveryReport) {
        self.events += other.events;
        self.deliveries += other.deliveries;
        self.failures += other.failures;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueuedEvent {
    seq: u64,
    event: NewsEvent,
}

/// Min-queue on `(time, seq)`
#[derive(Default)]
struct EventQueue {
    heap: PriorityQueue<QueuedEvent, Reverse<(Tick, u64)>>,
    next_seq: u64,
}

impl EventQueue {
    fn push(&mut self, event: NewsEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let priority = Reverse((event.time(), seq));
        self.heap.push(QueuedEvent { seq, event }, priority);
    }

    fn head(&self) -> Option<&NewsEvent> {
        self.heap.peek().map(|(item, _)| &item.event)
    }

    fn head_time(&self) -> Option<Tick> {
        self.head().map(NewsEvent::time)
    }

    fn pop(&mut self) -> Option<NewsEvent> {
        self.heap.pop().map(|(item, _)| item.event)
    }

    /// Drop every event earlier than `time`, returning how many went
    fn discard_before(&mut self, time: Tick) -> usize {
        let mut discarded = 0;
        while self.head_time().is_some_and(|t| t < time) {
            if let Some(event) = self.pop() {
                trace!("Discarding stale event {}", event);
                discarded += 1;
            }
        }
        discarded
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

struct Subscription {
    id: ObserverId,
    observer: Weak<dyn NewsObserver>,
}

/// Event source and observer registry
#[derive(Default)]
pub struct NewsBoard {
    queue: Mutex<EventQueue>,
    subscribers: RwLock<Vec<Subscription>>,
}

impl NewsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Loading ============

    /// Validate and enqueue raw event rows
    ///
    /// A row is skipped (and logged) when its sentiment is not exactly
    /// `Good` or `Bad`, or when its ticker is not in `securities`.
    pub fn load<I>(&self, rows: I, securities: &SecurityList) -> LoadReport
    where
        I: IntoIterator<Item = EventRow>,
    {
        let mut report = LoadReport::default();

        for row in rows {
            match Self::resolve(&row, securities) {
                Some(event) => {
                    self.push_event(event);
                    report.loaded += 1;
                }
                None => report.skipped += 1,
            }
        }

        debug!(
            "Loaded {} news events ({} skipped)",
            report.loaded, report.skipped
        );
        report
    }

    fn resolve(row: &EventRow, securities: &SecurityList) -> Option<NewsEvent> {
        let sentiment = match row.sentiment.parse::<Sentiment>() {
            Ok(sentiment) => sentiment,
            Err(e) => {
                warn!("Skipping news event at t={}: {}", row.time, e);
                return None;
            }
        };

        let Some(security) = securities.get(&row.ticker) else {
            warn!(
                "Skipping news event at t={}: unknown security {}",
                row.time, row.ticker
            );
            return None;
        };

        Some(NewsEvent::new(row.time, security.clone(), sentiment))
    }

    /// Enqueue an already-validated event
    pub fn push_event(&self, event: NewsEvent) {
        trace!("Queued {}", event);
        self.queue.lock().push(event);
    }

    /// Convenience for building events in code
    pub fn announce(&self, time: Tick, security: Security, sentiment: Sentiment) {
        self.push_event(NewsEvent::new(time, security, sentiment));
    }

    // ============ Pull ============

    /// Event due at exactly `time`, if any
    ///
    /// Every pending event earlier than `time` is consumed first. The
    /// returned event stays queued, so other agents polling the same tick
    /// see it too. When several events share `time`, only the earliest
    /// inserted is ever visible to polling; the others are consumed by the
    /// next poll at a later tick.
    pub fn peek_at(&self, time: Tick) -> Option<NewsEvent> {
        let mut queue = self.queue.lock();
        queue.discard_before(time);
        queue.head().filter(|event| event.time() == time).cloned()
    }

    // ============ Drain ============

    /// Consume every event earlier than `time`
    pub fn discard_before(&self, time: Tick) -> usize {
        self.queue.lock().discard_before(time)
    }

    /// Pop events one at a time in `(time, insertion)` order
    ///
    /// The iterator is lazy and takes the queue lock per item, so the caller
    /// may touch the board between items.
    pub fn drain_in_order(&self) -> impl Iterator<Item = NewsEvent> + '_ {
        std::iter::from_fn(move || self.queue.lock().pop())
    }

    /// Like [`drain_in_order`](Self::drain_in_order), but stops before the
    /// first event later than `horizon` and leaves it queued
    pub fn drain_through(&self, horizon: Tick) -> impl Iterator<Item = NewsEvent> + '_ {
        std::iter::from_fn(move || {
            let mut queue = self.queue.lock();
            if queue.head_time()? <= horizon {
                queue.pop()
            } else {
                None
            }
        })
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }

    // ============ Registry ============

    /// Add `observer` to the end of the delivery order
    ///
    /// Returns `false` when an observer with the same id is already
    /// subscribed; its position is kept.
    pub fn subscribe<O>(&self, observer: &Arc<O>) -> bool
    where
        O: NewsObserver + 'static,
    {
        let id = observer.observer_id();
        let mut subscribers = self.subscribers.write();

        if subscribers.iter().any(|s| s.id == id) {
            debug!("Observer {} already subscribed", id);
            return false;
        }

        let weak: Weak<O> = Arc::downgrade(observer);
        let weak: Weak<dyn NewsObserver> = weak;
        subscribers.push(Subscription { id, observer: weak });
        debug!("Observer {} subscribed", id);
        true
    }

    /// Remove the observer with `id`. Returns whether one was subscribed.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        before != subscribers.len()
    }

    pub fn is_subscribed(&self, id: ObserverId) -> bool {
        self.subscribers.read().iter().any(|s| s.id == id)
    }

    /// Live subscribers, after pruning dropped ones
    pub fn subscriber_count(&self) -> usize {
        self.prune();
        self.subscribers.read().len()
    }

    fn prune(&self) {
        self.subscribers
            .write()
            .retain(|s| s.observer.strong_count() > 0);
    }

    // ============ Push ============

    /// Deliver `event` to every subscriber, in subscription order
    ///
    /// The subscriber list is snapshotted first, so observers may
    /// (un)subscribe from inside `on_event`. An observer returning `Err` is
    /// logged and counted; the rest still receive the event. Panics are not
    /// caught.
    pub fn publish(&self, event: &NewsEvent) -> DeliveryReport {
        let snapshot: Vec<(ObserverId, Weak<dyn NewsObserver>)> = self
            .subscribers
            .read()
            .iter()
            .map(|s| (s.id, s.observer.clone()))
            .collect();

        let mut report = DeliveryReport {
            events: 1,
            ..Default::default()
        };
        let mut saw_dropped = false;

        for (id, weak) in snapshot {
            let Some(observer) = weak.upgrade() else {
                saw_dropped = true;
                continue;
            };

            match observer.on_event(event) {
                Ok(()) => report.deliveries += 1,
                Err(e) => {
                    warn!("Observer {} failed on {}: {}", id, event, e);
                    report.failures += 1;
                }
            }
        }

        if saw_dropped {
            self.prune();
        }
        report
    }

    /// Drain the whole queue, publishing each event before the next
    pub fn run_events(&self) -> DeliveryReport {
        self.run_events_through(Tick::MAX)
    }

    /// Drain and publish events up to and including `horizon`
    pub fn run_events_through(&self, horizon: Tick) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        for event in self.drain_through(horizon) {
            report.absorb(self.publish(&event));
        }
        debug!(
            "Published {} events: {} deliveries, {} failures",
            report.events, report.deliveries, report.failures
        );
        report
    }
}
