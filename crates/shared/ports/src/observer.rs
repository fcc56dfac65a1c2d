use herald_core::NewsEvent;

use crate::error::ReactionResult;

/// Identity of a subscriber on the news board
pub type ObserverId = u64;

/// Port for receiving news events
///
/// The news board calls [`on_event`](Self::on_event) for every subscriber,
/// in subscription order. An `Err` is reported by the board and does not
/// stop delivery to later subscribers.
///
/// Implementations must report failure through the returned `Result`. The
/// board does not catch panics, so a panicking observer aborts the publish
/// and later subscribers miss the event.
pub trait NewsObserver: Send + Sync {
    /// Stable identity used for duplicate detection and unsubscribe
    fn observer_id(&self) -> ObserverId;

    /// React to a published event
    fn on_event(&self, event: &NewsEvent) -> ReactionResult<()>;
}
