mod fee;
mod ledger;
mod news;
mod order;
mod participant;
mod position;
mod side;

pub use fee::{AccountKind, FLAT_FEE, FeePolicy, VOLUME_MIN_FEE};
pub use ledger::Ledger;
pub use news::{NewsEvent, Sentiment};
pub use order::{Order, OrderId, OrderTicket};
pub use participant::{Participant, ParticipantId, ParticipantKind};
pub use position::PositionBook;
pub use side::Side;
