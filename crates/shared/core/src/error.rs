use thiserror::Error;

use crate::values::Quantity;

/// Errors reported by ledger position updates
///
/// These are reports, not failures: the ledger is left unchanged and the
/// caller decides whether to care.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("position in {ticker} does not exist")]
    NoPosition { ticker: String },

    #[error("current position in {ticker} insufficient: held {held}, requested {requested}")]
    InsufficientPosition {
        ticker: String,
        held: Quantity,
        requested: Quantity,
    },
}

/// Errors raised when parsing enumerants from text (files, CLI, config)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown sentiment: {0}")]
    UnknownSentiment(String),

    #[error("unknown participant kind: {0}")]
    UnknownParticipantKind(String),

    #[error("unknown account kind: {0}")]
    UnknownAccountKind(String),

    #[error("unknown order side: {0}")]
    UnknownSide(String),
}
