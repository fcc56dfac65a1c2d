use thiserror::Error;

/// Errors raised by an exchange gateway when accepting an order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Unknown security: {0}")]
    UnknownSecurity(String),

    #[error("Order rejected: {0}")]
    Rejected(String),
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Errors raised by an observer while reacting to a news event
///
/// The news board logs these and keeps delivering to the remaining
/// observers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReactionError {
    #[error("No price available for {0}")]
    PriceUnavailable(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

pub type ReactionResult<T> = std::result::Result<T, ReactionError>;
