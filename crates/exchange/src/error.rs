use herald_core::ParticipantId;
use herald_ports::GatewayError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Account not found for participant {0}")]
    AccountNotFound(ParticipantId),

    #[error("Participant {0} already has an account")]
    DuplicateAccount(ParticipantId),
}

pub type Result<T> = std::result::Result<T, ExchangeError>;

impl From<ExchangeError> for GatewayError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::SymbolNotFound(ticker) => GatewayError::UnknownSecurity(ticker),
            other => GatewayError::Rejected(other.to_string()),
        }
    }
}
