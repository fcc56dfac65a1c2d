//! News events - timed information about a single security

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseError;
use crate::instruments::Security;
use crate::values::Tick;

/// Classification of a news event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    /// Bullish: the price is expected to rise
    Good,
    /// Bearish: the price is expected to fall
    Bad,
}

impl FromStr for Sentiment {
    type Err = ParseError;

    /// Only the exact spellings `Good` and `Bad` are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Good" => Ok(Sentiment::Good),
            "Bad" => Ok(Sentiment::Bad),
            other => Err(ParseError::UnknownSentiment(other.to_string())),
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Good => f.write_str("Good"),
            Sentiment::Bad => f.write_str("Bad"),
        }
    }
}

/// A news event about one security, due at a given tick
///
/// Immutable once created. Observers receive it by reference; delivery never
/// transfers ownership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewsEvent {
    time: Tick,
    security: Security,
    sentiment: Sentiment,
}

impl NewsEvent {
    pub fn new(time: Tick, security: Security, sentiment: Sentiment) -> Self {
        Self {
            time,
            security,
            sentiment,
        }
    }

    /// Good news about `security` at `time`
    pub fn good(time: Tick, security: Security) -> Self {
        Self::new(time, security, Sentiment::Good)
    }

    /// Bad news about `security` at `time`
    pub fn bad(time: Tick, security: Security) -> Self {
        Self::new(time, security, Sentiment::Bad)
    }

    pub fn time(&self) -> Tick {
        self.time
    }

    pub fn security(&self) -> &Security {
        &self.security
    }

    /// Ticker of the security this event is about
    pub fn ticker(&self) -> &str {
        self.security.ticker()
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }
}

impl std::fmt::Display for NewsEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t={} {} {}", self.time, self.security, self.sentiment)
    }
}
