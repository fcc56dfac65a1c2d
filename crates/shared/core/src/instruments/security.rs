use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An immutable tradeable security
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Security {
    ticker: String,
    description: String,
}

impl Security {
    /// Create a new security
    pub fn new(ticker: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            description: description.into(),
        }
    }

    /// Get the ticker as a string slice
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl std::fmt::Display for Security {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ticker)
    }
}

/// Registry of known securities, in listing order
#[derive(Debug, Clone, Default)]
pub struct SecurityList {
    securities: Vec<Security>,
    by_ticker: HashMap<String, usize>,
}

impl SecurityList {
    pub fn new() -> Self {
        Self::default()
    }

    /// List a security. Re-listing a ticker replaces its description.
    pub fn add(&mut self, security: Security) {
        match self.by_ticker.get(security.ticker()) {
            Some(&idx) => self.securities[idx] = security,
            None => {
                self.by_ticker
                    .insert(security.ticker().to_string(), self.securities.len());
                self.securities.push(security);
            }
        }
    }

    /// Look up a security by ticker
    pub fn get(&self, ticker: &str) -> Option<&Security> {
        self.by_ticker.get(ticker).map(|&idx| &self.securities[idx])
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.by_ticker.contains_key(ticker)
    }

    pub fn len(&self) -> usize {
        self.securities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Security> {
        self.securities.iter()
    }
}

impl FromIterator<Security> for SecurityList {
    fn from_iter<I: IntoIterator<Item = Security>>(iter: I) -> Self {
        let mut list = SecurityList::new();
        for security in iter {
            list.add(security);
        }
        list
    }
}
