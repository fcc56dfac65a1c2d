use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseError;
use crate::values::{Money, Quantity};

/// Fixed fee charged by a basic account, in cents
pub const FLAT_FEE: Money = 450;

/// Minimum fee charged by a pro account, in cents
pub const VOLUME_MIN_FEE: Money = 1000;

/// Kind of exchange account, as named in account files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    /// Flat fee per trade
    Basic,
    /// Volume-based fee with a floor
    Pro,
}

impl AccountKind {
    /// Fee policy attached to accounts of this kind
    pub fn fee_policy(&self) -> FeePolicy {
        match self {
            AccountKind::Basic => FeePolicy::flat(),
            AccountKind::Pro => FeePolicy::volume(),
        }
    }
}

impl FromStr for AccountKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("Basic") {
            Ok(AccountKind::Basic)
        } else if s.eq_ignore_ascii_case("Pro") {
            Ok(AccountKind::Pro)
        } else {
            Err(ParseError::UnknownAccountKind(s.to_string()))
        }
    }
}

/// Fee computation bound to a ledger
///
/// Stateless: the fee depends on the traded quantity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeePolicy {
    /// Same fee for every trade
    Flat { fee: Money },
    /// One cent per unit traded, but never less than `min_fee`
    Volume { min_fee: Money },
}

impl FeePolicy {
    /// Basic account policy: 450 per trade
    pub fn flat() -> Self {
        FeePolicy::Flat { fee: FLAT_FEE }
    }

    /// Pro account policy: max(quantity, 1000)
    pub fn volume() -> Self {
        FeePolicy::Volume {
            min_fee: VOLUME_MIN_FEE,
        }
    }

    /// Fee for a trade of `quantity` units
    pub fn fee(&self, quantity: Quantity) -> Money {
        match *self {
            FeePolicy::Flat { fee } => fee,
            FeePolicy::Volume { min_fee } => quantity.max(min_fee),
        }
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::flat()
    }
}
