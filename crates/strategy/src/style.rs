//! Reaction style selection
//!
//! Maps the style names found in account files and on the command line to
//! policy instances.

use crate::aggressive::AggressivePolicy;
use crate::conservative::ConservativePolicy;
use crate::strategy::ReactionPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("unknown reaction style: {0}")]
    Unknown(String),
}

/// Built-in reaction styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReactionStyle {
    #[default]
    Aggressive,
    Conservative,
}

impl ReactionStyle {
    /// Lenient reading of the style column of an accounts file
    ///
    /// Exactly `"Conservative"` selects the conservative style; any other
    /// text, including other casings, falls back to aggressive.
    pub fn from_account_column(s: &str) -> Self {
        if s == "Conservative" {
            ReactionStyle::Conservative
        } else {
            ReactionStyle::Aggressive
        }
    }

    /// A fresh policy instance for this style
    pub fn policy(&self) -> Arc<dyn ReactionPolicy> {
        policy_for(*self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionStyle::Aggressive => "Aggressive",
            ReactionStyle::Conservative => "Conservative",
        }
    }
}

/// Strict, case-insensitive parse used by the agent factory
impl FromStr for ReactionStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("Aggressive") {
            Ok(ReactionStyle::Aggressive)
        } else if s.eq_ignore_ascii_case("Conservative") {
            Ok(ReactionStyle::Conservative)
        } else {
            Err(StyleError::Unknown(s.to_string()))
        }
    }
}

impl fmt::Display for ReactionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn policy_for(style: ReactionStyle) -> Arc<dyn ReactionPolicy> {
    match style {
        ReactionStyle::Aggressive => Arc::new(AggressivePolicy::default()),
        ReactionStyle::Conservative => Arc::new(ConservativePolicy::default()),
    }
}
