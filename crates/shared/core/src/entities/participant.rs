use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParseError;
use crate::ids::IdAllocator;

/// Unique identifier for a participant
pub type ParticipantId = u64;

/// Kind of market participant
///
/// Independent of how the participant reacts to news: any kind can be paired
/// with any reaction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantKind {
    Retail,
    Institutional,
}

impl FromStr for ParticipantKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("Retail") {
            Ok(ParticipantKind::Retail)
        } else if s.eq_ignore_ascii_case("Institutional") {
            Ok(ParticipantKind::Institutional)
        } else {
            Err(ParseError::UnknownParticipantKind(s.to_string()))
        }
    }
}

/// Immutable participant identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    title: String,
    kind: ParticipantKind,
}

impl Participant {
    /// Create a participant with an explicit id
    pub fn new(id: ParticipantId, title: impl Into<String>, kind: ParticipantKind) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
        }
    }

    /// Create a participant, taking the next id from `ids`
    pub fn allocate(ids: &IdAllocator, title: impl Into<String>, kind: ParticipantKind) -> Self {
        Self::new(ids.next_id(), title, kind)
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// Display name
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> ParticipantKind {
        self.kind
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing_ignores_case() {
        assert_eq!("retail".parse(), Ok(ParticipantKind::Retail));
        assert_eq!("INSTITUTIONAL".parse(), Ok(ParticipantKind::Institutional));
        assert!("Hedge".parse::<ParticipantKind>().is_err());
    }

    #[test]
    fn test_allocate_uses_next_id() {
        let ids = IdAllocator::new();
        let a = Participant::allocate(&ids, "Pension Fund", ParticipantKind::Institutional);
        let b = Participant::allocate(&ids, "Jane Doe", ParticipantKind::Retail);

        assert_eq!(a.id(), 1);
        assert_eq!(b.id(), 2);
        assert_eq!(b.title(), "Jane Doe");
    }
}
