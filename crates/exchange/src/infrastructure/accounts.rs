use herald_core::{Ledger, Money, Participant, ParticipantId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ExchangeError, Result};
use crate::model::SharedLedger;

/// Ledgers in opening order, indexed by participant id
#[derive(Debug, Default)]
pub struct AccountBook {
    ledgers: Vec<SharedLedger>,
    by_id: HashMap<ParticipantId, usize>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a ledger and return the shared handle to it
    pub fn open(&mut self, ledger: Ledger) -> Result<SharedLedger> {
        let id = ledger.owner().id();
        if self.by_id.contains_key(&id) {
            return Err(ExchangeError::DuplicateAccount(id));
        }

        let shared = Arc::new(RwLock::new(ledger));
        self.by_id.insert(id, self.ledgers.len());
        self.ledgers.push(shared.clone());
        Ok(shared)
    }

    pub fn get(&self, id: ParticipantId) -> Option<SharedLedger> {
        self.by_id.get(&id).map(|&i| self.ledgers[i].clone())
    }

    /// First ledger whose owner has this display name
    pub fn find_by_name(&self, title: &str) -> Option<SharedLedger> {
        self.ledgers
            .iter()
            .find(|ledger| ledger.read().owner().title() == title)
            .cloned()
    }

    /// (owner, balance) for every account, in opening order
    pub fn balances(&self) -> Vec<(Participant, Money)> {
        self.ledgers
            .iter()
            .map(|ledger| {
                let ledger = ledger.read();
                (ledger.owner().clone(), ledger.balance())
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }
}
