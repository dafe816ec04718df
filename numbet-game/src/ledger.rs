use crate::{Selection, Stake};
use numbet_core::Pool;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One pending wager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BetEntry {
    pub id: EntryId,
    pub selection: Selection,
    pub amount: Stake,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerAction {
    AddSelection { selection: Selection, stake: Stake },
    RemoveSelection { id: EntryId },
    Clear,
}

/// Pending selections, at most one per selection.
///
/// Entries are only appended or removed. New ids are one past the highest
/// id present, so adding and then removing an entry leaves a ledger equal
/// to the one before.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    entries: Vec<BetEntry>,
}

/// Pure transition function over the ledger.
pub fn reduce(mut ledger: Ledger, action: LedgerAction) -> Ledger {
    ledger.apply(action);
    ledger
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[BetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, selection: &Selection) -> Option<&BetEntry> {
        self.entries.iter().find(|e| e.selection == *selection)
    }

    pub fn get(&self, id: EntryId) -> Option<&BetEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, selection: &Selection) -> bool {
        self.find(selection).is_some()
    }

    pub fn in_pool(&self, pool: Pool) -> impl Iterator<Item = &BetEntry> {
        self.entries
            .iter()
            .filter(move |e| e.selection.pool() == pool)
    }

    /// Sum of every stake in the ledger.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |sum, e| sum.saturating_add(e.amount.amount()))
    }

    fn next_id(&self) -> EntryId {
        EntryId(self.entries.iter().map(|e| e.id.0).max().unwrap_or(0) + 1)
    }

    /// Apply an action in place. Returns the id of an added entry.
    pub fn apply(&mut self, action: LedgerAction) -> Option<EntryId> {
        match action {
            LedgerAction::AddSelection { selection, stake } => {
                if let Err(e) = selection.validate() {
                    tracing::warn!("Ignoring selection {}: {}", selection, e);
                    return None;
                }
                if let Some(existing) = self.find(&selection) {
                    tracing::warn!(
                        "Ignoring duplicate selection {} (already entry {})",
                        selection,
                        existing.id
                    );
                    return None;
                }

                let id = self.next_id();
                self.entries.push(BetEntry {
                    id,
                    selection,
                    amount: stake,
                });
                tracing::info!("Added {} ({}) with stake {}", selection, id, stake);
                Some(id)
            }
            LedgerAction::RemoveSelection { id } => {
                let before = self.entries.len();
                self.entries.retain(|e| e.id != id);
                if self.entries.len() < before {
                    tracing::info!("Removed entry {}", id);
                }
                None
            }
            LedgerAction::Clear => {
                if !self.entries.is_empty() {
                    tracing::debug!("Clearing {} entries", self.entries.len());
                }
                self.entries.clear();
                None
            }
        }
    }
}
