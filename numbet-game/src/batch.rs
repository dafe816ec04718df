use crate::{BetEntry, BettingError, Ledger, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use numbet_core::{ApiClient, BetReceipt, NumbetError, PlaceBetsRequest, PlacedBet};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Immutable snapshot of a ledger handed to the betting backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WagerBatch {
    id: Uuid,
    game_id: String,
    entries: Vec<BetEntry>,
    total: u64,
    created_at: DateTime<Utc>,
    fingerprint: String,
}

impl WagerBatch {
    /// Freeze the current contents of `ledger`. Fails on an empty ledger.
    pub fn freeze(game_id: &str, ledger: &Ledger) -> Result<Self> {
        if ledger.is_empty() {
            return Err(BettingError::EmptyLedger);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            game_id: game_id.to_string(),
            entries: ledger.entries().to_vec(),
            total: ledger.total(),
            created_at: Utc::now(),
            fingerprint: fingerprint(game_id, ledger),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn entries(&self) -> &[BetEntry] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Whether this batch still describes `ledger` exactly.
    pub fn matches(&self, game_id: &str, ledger: &Ledger) -> bool {
        self.fingerprint == fingerprint(game_id, ledger)
    }

    pub fn to_request(&self) -> PlaceBetsRequest {
        PlaceBetsRequest {
            batch_id: self.id,
            game_id: self.game_id.clone(),
            bets: self
                .entries
                .iter()
                .map(|e| PlacedBet {
                    pool: e.selection.pool(),
                    number: e.selection.number(),
                    amount: e.amount.amount(),
                })
                .collect(),
            total: self.total,
        }
    }
}

/// Hex SHA-256 over the game id and every entry in ledger order.
pub fn fingerprint(game_id: &str, ledger: &Ledger) -> String {
    let mut hasher = Sha256::new();
    hasher.update(game_id.as_bytes());
    for entry in ledger.entries() {
        hasher.update(
            format!(
                "\n{}:{}:{}:{}",
                entry.id.0,
                entry.selection.pool(),
                entry.selection.number(),
                entry.amount
            )
            .as_bytes(),
        );
    }
    hex::encode(hasher.finalize())
}

/// Anything that can accept a batch of wagers.
#[async_trait]
pub trait BetBackend: Send + Sync {
    async fn submit(&self, batch: &WagerBatch) -> Result<BetReceipt>;
}

#[async_trait]
impl BetBackend for ApiClient {
    async fn submit(&self, batch: &WagerBatch) -> Result<BetReceipt> {
        match self.place_bets(&batch.to_request()).await {
            Ok(receipt) => Ok(receipt),
            // 4xx: the backend looked at the bets and said no
            Err(NumbetError::Server { status, message }) if (400..500).contains(&status) => {
                Err(BettingError::BetRejected(message))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LedgerAction, Selection, StakeLimits};
    use numbet_core::Pool;

    fn ledger() -> Ledger {
        let limits = StakeLimits::default();
        let mut ledger = Ledger::new();
        ledger.apply(LedgerAction::AddSelection {
            selection: Selection::numeric(14).unwrap(),
            stake: limits.stake(100).unwrap(),
        });
        ledger.apply(LedgerAction::AddSelection {
            selection: Selection::andar(3).unwrap(),
            stake: limits.stake(50).unwrap(),
        });
        ledger
    }

    #[test]
    fn test_freeze_snapshot() {
        let ledger = ledger();
        let batch = WagerBatch::freeze("kalyan", &ledger).unwrap();

        assert_eq!(batch.total(), 150);
        assert_eq!(batch.entries(), ledger.entries());
        assert!(batch.matches("kalyan", &ledger));
        assert!(!batch.matches("milan", &ledger));
        assert_eq!(batch.fingerprint().len(), 64);
    }

    #[test]
    fn test_empty_ledger_cannot_be_frozen() {
        assert!(matches!(
            WagerBatch::freeze("kalyan", &Ledger::new()),
            Err(BettingError::EmptyLedger)
        ));
    }

    #[test]
    fn test_fingerprint_tracks_changes() {
        let mut ledger = ledger();
        let batch = WagerBatch::freeze("kalyan", &ledger).unwrap();

        let id = ledger.entries()[1].id;
        ledger.apply(LedgerAction::RemoveSelection { id });
        assert!(!batch.matches("kalyan", &ledger));
    }

    #[test]
    fn test_request_shape() {
        let batch = WagerBatch::freeze("kalyan", &ledger()).unwrap();
        let request = batch.to_request();

        assert_eq!(request.batch_id, batch.id());
        assert_eq!(request.total, 150);
        assert_eq!(
            request.bets,
            vec![
                PlacedBet {
                    pool: Pool::Numbers,
                    number: 14,
                    amount: 100
                },
                PlacedBet {
                    pool: Pool::Andar,
                    number: 3,
                    amount: 50
                },
            ]
        );
    }
}
