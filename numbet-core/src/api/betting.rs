use super::ApiClient;
use crate::error::{NumbetError, Result};
use crate::types::{BetReceipt, PlaceBetsRequest};

impl ApiClient {
    /// Submit a batch of wagers. The batch id doubles as an idempotency key.
    pub async fn place_bets(&self, request: &PlaceBetsRequest) -> Result<BetReceipt> {
        if request.bets.is_empty() {
            return Err(NumbetError::validation("No bets to place"));
        }
        let sum = request
            .bets
            .iter()
            .try_fold(0u64, |sum, b| sum.checked_add(b.amount))
            .ok_or_else(|| NumbetError::validation("Sum of stakes overflows"))?;
        if sum != request.total {
            return Err(NumbetError::validation(format!(
                "Batch total {} does not match sum of stakes {}",
                request.total, sum
            )));
        }
        self.require_token()?;

        let receipt: BetReceipt = self.post("/bets", request).await?;
        tracing::info!(
            "Batch {} for game {} accepted as {} ({:?})",
            request.batch_id,
            request.game_id,
            receipt.receipt_id,
            receipt.status
        );
        Ok(receipt)
    }
}
