use crate::{
    AmountPicker, BetBackend, BetEntry, BettingError, EntryId, Ledger, LedgerAction, Result,
    Selection, StakeLimits, WagerBatch,
};
use numbet_core::{BetReceipt, Pool};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The selection was already in the ledger and has been cancelled.
    Removed(BetEntry),
    /// The amount dialog is now open for the selection.
    PickerOpened,
}

/// The number-picking surface for one game.
///
/// Owns the ledger while open. Closing the surface, or a submission the
/// backend acknowledges, discards the ledger.
#[derive(Debug)]
pub struct BettingSurface {
    game_id: String,
    limits: StakeLimits,
    ledger: Ledger,
    picker: Option<AmountPicker>,
    pending: Option<WagerBatch>,
    open: bool,
}

impl BettingSurface {
    pub fn new(game_id: impl Into<String>, limits: StakeLimits) -> Result<Self> {
        limits.validate()?;

        Ok(Self {
            game_id: game_id.into(),
            limits,
            ledger: Ledger::new(),
            picker: None,
            pending: None,
            open: false,
        })
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn limits(&self) -> StakeLimits {
        self.limits
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn entries(&self) -> &[BetEntry] {
        self.ledger.entries()
    }

    pub fn entries_in(&self, pool: Pool) -> Vec<&BetEntry> {
        self.ledger.in_pool(pool).collect()
    }

    pub fn is_selected(&self, selection: &Selection) -> bool {
        self.ledger.contains(selection)
    }

    pub fn total(&self) -> u64 {
        self.ledger.total()
    }

    pub fn picker(&self) -> Option<&AmountPicker> {
        self.picker.as_ref()
    }

    /// Batch kept from a failed submission, if any.
    pub fn pending_batch(&self) -> Option<&WagerBatch> {
        self.pending.as_ref()
    }

    pub fn open(&mut self) {
        self.reset();
        self.open = true;
        tracing::info!("Opened betting surface for game {}", self.game_id);
    }

    pub fn close(&mut self) {
        let discarded = self.ledger.len();
        self.reset();
        self.open = false;
        tracing::info!(
            "Closed betting surface for game {} ({} selection(s) discarded)",
            self.game_id,
            discarded
        );
    }

    fn reset(&mut self) {
        self.dispatch(LedgerAction::Clear);
        self.picker = None;
        self.pending = None;
    }

    fn dispatch(&mut self, action: LedgerAction) -> Option<EntryId> {
        self.ledger.apply(action)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(BettingError::SurfaceClosed)
        }
    }

    /// Cancel `selection` if it is in the ledger, otherwise ask for a stake.
    pub fn toggle(&mut self, selection: Selection) -> Result<ToggleOutcome> {
        self.ensure_open()?;
        selection.validate()?;
        if self.picker.is_some() {
            return Err(BettingError::DialogOpen);
        }

        if let Some(entry) = self.ledger.find(&selection).cloned() {
            self.dispatch(LedgerAction::RemoveSelection { id: entry.id });
            return Ok(ToggleOutcome::Removed(entry));
        }

        self.picker = Some(AmountPicker::new(selection, self.limits));
        Ok(ToggleOutcome::PickerOpened)
    }

    pub fn enter_amount(&mut self, input: &str) -> Result<()> {
        let picker = self.picker.as_mut().ok_or(BettingError::NoOpenDialog)?;
        picker.set_input(input);
        Ok(())
    }

    /// Confirm the typed amount. On rejection the dialog stays open.
    pub fn confirm_amount(&mut self) -> Result<EntryId> {
        let picker = self.picker.as_mut().ok_or(BettingError::NoOpenDialog)?;
        let stake = picker.confirm()?;
        self.commit_picker(stake)
    }

    /// Pick one of the quick stakes; same rules as typing it.
    pub fn quick_pick(&mut self, amount: u64) -> Result<EntryId> {
        let picker = self.picker.as_mut().ok_or(BettingError::NoOpenDialog)?;
        let stake = picker.quick_pick(amount)?;
        self.commit_picker(stake)
    }

    fn commit_picker(&mut self, stake: crate::Stake) -> Result<EntryId> {
        let picker = self.picker.take().ok_or(BettingError::NoOpenDialog)?;
        self.dispatch(LedgerAction::AddSelection {
            selection: picker.candidate(),
            stake,
        })
        .ok_or_else(|| {
            BettingError::InvalidSelection(format!("{} is already selected", picker.candidate()))
        })
    }

    /// Dismiss the dialog without touching the ledger.
    pub fn cancel_picker(&mut self) -> Result<Selection> {
        let picker = self.picker.take().ok_or(BettingError::NoOpenDialog)?;
        tracing::debug!("Dismissed amount dialog for {}", picker.candidate());
        Ok(picker.candidate())
    }

    /// Place all bets in the ledger.
    ///
    /// On success the surface closes. On failure the ledger stays as it
    /// was and the frozen batch is kept, so retrying an unchanged ledger
    /// resubmits the same batch id.
    pub async fn submit<B>(&mut self, backend: &B) -> Result<BetReceipt>
    where
        B: BetBackend + ?Sized,
    {
        self.ensure_open()?;
        if self.picker.is_some() {
            return Err(BettingError::DialogOpen);
        }

        let batch = match self.pending.take() {
            Some(batch) if batch.matches(&self.game_id, &self.ledger) => {
                tracing::info!("Retrying batch {}", batch.id());
                batch
            }
            _ => WagerBatch::freeze(&self.game_id, &self.ledger)?,
        };

        match backend.submit(&batch).await {
            Ok(receipt) => {
                tracing::info!(
                    "Placed {} bet(s) totalling {} in game {}: receipt {}",
                    batch.entries().len(),
                    batch.total(),
                    self.game_id,
                    receipt.receipt_id
                );
                self.close();
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!("Submission of batch {} failed: {}", batch.id(), e);
                self.pending = Some(batch);
                Err(e)
            }
        }
    }
}
