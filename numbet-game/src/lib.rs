//! Bet selection and wagering state for numbers games.
//!
//! Players pick numbers from three pools (1-100, Andar 0-9, Bahar 0-9),
//! attach a stake to each pick, and place the whole ledger as one batch.

pub mod batch;
pub mod error;
pub mod ledger;
pub mod picker;
pub mod selection;
pub mod stake;
pub mod surface;

pub use batch::{BetBackend, WagerBatch};
pub use error::{BettingError, Result};
pub use ledger::{reduce, BetEntry, EntryId, Ledger, LedgerAction};
pub use picker::AmountPicker;
pub use selection::Selection;
pub use stake::{Stake, StakeLimits, MAX_STAKE, MIN_STAKE, QUICK_STAKES, STAKE_CEILING};
pub use surface::{BettingSurface, ToggleOutcome};

/// Open a betting surface for `game_id` with the default stake limits.
pub fn open_surface(game_id: impl Into<String>) -> Result<BettingSurface> {
    let mut surface = BettingSurface::new(game_id, StakeLimits::default())?;
    surface.open();
    Ok(surface)
}
