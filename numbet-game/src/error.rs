use numbet_core::{ErrorKind, NumbetError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BettingError>;

#[derive(Error, Debug)]
pub enum BettingError {
    #[error("{0}")]
    Core(#[from] NumbetError),

    #[error("Stake must be between {min} and {max}, got {amount}")]
    StakeOutOfRange { amount: u64, min: u64, max: u64 },

    #[error("Invalid amount: '{0}' is not a whole number")]
    InvalidAmount(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid stake limits: {0}")]
    InvalidLimits(String),

    #[error("An amount dialog is already open")]
    DialogOpen,

    #[error("No amount dialog is open")]
    NoOpenDialog,

    #[error("Betting surface is closed")]
    SurfaceClosed,

    #[error("No bets selected")]
    EmptyLedger,

    #[error("Bet rejected: {0}")]
    BetRejected(String),
}

impl BettingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(e) => e.kind(),
            Self::BetRejected(_) => ErrorKind::ServerRejected,
            _ => ErrorKind::Validation,
        }
    }
}
