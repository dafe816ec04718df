//! numbet core SDK
//!
//! Wire types, local validation, the REST client for the betting and
//! wallet backend, and cancellable timers used by countdown flows.

pub mod api;
pub mod config;
pub mod error;
pub mod timer;
pub mod types;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ErrorKind, NumbetError, Result};
pub use timer::{ScopedTimer, TimerOutcome};
pub use types::{
    normalize_phone, AuthSession, BankDetails, BetReceipt, BetStatus, DepositConfirmation,
    DepositIntent, DocumentKind, HistoryQuery, KycDocument, KycReceipt, KycStatus, KycSubmission,
    PaymentMethod, PersonalInfo, PlaceBetsRequest, PlacedBet, Pool, ProfileUpdate,
    RegisterProfile, Transaction, TransactionPage, TransactionStatus, TransactionType, User, Utr,
    WithdrawalReceipt,
};
