pub mod auth;
pub mod kyc;
pub mod play;
pub mod wallet;

pub use auth::{handle_auth_command, AuthCommands};
pub use kyc::{handle_kyc_command, KycCommands};
pub use play::{handle_play_command, PlayArgs};
pub use wallet::{handle_wallet_command, WalletCommands};

/// Run a blocking dialoguer prompt without stalling the runtime.
pub(crate) async fn prompt<T, F>(f: F) -> anyhow::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
{
    let value = tokio::task::spawn_blocking(f)
        .await?
        .map_err(numbet_core::NumbetError::from)?;
    Ok(value)
}
