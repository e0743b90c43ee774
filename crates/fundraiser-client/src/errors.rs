use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::wallet::SessionStatus;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Wallet is not connected")]
    NotConnected,

    #[error("Invalid amount: {0} (must be a positive number of lamports)")]
    InvalidAmount(u64),

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rejected by program: {0}")]
    RejectedByProgram(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Campaign not found: {0}")]
    NotFound(Pubkey),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Transport-level failures are the only ones a caller may choose to retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}

/// Failure to decode one campaign account. Non-fatal during a registry refresh.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Account data too short: {len} bytes")]
    TooShort { len: usize },

    #[error("Unknown account discriminator: {0:?}")]
    UnknownDiscriminator([u8; 8]),

    #[error("Malformed campaign layout: {0}")]
    Layout(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("No compatible wallet found")]
    NotDetected,

    #[error("Wallet request rejected: {0}")]
    Rejected(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Cannot connect while session is {0:?}")]
    InvalidState(SessionStatus),
}
