/*!
# Wallet Session

Owns the single connection to an external signing authority. The authority is
reached through [`WalletAdapter`]; private key material never crosses it.

State machine:

```text
Disconnected -> Connecting -> Connected
                Connecting -> Failed -> Disconnected (connect() again)
Connected    -> Disconnected (external disconnect event)
```
*/

use async_trait::async_trait;
use parking_lot::RwLock;
use solana_sdk::{pubkey::Pubkey, transaction::Transaction};
use tracing::debug;

use crate::errors::{ClientError, ClientResult, WalletError};

/// Whether a compatible signing authority is present at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletReadyState {
    Installed,
    NotDetected,
}

/// External signing authority.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn ready_state(&self) -> WalletReadyState;

    /// With `only_if_trusted` the wallet must not prompt; it either reconnects
    /// silently or rejects.
    async fn connect(&self, only_if_trusted: bool) -> Result<Pubkey, WalletError>;

    async fn sign_transaction(&self, tx: Transaction) -> Result<Transaction, WalletError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

#[derive(Debug)]
struct SessionState {
    status: SessionStatus,
    identity: Option<Pubkey>,
}

pub struct WalletSession<W> {
    wallet: W,
    state: RwLock<SessionState>,
}

impl<W: WalletAdapter> WalletSession<W> {
    pub fn new(wallet: W) -> Self {
        Self {
            wallet,
            state: RwLock::new(SessionState {
                status: SessionStatus::Disconnected,
                identity: None,
            }),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.state.read().status
    }

    pub fn identity(&self) -> Option<Pubkey> {
        self.state.read().identity
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Silent reconnect. `Ok(None)` means no trusted session is available,
    /// which is an expected outcome rather than a failure. A pending
    /// interactive connect is left alone.
    pub async fn try_auto_connect(&self) -> ClientResult<Option<Pubkey>> {
        match self.status() {
            SessionStatus::Connected => return Ok(self.connected_identity()),
            SessionStatus::Connecting => {
                debug!("Interactive connect in progress, skipping auto-connect");
                return Ok(None);
            }
            SessionStatus::Disconnected | SessionStatus::Failed => {}
        }

        if self.wallet.ready_state() != WalletReadyState::Installed {
            debug!("No wallet detected, staying disconnected");
            self.reset_unless_connecting();
            return Ok(None);
        }

        match self.wallet.connect(true).await {
            Ok(identity) => {
                self.set_connected(identity);
                debug!("Auto-connected with public key {}", identity);
                Ok(Some(identity))
            }
            Err(e) => {
                debug!("No trusted session available: {}", e);
                self.reset_unless_connecting();
                Ok(None)
            }
        }
    }

    /// Interactive connect, valid from `Disconnected` (or `Failed`, which is
    /// reset first).
    pub async fn connect(&self) -> ClientResult<Pubkey> {
        {
            let mut state = self.state.write();
            match state.status {
                SessionStatus::Disconnected | SessionStatus::Failed => {
                    state.status = SessionStatus::Connecting;
                    state.identity = None;
                }
                status => return Err(WalletError::InvalidState(status).into()),
            }
        }
        debug!("Wallet session connecting");

        let result = if self.wallet.ready_state() == WalletReadyState::Installed {
            self.wallet.connect(false).await
        } else {
            Err(WalletError::NotDetected)
        };

        match result {
            Ok(identity) => {
                self.set_connected(identity);
                debug!("Connected to wallet: {}", identity);
                Ok(identity)
            }
            Err(e) => {
                let mut state = self.state.write();
                state.status = SessionStatus::Failed;
                state.identity = None;
                debug!("Wallet connect failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// The single authorization gate for ledger-mutating operations.
    pub fn require_identity(&self) -> ClientResult<Pubkey> {
        self.connected_identity().ok_or(ClientError::NotConnected)
    }

    /// External disconnect event.
    pub fn handle_disconnect(&self) {
        debug!("Wallet disconnected");
        self.reset();
    }

    pub async fn sign_transaction(&self, tx: Transaction) -> ClientResult<Transaction> {
        self.require_identity()?;
        Ok(self.wallet.sign_transaction(tx).await?)
    }

    fn connected_identity(&self) -> Option<Pubkey> {
        let state = self.state.read();
        match state.status {
            SessionStatus::Connected => state.identity,
            _ => None,
        }
    }

    fn set_connected(&self, identity: Pubkey) {
        let mut state = self.state.write();
        state.status = SessionStatus::Connected;
        state.identity = Some(identity);
    }

    fn reset(&self) {
        let mut state = self.state.write();
        state.status = SessionStatus::Disconnected;
        state.identity = None;
    }

    /// An interactive connect may have started while the silent one was
    /// awaited; its outcome owns the state.
    fn reset_unless_connecting(&self) {
        let mut state = self.state.write();
        if state.status != SessionStatus::Connecting {
            state.status = SessionStatus::Disconnected;
            state.identity = None;
        }
    }
}
