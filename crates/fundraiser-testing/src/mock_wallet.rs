use {
    async_trait::async_trait,
    fundraiser_client::{WalletAdapter, WalletError, WalletReadyState},
    solana_sdk::{
        pubkey::Pubkey,
        signature::{Keypair, Signer},
        transaction::Transaction,
    },
    std::sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Scriptable signing authority holding an in-memory keypair.
pub struct MockWallet {
    keypair: Keypair,
    ready_state: WalletReadyState,
    trusted: AtomicBool,
    approves: AtomicBool,
    sign_calls: AtomicUsize,
}

impl MockWallet {
    /// Installed, trusted and approving.
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair,
            ready_state: WalletReadyState::Installed,
            trusted: AtomicBool::new(true),
            approves: AtomicBool::new(true),
            sign_calls: AtomicUsize::new(0),
        }
    }

    pub fn not_detected(keypair: Keypair) -> Self {
        Self {
            ready_state: WalletReadyState::NotDetected,
            ..Self::new(keypair)
        }
    }

    pub fn untrusted(self) -> Self {
        self.trusted.store(false, Ordering::SeqCst);
        self
    }

    /// Whether the (simulated) user approves interactive prompts.
    pub fn set_approves(&self, approves: bool) {
        self.approves.store(approves, Ordering::SeqCst);
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletAdapter for MockWallet {
    fn ready_state(&self) -> WalletReadyState {
        self.ready_state
    }

    async fn connect(&self, only_if_trusted: bool) -> Result<Pubkey, WalletError> {
        let allowed = if only_if_trusted {
            self.trusted.load(Ordering::SeqCst)
        } else {
            self.approves.load(Ordering::SeqCst)
        };

        if allowed {
            Ok(self.keypair.pubkey())
        } else {
            Err(WalletError::Rejected("User rejected the request.".to_string()))
        }
    }

    async fn sign_transaction(&self, mut tx: Transaction) -> Result<Transaction, WalletError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        let blockhash = tx.message.recent_blockhash;
        tx.try_sign(&[&self.keypair], blockhash)
            .map_err(|e| WalletError::Signing(e.to_string()))?;
        Ok(tx)
    }
}
