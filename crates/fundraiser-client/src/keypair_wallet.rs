use async_trait::async_trait;
use parking_lot::Mutex;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
    transaction::Transaction,
};
use std::{path::PathBuf, sync::Arc};

use crate::errors::WalletError;
use crate::wallet::{WalletAdapter, WalletReadyState};

/// Signing authority backed by a Solana JSON keypair file.
///
/// A trusted wallet (e.g. the default CLI keypair) accepts silent reconnects;
/// an untrusted one only connects interactively.
pub struct KeypairWallet {
    path: PathBuf,
    trusted: bool,
    keypair: Mutex<Option<Arc<Keypair>>>,
}

impl KeypairWallet {
    pub fn new(path: impl Into<PathBuf>, trusted: bool) -> Self {
        Self {
            path: path.into(),
            trusted,
            keypair: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> Result<Arc<Keypair>, WalletError> {
        let mut slot = self.keypair.lock();
        if let Some(keypair) = slot.as_ref() {
            return Ok(keypair.clone());
        }

        let keypair = read_keypair_file(&self.path).map_err(|e| {
            WalletError::Rejected(format!(
                "Failed to read keypair {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let keypair = Arc::new(keypair);
        *slot = Some(keypair.clone());
        Ok(keypair)
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    fn ready_state(&self) -> WalletReadyState {
        if self.path.is_file() {
            WalletReadyState::Installed
        } else {
            WalletReadyState::NotDetected
        }
    }

    async fn connect(&self, only_if_trusted: bool) -> Result<Pubkey, WalletError> {
        if only_if_trusted && !self.trusted {
            return Err(WalletError::Rejected(
                "Wallet has not been approved for silent connect".to_string(),
            ));
        }
        Ok(self.load()?.pubkey())
    }

    async fn sign_transaction(&self, mut tx: Transaction) -> Result<Transaction, WalletError> {
        let keypair = self.load()?;
        let blockhash = tx.message.recent_blockhash;
        tx.try_sign(&[keypair.as_ref()], blockhash)
            .map_err(|e| WalletError::Signing(e.to_string()))?;
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{hash::Hash, message::Message, signature::write_keypair_file, system_instruction};

    fn keypair_on_disk() -> (tempfile::TempDir, PathBuf, Keypair) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        let keypair = Keypair::new();
        write_keypair_file(&keypair, &path).unwrap();
        (dir, path, keypair)
    }

    #[tokio::test]
    async fn test_missing_file_is_not_detected() {
        let wallet = KeypairWallet::new("/nonexistent/id.json", true);
        assert_eq!(wallet.ready_state(), WalletReadyState::NotDetected);
        assert!(matches!(
            wallet.connect(false).await,
            Err(WalletError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_untrusted_wallet_refuses_silent_connect() {
        let (_dir, path, keypair) = keypair_on_disk();
        let wallet = KeypairWallet::new(&path, false);
        assert_eq!(wallet.ready_state(), WalletReadyState::Installed);
        assert!(wallet.connect(true).await.is_err());
        assert_eq!(wallet.connect(false).await.unwrap(), keypair.pubkey());
    }

    #[tokio::test]
    async fn test_sign_transaction() {
        let (_dir, path, keypair) = keypair_on_disk();
        let wallet = KeypairWallet::new(&path, true);

        let ix = system_instruction::transfer(&keypair.pubkey(), &Pubkey::new_unique(), 1);
        let message = Message::new_with_blockhash(&[ix], Some(&keypair.pubkey()), &Hash::new_unique());
        let signed = wallet
            .sign_transaction(Transaction::new_unsigned(message))
            .await
            .unwrap();
        assert!(signed.is_signed());
        assert!(signed.verify().is_ok());
    }
}
