use async_trait::async_trait;
use solana_client::{client_error::ClientError as RpcClientError, nonblocking::rpc_client::RpcClient};
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::{Transaction, TransactionError},
};
use std::sync::Arc;
use tracing::warn;

use crate::gateway::{LedgerTransport, TransportError};

/// [`LedgerTransport`] over a Solana JSON-RPC endpoint.
pub struct RpcTransport {
    rpc_client: Arc<RpcClient>,
}

impl RpcTransport {
    pub fn new(rpc_url: String, commitment: CommitmentConfig) -> Self {
        Self::with_client(Arc::new(RpcClient::new_with_commitment(rpc_url, commitment)))
    }

    pub fn with_client(rpc_client: Arc<RpcClient>) -> Self {
        Self { rpc_client }
    }

    pub fn rpc_client(&self) -> &RpcClient {
        &self.rpc_client
    }
}

/// A transaction error (including a failed preflight simulation) means the
/// program or runtime refused the request. An expired blockhash is the
/// exception: the request never got evaluated.
pub(crate) fn classify_rpc_error(err: RpcClientError) -> TransportError {
    match err.get_transaction_error() {
        Some(TransactionError::BlockhashNotFound) | None => {
            TransportError::Network(err.to_string())
        }
        Some(tx_err) => TransportError::Rejected(tx_err.to_string()),
    }
}

#[async_trait]
impl LedgerTransport for RpcTransport {
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, TransportError> {
        let accounts = self
            .rpc_client
            .get_program_accounts(program_id)
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(accounts
            .into_iter()
            .map(|(address, account)| (address, account.data))
            .collect())
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, TransportError> {
        self.rpc_client
            .get_latest_blockhash()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))
    }

    async fn send_and_confirm_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, TransportError> {
        self.rpc_client
            .send_and_confirm_transaction(tx)
            .await
            .map_err(|e| {
                warn!("Transaction attempt failed: {}", e);
                classify_rpc_error(e)
            })
    }
}
