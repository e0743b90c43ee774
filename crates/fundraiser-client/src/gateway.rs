/*!
# Ledger Gateway

The only network boundary of the client. [`LedgerTransport`] is the raw ledger
connection; [`LedgerGateway`] turns it into the two operations the rest of the
crate needs: listing program-owned accounts and submitting one signed
instruction.

Submission surfaces three outcomes: `Ok(signature)` (confirmed),
[`ClientError::RejectedByProgram`] (terminal) and [`ClientError::Network`]
(transport-level). Nothing here retries.
*/

use async_trait::async_trait;
use solana_sdk::{
    hash::Hash, instruction::Instruction, message::Message, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::errors::{ClientError, ClientResult};
use crate::wallet::{WalletAdapter, WalletSession};

/// Transport failures, already classified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Rejected(String),
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(msg) => ClientError::Network(msg),
            TransportError::Rejected(reason) => ClientError::RejectedByProgram(reason),
        }
    }
}

#[async_trait]
pub trait LedgerTransport: Send + Sync {
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, TransportError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, TransportError>;

    /// Blocks until the ledger confirms or terminally rejects the transaction.
    async fn send_and_confirm_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, TransportError>;
}

#[async_trait]
impl<T: LedgerTransport + ?Sized> LedgerTransport for Arc<T> {
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, TransportError> {
        (**self).get_program_accounts(program_id).await
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, TransportError> {
        (**self).get_latest_blockhash().await
    }

    async fn send_and_confirm_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, TransportError> {
        (**self).send_and_confirm_transaction(tx).await
    }
}

pub struct LedgerGateway<T> {
    transport: T,
    program_id: Pubkey,
}

impl<T: LedgerTransport> LedgerGateway<T> {
    pub fn new(transport: T, program_id: Pubkey) -> Self {
        Self {
            transport,
            program_id,
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// All accounts currently owned by the program, in no particular order.
    pub async fn fetch_accounts_owned_by_program(&self) -> ClientResult<Vec<(Pubkey, Vec<u8>)>> {
        match self.transport.get_program_accounts(&self.program_id).await {
            Ok(accounts) => {
                debug!(
                    "Fetched {} accounts owned by {}",
                    accounts.len(),
                    self.program_id
                );
                Ok(accounts)
            }
            // Reads cannot be rejected by the program; anything here is transport
            Err(e) => Err(ClientError::Network(e.to_string())),
        }
    }

    /// Sign `instruction` through `signer` with the session identity as fee
    /// payer, then send and wait for confirmation.
    pub async fn submit<W: WalletAdapter>(
        &self,
        instruction: Instruction,
        signer: &WalletSession<W>,
    ) -> ClientResult<Signature> {
        let payer = signer.require_identity()?;

        let recent_blockhash = self.transport.get_latest_blockhash().await?;
        let message = Message::new_with_blockhash(&[instruction], Some(&payer), &recent_blockhash);
        let tx = signer
            .sign_transaction(Transaction::new_unsigned(message))
            .await?;

        let signature = self.transport.send_and_confirm_transaction(&tx).await?;
        info!(
            "Transaction confirmed: https://explorer.solana.com/tx/{}",
            signature
        );
        Ok(signature)
    }
}
