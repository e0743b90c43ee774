/*!
# Campaign Orchestrator

Top-level operation surface: connect, create, donate, withdraw, list.

Validation and the wallet gate run before any I/O. Mutations are never
retried here; a `Network` error leaves the decision to the caller since a
blind resubmit can duplicate intent. Concurrent calls are not serialized:
each produces its own submission.
*/

use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Signature};
use std::{sync::Arc, time::Instant};
use tracing::{debug, info, warn};

use crate::address_finder::AddressFinder;
use crate::errors::{ClientError, ClientResult};
use crate::gateway::{LedgerGateway, LedgerTransport};
use crate::instruction_builders::{build_create_campaign_ix, build_donate_ix, build_withdraw_ix};
use crate::registry::{CampaignRegistry, CampaignSnapshot};
use crate::state::Campaign;
use crate::wallet::{WalletAdapter, WalletSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Create,
    Donate,
    Withdraw,
}

/// One in-flight mutation, alive for the duration of a single call.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub kind: RequestKind,
    pub target: Option<Pubkey>,
    pub amount: Option<u64>,
    pub submitted_at: Instant,
}

impl PendingRequest {
    fn new(kind: RequestKind, target: Option<Pubkey>, amount: Option<u64>) -> Self {
        Self {
            kind,
            target,
            amount,
            submitted_at: Instant::now(),
        }
    }

    fn finish<T>(&self, result: &ClientResult<T>) {
        let elapsed = self.submitted_at.elapsed();
        match result {
            Ok(_) => info!(
                "{:?} request confirmed in {:?} (target: {:?}, amount: {:?})",
                self.kind, elapsed, self.target, self.amount
            ),
            Err(e) => warn!(
                "{:?} request failed after {:?} (target: {:?}): {}",
                self.kind, elapsed, self.target, e
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCampaign {
    pub address: Pubkey,
    pub signature: Signature,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedTransfer {
    pub signature: Signature,
    /// Refreshed record; `None` if the post-confirmation refresh failed or the
    /// account was not in the refreshed set.
    pub campaign: Option<Campaign>,
}

pub struct CampaignOrchestrator<W, T> {
    address_finder: AddressFinder,
    session: WalletSession<W>,
    gateway: LedgerGateway<T>,
    registry: CampaignRegistry,
}

impl<W: WalletAdapter, T: LedgerTransport> CampaignOrchestrator<W, T> {
    pub fn new(address_finder: AddressFinder, wallet: W, transport: T) -> Self {
        let gateway = LedgerGateway::new(transport, address_finder.program_id);
        Self {
            address_finder,
            session: WalletSession::new(wallet),
            gateway,
            registry: CampaignRegistry::new(),
        }
    }

    pub fn session(&self) -> &WalletSession<W> {
        &self.session
    }

    pub fn registry(&self) -> &CampaignRegistry {
        &self.registry
    }

    pub fn gateway(&self) -> &LedgerGateway<T> {
        &self.gateway
    }

    pub fn address_finder(&self) -> &AddressFinder {
        &self.address_finder
    }

    pub async fn try_auto_connect(&self) -> ClientResult<Option<Pubkey>> {
        self.session.try_auto_connect().await
    }

    pub async fn connect(&self) -> ClientResult<Pubkey> {
        self.session.connect().await
    }

    /// Creates the caller's campaign. Does not refresh the registry. An
    /// existing campaign for the same identity comes back as a program
    /// rejection.
    pub async fn create_campaign(
        &self,
        name: &str,
        description: &str,
    ) -> ClientResult<CreatedCampaign> {
        let identity = self.session.require_identity()?;
        let (address, _bump) = self
            .address_finder
            .find_campaign_address(Some(&identity))?;

        let request = PendingRequest::new(RequestKind::Create, Some(address), None);
        debug!("Creating campaign {:?} at {}", name, address);

        let ix = build_create_campaign_ix(
            &self.address_finder,
            &address,
            &identity,
            name,
            description,
        )?;
        let result = self
            .gateway
            .submit(ix, &self.session)
            .await
            .map(|signature| CreatedCampaign { address, signature });

        request.finish(&result);
        result
    }

    pub async fn donate(&self, address: &Pubkey, amount: u64) -> ClientResult<ConfirmedTransfer> {
        let identity = self.session.require_identity()?;
        validate_amount(amount)?;

        let request = PendingRequest::new(RequestKind::Donate, Some(*address), Some(amount));
        let ix = build_donate_ix(&self.address_finder, address, &identity, amount)?;
        self.submit_and_refresh(request, ix).await
    }

    /// Ownership is enforced by the program; a non-owner gets
    /// `RejectedByProgram`.
    pub async fn withdraw(
        &self,
        address: &Pubkey,
        amount: u64,
    ) -> ClientResult<ConfirmedTransfer> {
        let identity = self.session.require_identity()?;
        validate_amount(amount)?;

        let request = PendingRequest::new(RequestKind::Withdraw, Some(*address), Some(amount));
        let ix = build_withdraw_ix(&self.address_finder, address, &identity, amount)?;
        self.submit_and_refresh(request, ix).await
    }

    pub async fn list_campaigns(&self) -> ClientResult<Arc<CampaignSnapshot>> {
        self.registry.refresh(&self.gateway).await
    }

    async fn submit_and_refresh(
        &self,
        request: PendingRequest,
        ix: Instruction,
    ) -> ClientResult<ConfirmedTransfer> {
        let result = self.gateway.submit(ix, &self.session).await;
        request.finish(&result);
        let signature = result?;

        // The submission landed; a failed refresh must not read as a failed transfer
        let campaign = match self.registry.refresh(&self.gateway).await {
            Ok(snapshot) => request.target.and_then(|a| snapshot.get(&a).cloned()),
            Err(e) => {
                warn!("Refresh after {} failed: {}", signature, e);
                None
            }
        };

        Ok(ConfirmedTransfer {
            signature,
            campaign,
        })
    }
}

fn validate_amount(amount: u64) -> ClientResult<()> {
    if amount == 0 {
        return Err(ClientError::InvalidAmount(amount));
    }
    Ok(())
}
