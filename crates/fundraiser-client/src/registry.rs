/*!
# Campaign Registry

Last known snapshot of campaign accounts. A refresh replaces the whole
snapshot in one swap; readers hold an `Arc` to whichever snapshot was current
when they asked and never see a half-built one. Staleness between refreshes is
accepted.
*/

use parking_lot::RwLock;
use solana_sdk::pubkey::Pubkey;
use std::{collections::HashMap, sync::Arc};
use tracing::{info, warn};

use crate::errors::{ClientError, ClientResult};
use crate::gateway::{LedgerGateway, LedgerTransport};
use crate::state::Campaign;

/// Immutable set of campaigns indexed by address.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CampaignSnapshot {
    campaigns: Vec<Campaign>,
    index: HashMap<Pubkey, usize>,
}

impl CampaignSnapshot {
    /// Duplicate addresses keep the first record.
    pub fn from_campaigns(campaigns: impl IntoIterator<Item = Campaign>) -> Self {
        let mut snapshot = Self::default();
        for campaign in campaigns {
            if snapshot.index.contains_key(&campaign.address) {
                warn!("Duplicate campaign account {} ignored", campaign.address);
                continue;
            }
            snapshot
                .index
                .insert(campaign.address, snapshot.campaigns.len());
            snapshot.campaigns.push(campaign);
        }
        snapshot
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn get(&self, address: &Pubkey) -> Option<&Campaign> {
        self.index.get(address).map(|&i| &self.campaigns[i])
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    pub fn total_raised(&self) -> u128 {
        self.campaigns
            .iter()
            .map(|c| u128::from(c.amount_raised))
            .sum()
    }
}

#[derive(Debug, Default)]
pub struct CampaignRegistry {
    current: RwLock<Arc<CampaignSnapshot>>,
}

impl CampaignRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and decode every program-owned account, then swap the result in.
    /// Records that fail to decode are skipped.
    pub async fn refresh<T: LedgerTransport>(
        &self,
        gateway: &LedgerGateway<T>,
    ) -> ClientResult<Arc<CampaignSnapshot>> {
        let accounts = gateway.fetch_accounts_owned_by_program().await?;
        let fetched = accounts.len();

        let campaigns = accounts
            .into_iter()
            .filter_map(|(address, data)| match Campaign::decode(address, &data) {
                Ok(campaign) => Some(campaign),
                Err(e) => {
                    warn!("Skipping account {}: {}", address, e);
                    None
                }
            });
        let snapshot = Arc::new(CampaignSnapshot::from_campaigns(campaigns));

        info!(
            "Registry refreshed: {} campaigns from {} accounts",
            snapshot.len(),
            fetched
        );
        *self.current.write() = snapshot.clone();
        Ok(snapshot)
    }

    /// Cached lookup only; never touches the network.
    pub fn get(&self, address: &Pubkey) -> ClientResult<Campaign> {
        self.snapshot()
            .get(address)
            .cloned()
            .ok_or(ClientError::NotFound(*address))
    }

    pub fn snapshot(&self) -> Arc<CampaignSnapshot> {
        self.current.read().clone()
    }
}
