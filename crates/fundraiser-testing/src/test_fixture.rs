use {
    crate::{deterministic_keypair, MockLedger, MockWallet},
    fundraiser_client::{AddressFinder, CampaignOrchestrator},
    solana_sdk::{pubkey::Pubkey, signature::Signer},
    std::{collections::HashMap, sync::Arc},
};

pub type TestClient = CampaignOrchestrator<MockWallet, Arc<MockLedger>>;

/// One shared ledger, any number of wallet-specific clients on top of it.
pub struct TestFixture {
    pub ledger: Arc<MockLedger>,
    pub address_finder: AddressFinder,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new(AddressFinder::default())
    }
}

impl TestFixture {
    pub fn new(address_finder: AddressFinder) -> Self {
        Self {
            ledger: Arc::new(MockLedger::new(address_finder.clone())),
            address_finder,
        }
    }

    /// Client for `identity` that has not connected yet.
    pub fn client(&self, identity: &str) -> TestClient {
        self.client_with_wallet(MockWallet::new(deterministic_keypair(identity)))
    }

    pub fn client_with_wallet(&self, wallet: MockWallet) -> TestClient {
        CampaignOrchestrator::new(self.address_finder.clone(), wallet, self.ledger.clone())
    }

    /// Client for `identity` with an established session.
    pub async fn connected_client(&self, identity: &str) -> TestClient {
        let client = self.client(identity);
        client
            .connect()
            .await
            .unwrap_or_else(|e| panic!("Failed to connect {identity}: {e}"));
        client
    }

    pub fn campaign_address_of(&self, identity: &str) -> Pubkey {
        let owner = deterministic_keypair(identity).pubkey();
        self.address_finder
            .find_campaign_address(Some(&owner))
            .map(|(address, _)| address)
            .unwrap_or_else(|e| panic!("Failed to derive campaign of {identity}: {e}"))
    }

    /// Amount raised per campaign, straight from the ledger.
    pub fn balances(&self) -> HashMap<Pubkey, u64> {
        self.ledger.balances()
    }
}
