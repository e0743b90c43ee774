/*!
# Fundraiser Client

Client-side orchestration for fundraising campaigns stored as accounts of a
Solana program: wallet connection, campaign discovery, and create / donate /
withdraw submissions.

## Architecture

- **AddressFinder**: deterministic campaign PDA derivation
- **WalletSession**: connection state machine over an external [`WalletAdapter`]
- **LedgerGateway**: the network boundary, over a [`LedgerTransport`]
- **CampaignRegistry**: snapshot of decoded campaign accounts
- **CampaignOrchestrator**: the operation surface consumed by front ends

## Usage

```rust,no_run
use fundraiser_client::{
    CampaignOrchestrator, ClientConfig, ClientResult, KeypairWallet, RpcTransport,
};

async fn example() -> ClientResult<()> {
    let config = ClientConfig::default();
    let transport = RpcTransport::new(config.rpc_url.clone(), config.commitment_config()?);
    let wallet = KeypairWallet::new("/home/me/.config/solana/id.json", true);
    let client = CampaignOrchestrator::new(config.address_finder()?, wallet, transport);

    if client.try_auto_connect().await?.is_none() {
        client.connect().await?;
    }

    let created = client.create_campaign("Miles Away", "desc").await?;
    client.donate(&created.address, 200_000_000).await?;

    for campaign in client.list_campaigns().await?.campaigns() {
        println!("{}: {} lamports", campaign.name, campaign.amount_raised);
    }
    Ok(())
}
```
*/

pub mod address_finder;
pub mod config;
pub mod constants;
pub mod errors;
pub mod gateway;
pub mod instruction_builders;
pub mod keypair_wallet;
pub mod orchestrator;
pub mod registry;
pub mod rpc_transport;
pub mod state;
pub mod wallet;

pub use address_finder::AddressFinder;
pub use config::ClientConfig;
pub use errors::{ClientError, ClientResult, DecodeError, WalletError};
pub use gateway::{LedgerGateway, LedgerTransport, TransportError};
pub use instruction_builders::*;
pub use keypair_wallet::KeypairWallet;
pub use orchestrator::{
    CampaignOrchestrator, ConfirmedTransfer, CreatedCampaign, PendingRequest, RequestKind,
};
pub use registry::{CampaignRegistry, CampaignSnapshot};
pub use rpc_transport::RpcTransport;
pub use state::{Campaign, CampaignAccount};
pub use wallet::{SessionStatus, WalletAdapter, WalletReadyState, WalletSession};
