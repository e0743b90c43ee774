/*!
# Fundraiser Testing

Test support for the fundraiser client: an in-memory ledger that runs the
campaign program's rules ([`MockLedger`]), a scriptable wallet
([`MockWallet`]), and a [`TestFixture`] that builds clients over one shared
ledger.
*/

mod mock_ledger;
mod mock_wallet;
mod test_fixture;

pub use mock_ledger::{MockLedger, CAMPAIGN_ACCOUNT_SPACE};
pub use mock_wallet::MockWallet;
pub use test_fixture::{TestClient, TestFixture};

use {
    sha2::{Digest, Sha256},
    solana_sdk::signature::Keypair,
    solana_sdk::signer::keypair::keypair_from_seed,
};

/// Same identifier, same keypair.
pub fn deterministic_keypair(identifier: &str) -> Keypair {
    let seed = Sha256::digest(identifier.as_bytes());
    keypair_from_seed(&seed).unwrap_or_else(|e| panic!("Invalid seed for {identifier}: {e}"))
}
