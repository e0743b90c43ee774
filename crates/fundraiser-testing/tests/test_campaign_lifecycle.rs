use fundraiser_client::{Campaign, ClientError};
use fundraiser_testing::{deterministic_keypair, TestFixture};
use solana_sdk::signature::Signer;

/// End-to-end campaign lifecycle across two wallets
///
/// **Test flow:**
/// 1. U1 creates "Miles Away" at its derived address
/// 2. Listing shows exactly that campaign with nothing raised
/// 3. U2 donates 0.2 SOL
/// 4. U2 tries to withdraw and is rejected by the program
/// 5. U1 withdraws half and the balance follows
#[tokio::test]
async fn test_campaign_lifecycle() {
    let test = TestFixture::default();
    let u1 = test.connected_client("U1").await;
    let u2 = test.connected_client("U2").await;
    let u1_pubkey = deterministic_keypair("U1").pubkey();

    // 1. Create
    let created = u1.create_campaign("Miles Away", "desc").await.unwrap();
    let address = created.address;
    assert_eq!(address, test.campaign_address_of("U1"));

    // 2. List
    let snapshot = u1.list_campaigns().await.unwrap();
    assert_eq!(
        snapshot.campaigns(),
        &[Campaign {
            address,
            owner: u1_pubkey,
            name: "Miles Away".to_string(),
            description: "desc".to_string(),
            amount_raised: 0,
        }]
    );

    // 3. Donate from another identity
    let donation = u2.donate(&address, 200_000_000).await.unwrap();
    assert_eq!(
        donation.campaign.as_ref().map(|c| c.amount_raised),
        Some(200_000_000)
    );
    let snapshot = u2.list_campaigns().await.unwrap();
    assert_eq!(snapshot.get(&address).unwrap().amount_raised, 200_000_000);

    // 4. Non-owner withdraw
    let err = u2.withdraw(&address, 100_000_000).await.unwrap_err();
    assert_eq!(err, ClientError::RejectedByProgram("not owner".to_string()));
    let snapshot = u2.list_campaigns().await.unwrap();
    assert_eq!(snapshot.get(&address).unwrap().amount_raised, 200_000_000);

    // 5. Owner withdraw
    let withdrawal = u1.withdraw(&address, 100_000_000).await.unwrap();
    assert_eq!(
        withdrawal.campaign.map(|c| c.amount_raised),
        Some(100_000_000)
    );
    let snapshot = u1.list_campaigns().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get(&address).unwrap().amount_raised, 100_000_000);

    println!("✅ Lifecycle complete: {} lamports remain", snapshot.total_raised());
}
