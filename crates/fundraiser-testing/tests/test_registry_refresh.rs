use fundraiser_client::{CampaignAccount, ClientError};
use fundraiser_testing::{TestFixture, CAMPAIGN_ACCOUNT_SPACE};
use solana_sdk::pubkey::Pubkey;

/// One well-formed and one malformed account: only the well-formed one
/// survives the refresh.
#[tokio::test]
async fn test_refresh_drops_malformed_record() {
    let test = TestFixture::default();
    let good = Pubkey::new_unique();
    let bad = Pubkey::new_unique();

    test.ledger.insert_raw_account(
        good,
        CampaignAccount {
            admin: Pubkey::new_unique().to_bytes(),
            name: "Well formed".to_string(),
            description: "ok".to_string(),
            amount_donated: 77,
        }
        .to_account_data(CAMPAIGN_ACCOUNT_SPACE)
        .unwrap(),
    );
    test.ledger.insert_raw_account(bad, vec![1, 2, 3, 4, 5]);

    let client = test.client("reader");
    let snapshot = client.list_campaigns().await.unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.campaigns()[0].address, good);
    assert_eq!(client.registry().get(&good).unwrap().amount_raised, 77);
    assert_eq!(client.registry().get(&bad), Err(ClientError::NotFound(bad)));
}

/// Accounts of another type (or schema version) carry a different
/// discriminator and are skipped.
#[tokio::test]
async fn test_refresh_skips_foreign_account_types() {
    let test = TestFixture::default();
    let mut foreign = CampaignAccount {
        admin: [3; 32],
        name: "Other".to_string(),
        description: String::new(),
        amount_donated: 1,
    }
    .to_account_data(CAMPAIGN_ACCOUNT_SPACE)
    .unwrap();
    foreign[..8].copy_from_slice(&[9; 8]);
    test.ledger.insert_raw_account(Pubkey::new_unique(), foreign);

    let snapshot = test.client("reader").list_campaigns().await.unwrap();
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn test_get_never_fetches() {
    let test = TestFixture::default();
    let owner = test.connected_client("owner").await;
    let address = owner.create_campaign("Cached", "").await.unwrap().address;

    let reader = test.client("reader");
    let fetches = test.ledger.fetch_calls();
    assert_eq!(
        reader.registry().get(&address),
        Err(ClientError::NotFound(address))
    );
    assert_eq!(test.ledger.fetch_calls(), fetches);

    reader.list_campaigns().await.unwrap();
    assert!(reader.registry().get(&address).is_ok());
}

/// The registry is a snapshot: changes made by other clients show up only
/// after an explicit refresh.
#[tokio::test]
async fn test_snapshot_is_stale_until_refresh() {
    let test = TestFixture::default();
    let owner = test.connected_client("owner").await;
    let donor = test.connected_client("donor").await;
    let address = owner.create_campaign("Stale", "").await.unwrap().address;

    owner.list_campaigns().await.unwrap();
    donor.donate(&address, 10).await.unwrap();

    assert_eq!(owner.registry().get(&address).unwrap().amount_raised, 0);
    owner.list_campaigns().await.unwrap();
    assert_eq!(owner.registry().get(&address).unwrap().amount_raised, 10);
}

#[tokio::test]
async fn test_list_during_outage_keeps_last_snapshot() {
    let test = TestFixture::default();
    let owner = test.connected_client("owner").await;
    let address = owner.create_campaign("Kept", "").await.unwrap().address;
    owner.list_campaigns().await.unwrap();

    test.ledger.set_network_down(true);
    let err = owner.list_campaigns().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert!(owner.registry().get(&address).is_ok());
}
