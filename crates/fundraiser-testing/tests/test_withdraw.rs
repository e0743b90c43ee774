use fundraiser_client::ClientError;
use fundraiser_testing::TestFixture;

async fn funded_campaign(test: &TestFixture, amount: u64) -> solana_sdk::pubkey::Pubkey {
    let owner = test.connected_client("owner").await;
    let donor = test.connected_client("donor").await;
    let address = owner.create_campaign("Funded", "").await.unwrap().address;
    donor.donate(&address, amount).await.unwrap();
    address
}

/// Ownership is not pre-checked client side: the non-owner's request goes
/// out and comes back rejected.
#[tokio::test]
async fn test_non_owner_withdraw_rejected_and_balance_unchanged() {
    let test = TestFixture::default();
    let address = funded_campaign(&test, 1_000).await;
    let intruder = test.connected_client("intruder").await;

    let sends_before = test.ledger.send_calls();
    let err = intruder.withdraw(&address, 500).await.unwrap_err();

    assert_eq!(err, ClientError::RejectedByProgram("not owner".to_string()));
    assert_eq!(test.ledger.send_calls(), sends_before + 1);

    let snapshot = intruder.list_campaigns().await.unwrap();
    assert_eq!(snapshot.get(&address).unwrap().amount_raised, 1_000);
}

#[tokio::test]
async fn test_owner_withdraw_reduces_balance() {
    let test = TestFixture::default();
    let address = funded_campaign(&test, 1_000).await;
    let owner = test.connected_client("owner").await;

    let receipt = owner.withdraw(&address, 400).await.unwrap();
    assert_eq!(receipt.campaign.unwrap().amount_raised, 600);
    assert_eq!(owner.registry().get(&address).unwrap().amount_raised, 600);
}

#[tokio::test]
async fn test_overdraw_rejected() {
    let test = TestFixture::default();
    let address = funded_campaign(&test, 1_000).await;
    let owner = test.connected_client("owner").await;

    let err = owner.withdraw(&address, 1_001).await.unwrap_err();
    assert!(matches!(err, ClientError::RejectedByProgram(_)));
    assert_eq!(test.balances().get(&address), Some(&1_000));
}
