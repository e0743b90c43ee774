use solana_sdk::pubkey::Pubkey;

/// Default campaign program id (`DBBB4zxkxCSsipoGjgtQx16TJ68n5HBpuAveePqdbPPQ`).
pub const DEFAULT_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    180, 231, 141, 246, 21, 47, 89, 175, 149, 64, 180, 213, 204, 105, 185, 40, 7, 245, 142, 199,
    171, 196, 83, 182, 126, 63, 123, 15, 50, 217, 76, 187,
]);

/// Seed prefix for campaign PDA derivation
pub const CAMPAIGN_SEED_PREFIX: &[u8] = b"CAMPAIGN_DEMO";

/// `sha256("account:Campaign")[..8]`
pub const CAMPAIGN_ACCOUNT_DISCRIMINATOR: [u8; 8] = [50, 40, 49, 11, 157, 220, 229, 192];

/// `sha256("global:create")[..8]`
pub const CREATE_IX_DISCRIMINATOR: [u8; 8] = [24, 30, 200, 40, 5, 28, 7, 119];

/// `sha256("global:donate")[..8]`
pub const DONATE_IX_DISCRIMINATOR: [u8; 8] = [121, 186, 218, 211, 73, 70, 196, 180];

/// `sha256("global:withdraw")[..8]`
pub const WITHDRAW_IX_DISCRIMINATOR: [u8; 8] = [183, 18, 70, 156, 148, 109, 161, 34];

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
