/*!
# Campaign Account Schema

On-chain layout: 8-byte discriminator followed by the Borsh encoding of
[`CampaignAccount`]. Accounts are allocated with headroom, so bytes past the
encoded body are ignored.
*/

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::constants::CAMPAIGN_ACCOUNT_DISCRIMINATOR;
use crate::errors::{ClientError, ClientResult, DecodeError};

/// Raw account body as stored by the program.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct CampaignAccount {
    pub admin: [u8; 32],
    pub name: String,
    pub description: String,
    pub amount_donated: u64,
}

impl CampaignAccount {
    /// Discriminator plus body, padded with zeros up to `space` bytes.
    pub fn to_account_data(&self, space: usize) -> ClientResult<Vec<u8>> {
        let body = borsh::to_vec(self).map_err(|e| ClientError::Encode(e.to_string()))?;
        let mut data = CAMPAIGN_ACCOUNT_DISCRIMINATOR.to_vec();
        data.extend_from_slice(&body);
        if data.len() < space {
            data.resize(space, 0);
        }
        Ok(data)
    }
}

/// A decoded campaign, identified by its account address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub address: Pubkey,
    pub owner: Pubkey,
    pub name: String,
    pub description: String,
    /// Lamports
    pub amount_raised: u64,
}

impl Campaign {
    pub fn decode(address: Pubkey, data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < CAMPAIGN_ACCOUNT_DISCRIMINATOR.len() {
            return Err(DecodeError::TooShort { len: data.len() });
        }

        let (discriminator, mut body) = data.split_at(CAMPAIGN_ACCOUNT_DISCRIMINATOR.len());
        if discriminator != CAMPAIGN_ACCOUNT_DISCRIMINATOR {
            let mut found = [0u8; 8];
            found.copy_from_slice(discriminator);
            return Err(DecodeError::UnknownDiscriminator(found));
        }

        let account = CampaignAccount::deserialize(&mut body)
            .map_err(|e| DecodeError::Layout(e.to_string()))?;

        Ok(Self {
            address,
            owner: Pubkey::new_from_array(account.admin),
            name: account.name,
            description: account.description,
            amount_raised: account.amount_donated,
        })
    }
}
