use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use crate::constants::{CREATE_IX_DISCRIMINATOR, DONATE_IX_DISCRIMINATOR, WITHDRAW_IX_DISCRIMINATOR};
use crate::errors::{ClientError, ClientResult};
use crate::AddressFinder;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
struct CreateArgs {
    name: String,
    description: String,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
struct AmountArgs {
    amount: u64,
}

/// Instruction data understood by the campaign program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignInstruction {
    Create { name: String, description: String },
    Donate { amount: u64 },
    Withdraw { amount: u64 },
}

impl CampaignInstruction {
    pub fn data(&self) -> ClientResult<Vec<u8>> {
        let (discriminator, args) = match self {
            CampaignInstruction::Create { name, description } => (
                CREATE_IX_DISCRIMINATOR,
                borsh::to_vec(&CreateArgs {
                    name: name.clone(),
                    description: description.clone(),
                }),
            ),
            CampaignInstruction::Donate { amount } => (
                DONATE_IX_DISCRIMINATOR,
                borsh::to_vec(&AmountArgs { amount: *amount }),
            ),
            CampaignInstruction::Withdraw { amount } => (
                WITHDRAW_IX_DISCRIMINATOR,
                borsh::to_vec(&AmountArgs { amount: *amount }),
            ),
        };
        let args = args.map_err(|e| ClientError::Encode(e.to_string()))?;

        let mut data = Vec::with_capacity(discriminator.len() + args.len());
        data.extend_from_slice(&discriminator);
        data.extend_from_slice(&args);
        Ok(data)
    }

    /// Returns `None` for unknown discriminators or malformed arguments.
    pub fn unpack(data: &[u8]) -> Option<Self> {
        if data.len() < 8 {
            return None;
        }
        let (discriminator, args) = data.split_at(8);

        if discriminator == CREATE_IX_DISCRIMINATOR {
            let args = CreateArgs::try_from_slice(args).ok()?;
            Some(CampaignInstruction::Create {
                name: args.name,
                description: args.description,
            })
        } else if discriminator == DONATE_IX_DISCRIMINATOR {
            let args = AmountArgs::try_from_slice(args).ok()?;
            Some(CampaignInstruction::Donate {
                amount: args.amount,
            })
        } else if discriminator == WITHDRAW_IX_DISCRIMINATOR {
            let args = AmountArgs::try_from_slice(args).ok()?;
            Some(CampaignInstruction::Withdraw {
                amount: args.amount,
            })
        } else {
            None
        }
    }
}

pub fn build_create_campaign_ix(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    user: &Pubkey,
    name: &str,
    description: &str,
) -> ClientResult<Instruction> {
    let ix_data = CampaignInstruction::Create {
        name: name.to_string(),
        description: description.to_string(),
    };

    Ok(Instruction {
        program_id: address_finder.program_id,
        accounts: vec![
            AccountMeta::new(*campaign, false),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(address_finder.system_program_id, false),
        ],
        data: ix_data.data()?,
    })
}

pub fn build_donate_ix(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    user: &Pubkey,
    amount: u64,
) -> ClientResult<Instruction> {
    Ok(Instruction {
        program_id: address_finder.program_id,
        accounts: vec![
            AccountMeta::new(*campaign, false),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(address_finder.system_program_id, false),
        ],
        data: CampaignInstruction::Donate { amount }.data()?,
    })
}

pub fn build_withdraw_ix(
    address_finder: &AddressFinder,
    campaign: &Pubkey,
    user: &Pubkey,
    amount: u64,
) -> ClientResult<Instruction> {
    Ok(Instruction {
        program_id: address_finder.program_id,
        accounts: vec![
            AccountMeta::new(*campaign, false),
            AccountMeta::new(*user, true),
        ],
        data: CampaignInstruction::Withdraw { amount }.data()?,
    })
}
