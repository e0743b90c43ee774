use solana_sdk::pubkey::{Pubkey, MAX_SEED_LEN};
use solana_sdk::system_program::ID as SYSTEM_PROGRAM_ID;

use crate::constants::{CAMPAIGN_SEED_PREFIX, DEFAULT_PROGRAM_ID};
use crate::errors::{ClientError, ClientResult};

/// Derives program-owned campaign addresses. Pure: no state beyond the
/// program id and namespace, no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFinder {
    pub program_id: Pubkey,
    pub system_program_id: Pubkey,
    namespace: Vec<u8>,
}

impl AddressFinder {
    pub fn new(program_id: Pubkey, namespace: impl Into<Vec<u8>>) -> ClientResult<Self> {
        let namespace = namespace.into();
        if namespace.is_empty() || namespace.len() > MAX_SEED_LEN {
            return Err(ClientError::InvalidSeed(format!(
                "namespace must be 1..={} bytes, got {}",
                MAX_SEED_LEN,
                namespace.len()
            )));
        }

        Ok(Self {
            program_id,
            system_program_id: SYSTEM_PROGRAM_ID,
            namespace,
        })
    }

    pub fn namespace(&self) -> &[u8] {
        &self.namespace
    }

    /// Campaign PDA for `owner`: seeds `[namespace, owner]`.
    pub fn find_campaign_address(&self, owner: Option<&Pubkey>) -> ClientResult<(Pubkey, u8)> {
        let owner = owner
            .ok_or_else(|| ClientError::InvalidSeed("owner identity is absent".to_string()))?;

        Pubkey::try_find_program_address(
            &[self.namespace.as_slice(), owner.as_ref()],
            &self.program_id,
        )
        .ok_or_else(|| {
            ClientError::InvalidSeed(format!("no viable bump for campaign of {}", owner))
        })
    }
}

impl Default for AddressFinder {
    fn default() -> Self {
        Self {
            program_id: DEFAULT_PROGRAM_ID,
            system_program_id: SYSTEM_PROGRAM_ID,
            namespace: CAMPAIGN_SEED_PREFIX.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let finder = AddressFinder::default();
        let owner = Pubkey::new_unique();

        let (first, bump) = finder.find_campaign_address(Some(&owner)).unwrap();
        let (second, _) = finder.find_campaign_address(Some(&owner)).unwrap();
        assert_eq!(first, second);

        let expected = Pubkey::create_program_address(
            &[CAMPAIGN_SEED_PREFIX, owner.as_ref(), &[bump]],
            &DEFAULT_PROGRAM_ID,
        )
        .unwrap();
        assert_eq!(first, expected);
    }

    #[test]
    fn test_distinct_owners_get_distinct_addresses() {
        let finder = AddressFinder::default();
        let (a, _) = finder
            .find_campaign_address(Some(&Pubkey::new_unique()))
            .unwrap();
        let (b, _) = finder
            .find_campaign_address(Some(&Pubkey::new_unique()))
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_namespace_and_program_change_address() {
        let owner = Pubkey::new_unique();
        let default = AddressFinder::default();
        let other_ns = AddressFinder::new(DEFAULT_PROGRAM_ID, b"OTHER".to_vec()).unwrap();
        let other_program = AddressFinder::new(Pubkey::new_unique(), CAMPAIGN_SEED_PREFIX).unwrap();

        let (base, _) = default.find_campaign_address(Some(&owner)).unwrap();
        let (by_ns, _) = other_ns.find_campaign_address(Some(&owner)).unwrap();
        let (by_program, _) = other_program.find_campaign_address(Some(&owner)).unwrap();
        assert_ne!(base, by_ns);
        assert_ne!(base, by_program);
    }

    #[test]
    fn test_absent_owner_is_invalid_seed() {
        let finder = AddressFinder::default();
        assert!(matches!(
            finder.find_campaign_address(None),
            Err(ClientError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_oversized_namespace_rejected() {
        let result = AddressFinder::new(DEFAULT_PROGRAM_ID, vec![b'x'; MAX_SEED_LEN + 1]);
        assert!(matches!(result, Err(ClientError::InvalidSeed(_))));

        let result = AddressFinder::new(DEFAULT_PROGRAM_ID, Vec::new());
        assert!(matches!(result, Err(ClientError::InvalidSeed(_))));
    }
}
