use serde::{Deserialize, Serialize};
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    pubkey::Pubkey,
};
use std::{path::Path, str::FromStr};

use crate::address_finder::AddressFinder;
use crate::constants::{CAMPAIGN_SEED_PREFIX, DEFAULT_PROGRAM_ID, DEFAULT_RPC_URL};
use crate::errors::{ClientError, ClientResult};

/// Client configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Solana JSON-RPC endpoint
    pub rpc_url: String,

    /// Commitment level: processed, confirmed or finalized
    pub commitment: String,

    /// Campaign program id (base58)
    pub program_id: String,

    /// Seed prefix used for campaign PDAs
    pub campaign_namespace: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            commitment: "confirmed".to_string(),
            program_id: DEFAULT_PROGRAM_ID.to_string(),
            campaign_namespace: String::from_utf8_lossy(CAMPAIGN_SEED_PREFIX).into_owned(),
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> ClientResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ClientError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_yaml::from_str(&raw).map_err(|e| {
            ClientError::InvalidConfig(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        self.program_id()?;
        self.commitment_config()?;
        self.address_finder()?;
        Ok(())
    }

    pub fn program_id(&self) -> ClientResult<Pubkey> {
        Pubkey::from_str(&self.program_id).map_err(|e| {
            ClientError::InvalidConfig(format!("Invalid program id {}: {}", self.program_id, e))
        })
    }

    pub fn commitment_config(&self) -> ClientResult<CommitmentConfig> {
        let commitment = CommitmentLevel::from_str(&self.commitment).map_err(|_| {
            ClientError::InvalidConfig(format!("Invalid commitment level: {}", self.commitment))
        })?;
        Ok(CommitmentConfig { commitment })
    }

    pub fn address_finder(&self) -> ClientResult<AddressFinder> {
        AddressFinder::new(self.program_id()?, self.campaign_namespace.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        config.validate().unwrap();
        assert_eq!(config.program_id().unwrap(), DEFAULT_PROGRAM_ID);
        assert_eq!(config.address_finder().unwrap(), AddressFinder::default());
    }

    #[test]
    fn test_load_partial_yaml_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rpc_url: http://localhost:8899").unwrap();
        writeln!(file, "commitment: finalized").unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8899");
        assert_eq!(
            config.commitment_config().unwrap(),
            CommitmentConfig::finalized()
        );
        assert_eq!(config.campaign_namespace, "CAMPAIGN_DEMO");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = ClientConfig {
            program_id: "not-a-pubkey".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));

        let config = ClientConfig {
            commitment: "eventually".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));

        let config = ClientConfig {
            campaign_namespace: "x".repeat(40),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ClientError::InvalidSeed(_))));
    }

    #[test]
    fn test_malformed_yaml_is_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rpc_url: [unterminated").unwrap();

        let result = ClientConfig::load(file.path());
        assert!(matches!(result, Err(ClientError::InvalidConfig(ref msg)) if msg.starts_with("Failed to parse")));
    }

    #[test]
    fn test_missing_file() {
        let result = ClientConfig::load(Path::new("/nonexistent/fundraiser.yaml"));
        assert!(matches!(result, Err(ClientError::InvalidConfig(_))));
    }
}
