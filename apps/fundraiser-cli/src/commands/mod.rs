use crate::error::{CliError, CliResult};
use fundraiser_client::{CampaignOrchestrator, ClientError, KeypairWallet, RpcTransport};
use solana_sdk::pubkey::Pubkey;
use std::{future::Future, str::FromStr, time::Duration};

pub mod create_campaign;
pub mod donate;
pub mod list_campaigns;
pub mod whoami;
pub mod withdraw;

pub type CliClient = CampaignOrchestrator<KeypairWallet, RpcTransport>;

pub struct Context {
    pub client: CliClient,
    /// Keypair given explicitly, connect with approval instead of silently
    pub interactive: bool,
    pub timeout: Option<Duration>,
}

impl Context {
    /// Establish the wallet session or fail with `NotConnected`.
    pub async fn connect(&self) -> CliResult<Pubkey> {
        let identity = if self.interactive {
            self.client.connect().await?
        } else {
            self.client
                .try_auto_connect()
                .await?
                .ok_or(ClientError::NotConnected)?
        };
        println!("🔑 Wallet: {}", identity);
        Ok(identity)
    }

    pub async fn run<T, F>(&self, fut: F) -> CliResult<T>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        with_timeout(self.timeout, fut).await
    }
}

/// Waits for `fut`, abandoning it after `timeout`. An abandoned submission may
/// still be confirmed by the ledger.
pub async fn with_timeout<T, F>(timeout: Option<Duration>, fut: F) -> CliResult<T>
where
    F: Future<Output = Result<T, ClientError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| CliError::TimedOut(limit))?
            .map_err(CliError::from),
        None => fut.await.map_err(CliError::from),
    }
}

pub fn parse_address(raw: &str) -> CliResult<Pubkey> {
    Pubkey::from_str(raw)
        .map_err(|e| CliError::InvalidArgument(format!("Invalid campaign address {}: {}", raw, e)))
}

pub fn format_sol(lamports: u64) -> String {
    format!("{:.9} SOL", solana_sdk::native_token::lamports_to_sol(lamports))
}

pub fn explain(err: &ClientError) -> Option<&'static str> {
    match err {
        ClientError::Network(_) => Some("The ledger could not be reached; retry when ready."),
        ClientError::RejectedByProgram(_) => Some("The program refused the request."),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let address = Pubkey::new_unique();
        assert_eq!(parse_address(&address.to_string()).unwrap(), address);
        assert!(matches!(
            parse_address("not-an-address"),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_format_sol() {
        assert_eq!(format_sol(200_000_000), "0.200000000 SOL");
        assert_eq!(format_sol(0), "0.000000000 SOL");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_abandons_wait() {
        let limit = Duration::from_secs(30);
        let result: CliResult<()> =
            with_timeout(Some(limit), std::future::pending::<Result<(), ClientError>>()).await;
        assert!(matches!(result, Err(CliError::TimedOut(d)) if d == limit));
    }

    #[tokio::test]
    async fn test_client_error_passes_through() {
        let result: CliResult<()> = with_timeout(None, async {
            Err(ClientError::RejectedByProgram("not owner".to_string()))
        })
        .await;
        assert!(matches!(
            result,
            Err(CliError::Client(ClientError::RejectedByProgram(ref reason))) if reason == "not owner"
        ));
    }

    #[tokio::test]
    async fn test_completes_within_timeout() {
        let result = with_timeout(Some(Duration::from_secs(5)), async { Ok(7u64) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
