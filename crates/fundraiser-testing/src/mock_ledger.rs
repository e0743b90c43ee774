use {
    async_trait::async_trait,
    fundraiser_client::{
        AddressFinder, Campaign, CampaignAccount, CampaignInstruction, LedgerTransport, TransportError,
    },
    parking_lot::Mutex,
    solana_sdk::{
        hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
    },
    std::{
        collections::{HashMap, HashSet},
        sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    tracing::debug,
};

/// Bytes allocated per campaign account, matching the program's `space`.
pub const CAMPAIGN_ACCOUNT_SPACE: usize = 1024;

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<Pubkey, Vec<u8>>,
    processed: HashSet<Signature>,
}

/// In-memory ledger running the campaign program's rules.
///
/// Accounts are stored in their on-chain byte layout so reads exercise the
/// real decoder. Every trait call is counted, which lets tests assert that
/// nothing reached the network.
pub struct MockLedger {
    address_finder: AddressFinder,
    state: Mutex<LedgerState>,

    network_down: AtomicBool,
    failing_fetches: AtomicUsize,
    fetch_calls: AtomicUsize,
    blockhash_calls: AtomicUsize,
    send_calls: AtomicUsize,
}

impl MockLedger {
    pub fn new(address_finder: AddressFinder) -> Self {
        Self {
            address_finder,
            state: Mutex::new(LedgerState::default()),
            network_down: AtomicBool::new(false),
            failing_fetches: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            blockhash_calls: AtomicUsize::new(0),
            send_calls: AtomicUsize::new(0),
        }
    }

    pub fn program_id(&self) -> Pubkey {
        self.address_finder.program_id
    }

    /// While down, every call fails with a transport error.
    pub fn set_network_down(&self, down: bool) {
        self.network_down.store(down, Ordering::SeqCst);
    }

    /// The next `count` account fetches fail; submissions are unaffected.
    pub fn fail_next_fetches(&self, count: usize) {
        self.failing_fetches.store(count, Ordering::SeqCst);
    }

    /// Store arbitrary bytes as a program-owned account.
    pub fn insert_raw_account(&self, address: Pubkey, data: Vec<u8>) {
        self.state.lock().accounts.insert(address, data);
    }

    pub fn account_data(&self, address: &Pubkey) -> Option<Vec<u8>> {
        self.state.lock().accounts.get(address).cloned()
    }

    pub fn account_count(&self) -> usize {
        self.state.lock().accounts.len()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn send_calls(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn network_calls(&self) -> usize {
        self.fetch_calls() + self.blockhash_calls.load(Ordering::SeqCst) + self.send_calls()
    }

    /// Amount raised per decodable campaign account.
    pub fn balances(&self) -> HashMap<Pubkey, u64> {
        self.state
            .lock()
            .accounts
            .iter()
            .filter_map(|(address, data)| {
                Campaign::decode(*address, data)
                    .ok()
                    .map(|campaign| (*address, campaign.amount_raised))
            })
            .collect()
    }

    fn check_network(&self) -> Result<(), TransportError> {
        if self.network_down.load(Ordering::SeqCst) {
            return Err(TransportError::Network(
                "error sending request: connection refused".to_string(),
            ));
        }
        Ok(())
    }

    fn process_transaction(&self, tx: &Transaction) -> Result<Signature, TransportError> {
        tx.verify()
            .map_err(|e| TransportError::Rejected(format!("signature verification: {}", e)))?;

        let signature = *tx
            .signatures
            .first()
            .ok_or_else(|| TransportError::Rejected("transaction has no signatures".to_string()))?;
        let mut state = self.state.lock();
        if state.processed.contains(&signature) {
            return Err(TransportError::Rejected(
                "This transaction has already been processed".to_string(),
            ));
        }

        // Instructions apply to a scratch copy; any failure discards them all
        let mut accounts = state.accounts.clone();
        let message = &tx.message;
        for (ix_index, ix) in message.instructions.iter().enumerate() {
            let key = |i: usize| -> Result<(Pubkey, bool), TransportError> {
                let index = *ix.accounts.get(i).ok_or_else(|| {
                    TransportError::Rejected(format!("instruction {}: missing account {}", ix_index, i))
                })? as usize;
                let pubkey = *message.account_keys.get(index).ok_or_else(|| {
                    TransportError::Rejected(format!("instruction {}: bad account index", ix_index))
                })?;
                Ok((pubkey, message.is_signer(index)))
            };

            let program_id = *message
                .account_keys
                .get(ix.program_id_index as usize)
                .ok_or_else(|| TransportError::Rejected("bad program id index".to_string()))?;
            if program_id != self.address_finder.program_id {
                return Err(TransportError::Rejected(format!(
                    "instruction {}: unsupported program {}",
                    ix_index, program_id
                )));
            }

            let instruction = CampaignInstruction::unpack(&ix.data).ok_or_else(|| {
                TransportError::Rejected("InstructionFallbackNotFound".to_string())
            })?;
            let (campaign, _) = key(0)?;
            let (user, user_signed) = key(1)?;
            if !user_signed {
                return Err(TransportError::Rejected("AccountNotSigner".to_string()));
            }

            self.apply(&mut accounts, instruction, campaign, user)?;
        }

        state.accounts = accounts;
        state.processed.insert(signature);
        Ok(signature)
    }

    fn apply(
        &self,
        accounts: &mut HashMap<Pubkey, Vec<u8>>,
        instruction: CampaignInstruction,
        campaign: Pubkey,
        user: Pubkey,
    ) -> Result<(), TransportError> {
        let rejected = |reason: &str| TransportError::Rejected(reason.to_string());

        match instruction {
            CampaignInstruction::Create { name, description } => {
                let (expected, _) = self
                    .address_finder
                    .find_campaign_address(Some(&user))
                    .map_err(|e| rejected(&e.to_string()))?;
                if expected != campaign {
                    return Err(rejected("ConstraintSeeds"));
                }
                if accounts.contains_key(&campaign) {
                    return Err(rejected("account already in use"));
                }

                let account = CampaignAccount {
                    admin: user.to_bytes(),
                    name,
                    description,
                    amount_donated: 0,
                };
                accounts.insert(campaign, encode(&account)?);
                debug!("Created campaign {} for {}", campaign, user);
            }
            CampaignInstruction::Donate { amount } => {
                let mut account = load(accounts, &campaign)?;
                account.amount_donated = account
                    .amount_donated
                    .checked_add(amount)
                    .ok_or_else(|| rejected("arithmetic overflow"))?;
                accounts.insert(campaign, encode(&account)?);
            }
            CampaignInstruction::Withdraw { amount } => {
                let mut account = load(accounts, &campaign)?;
                if account.admin != user.to_bytes() {
                    return Err(rejected("not owner"));
                }
                account.amount_donated = account
                    .amount_donated
                    .checked_sub(amount)
                    .ok_or_else(|| rejected("insufficient funds"))?;
                accounts.insert(campaign, encode(&account)?);
            }
        }
        Ok(())
    }
}

fn encode(account: &CampaignAccount) -> Result<Vec<u8>, TransportError> {
    account
        .to_account_data(CAMPAIGN_ACCOUNT_SPACE)
        .map_err(|e| TransportError::Rejected(e.to_string()))
}

fn load(
    accounts: &HashMap<Pubkey, Vec<u8>>,
    campaign: &Pubkey,
) -> Result<CampaignAccount, TransportError> {
    let decoded = accounts
        .get(campaign)
        .and_then(|data| Campaign::decode(*campaign, data).ok())
        .ok_or_else(|| TransportError::Rejected("AccountNotInitialized".to_string()))?;

    Ok(CampaignAccount {
        admin: decoded.owner.to_bytes(),
        name: decoded.name,
        description: decoded.description,
        amount_donated: decoded.amount_raised,
    })
}

#[async_trait]
impl LedgerTransport for MockLedger {
    async fn get_program_accounts(
        &self,
        _program_id: &Pubkey,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, TransportError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_network()?;
        let failing = self
            .failing_fetches
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if failing.is_ok() {
            return Err(TransportError::Network("request timed out".to_string()));
        }
        tokio::task::yield_now().await;

        let state = self.state.lock();
        Ok(state
            .accounts
            .iter()
            .map(|(address, data)| (*address, data.clone()))
            .collect())
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, TransportError> {
        self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        self.check_network()?;
        Ok(Hash::new_unique())
    }

    async fn send_and_confirm_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, TransportError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.check_network()?;
        // Let racing submissions interleave before confirmation
        tokio::task::yield_now().await;
        self.process_transaction(tx)
    }
}
