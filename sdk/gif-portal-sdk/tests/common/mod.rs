#![allow(dead_code)]

use async_trait::async_trait;
use borsh::BorshDeserialize;
use gif_portal_sdk::core::connection::SolConnection;
use gif_portal_sdk::core::provider::WalletProvider;
use gif_portal_sdk::types::{BaseAccount, Entry};
use gif_portal_sdk::utils::{encode_base_account, instruction_discriminator, parse_base_account};
use gif_portal_sdk::{KeypairWallet, PortalConfig, PortalSession};
use solana_sdk::{
    account::Account,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use std::collections::{HashMap, VecDeque};
use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Space the program allocates for the base account
pub const BASE_ACCOUNT_SPACE: usize = 9000;

type BoxError = Box<dyn Error + Send + Sync>;

/// In-memory stand-in for the RPC node and the portal program.
///
/// Verifies signatures and runs `initialize` / `add_gif` against an
/// in-memory account map.
pub struct MockLedger {
    pub program_id: Pubkey,
    pub blockhash: Hash,
    accounts: Mutex<HashMap<Pubkey, Account>>,
    fetch_delays: Mutex<VecDeque<Duration>>,
    pub fetch_calls: AtomicUsize,
    pub send_calls: AtomicUsize,
    pub fail_fetch: AtomicBool,
    pub fail_send: AtomicBool,
}

impl MockLedger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            blockhash: Hash::new_unique(),
            accounts: Mutex::new(HashMap::new()),
            fetch_delays: Mutex::new(VecDeque::new()),
            fetch_calls: AtomicUsize::new(0),
            send_calls: AtomicUsize::new(0),
            fail_fetch: AtomicBool::new(false),
            fail_send: AtomicBool::new(false),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn sends(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    /// Delay applied to the next fetch after its data is read
    pub fn delay_next_fetch(&self, delay: Duration) {
        self.fetch_delays.lock().unwrap().push_back(delay);
    }

    pub fn set_account(&self, address: Pubkey, account: Account) {
        self.accounts.lock().unwrap().insert(address, account);
    }

    /// Store an initialized base account holding `links`
    pub fn seed_base_account(&self, address: Pubkey, user: &Pubkey, links: &[&str]) {
        let account = BaseAccount {
            total_gifs: links.len() as u64,
            gif_list: links.iter().map(|link| Entry::new(*link, user)).collect(),
        };
        self.set_account(address, self.program_account(&account));
    }

    pub fn base_account(&self, address: &Pubkey) -> Option<BaseAccount> {
        let accounts = self.accounts.lock().unwrap();
        accounts
            .get(address)
            .map(|account| parse_base_account(&account.data).unwrap())
    }

    fn program_account(&self, account: &BaseAccount) -> Account {
        let mut data = encode_base_account(account).unwrap();
        data.resize(BASE_ACCOUNT_SPACE, 0);
        Account {
            lamports: 1_000_000,
            data,
            owner: self.program_id,
            executable: false,
            rent_epoch: 0,
        }
    }

    fn process(&self, tx: &Transaction) -> Result<(), BoxError> {
        tx.verify()?;
        if tx.message.recent_blockhash != self.blockhash {
            return Err("Blockhash not found".into());
        }

        let keys = &tx.message.account_keys;
        let mut accounts = self.accounts.lock().unwrap();
        let mut pending = accounts.clone();

        for ix in &tx.message.instructions {
            let program_id = keys[ix.program_id_index as usize];
            if program_id != self.program_id {
                return Err(format!("unknown program {program_id}").into());
            }
            if ix.data.len() < 8 || ix.accounts.len() < 2 {
                return Err("malformed instruction".into());
            }

            let base_index = ix.accounts[0] as usize;
            let user_index = ix.accounts[1] as usize;
            let (base, user) = (keys[base_index], keys[user_index]);
            if !tx.message.is_signer(user_index) {
                return Err("user must sign".into());
            }

            let (disc, args) = ix.data.split_at(8);
            if disc == instruction_discriminator("initialize") {
                if !tx.message.is_signer(base_index) {
                    return Err("base account must sign".into());
                }
                if pending.contains_key(&base) {
                    return Err(format!("account {base} already in use").into());
                }
                pending.insert(base, self.program_account(&BaseAccount::default()));
            } else if disc == instruction_discriminator("add_gif") {
                let link = String::try_from_slice(args)?;
                let stored = pending
                    .get(&base)
                    .ok_or_else(|| format!("account {base} not initialized"))?;
                let mut state = parse_base_account(&stored.data)?;
                state.gif_list.push(Entry::new(link, &user));
                state.total_gifs += 1;
                pending.insert(base, self.program_account(&state));
            } else {
                return Err("unknown instruction".into());
            }
        }

        *accounts = pending;
        Ok(())
    }
}

#[async_trait]
impl SolConnection for MockLedger {
    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, BoxError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_send.load(Ordering::SeqCst) {
            return Err("simulated send failure".into());
        }
        self.process(tx)?;
        Ok(tx.signatures[0])
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, BoxError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.accounts.lock().unwrap().get(pubkey).cloned();
        let delay = self.fetch_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err("simulated network failure".into());
        }
        Ok(snapshot)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, BoxError> {
        Ok(self.blockhash)
    }
}

//=============================================================================
// Wallet providers
//=============================================================================

/// Provider whose connect request never completes
pub struct HangingWallet;

#[async_trait]
impl WalletProvider for HangingWallet {
    async fn connect(&self, _only_if_trusted: bool) -> Result<Pubkey, String> {
        std::future::pending().await
    }

    async fn sign_transaction(&self, _tx: Transaction) -> Result<Transaction, String> {
        Err("not connected".to_string())
    }
}

/// Provider that refuses every request
pub struct RejectingWallet;

#[async_trait]
impl WalletProvider for RejectingWallet {
    async fn connect(&self, _only_if_trusted: bool) -> Result<Pubkey, String> {
        Err("User rejected the request.".to_string())
    }

    async fn sign_transaction(&self, _tx: Transaction) -> Result<Transaction, String> {
        Err("User rejected the request.".to_string())
    }
}

/// Provider that reconnects silently but refuses every new approval
pub struct TrustedOnlyWallet(pub KeypairWallet);

#[async_trait]
impl WalletProvider for TrustedOnlyWallet {
    async fn connect(&self, only_if_trusted: bool) -> Result<Pubkey, String> {
        if only_if_trusted {
            self.0.connect(true).await
        } else {
            Err("User rejected the request.".to_string())
        }
    }

    async fn sign_transaction(&self, tx: Transaction) -> Result<Transaction, String> {
        self.0.sign_transaction(tx).await
    }
}

//=============================================================================
// Setup
//=============================================================================

pub struct TestContext {
    pub ledger: Arc<MockLedger>,
    pub config: Arc<PortalConfig>,
    pub user: Pubkey,
    pub session: Arc<PortalSession<MockLedger>>,
}

impl TestContext {
    /// Session with a wallet that approved the portal before
    pub fn new() -> Self {
        Self::with_config(|config| config)
    }

    pub fn with_config(tweak: impl FnOnce(PortalConfig) -> PortalConfig) -> Self {
        let user = Keypair::new();
        let user_pubkey = user.pubkey();
        let wallet: Arc<dyn WalletProvider> = Arc::new(KeypairWallet::trusted(user));
        Self::build(tweak, Some(wallet), user_pubkey)
    }

    pub fn with_provider(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self::build(|config| config, provider, Pubkey::default())
    }

    /// Session whose wallet only ever reconnects as trusted
    pub fn trusted_only() -> Self {
        let user = Keypair::new();
        let user_pubkey = user.pubkey();
        let wallet: Arc<dyn WalletProvider> =
            Arc::new(TrustedOnlyWallet(KeypairWallet::trusted(user)));
        Self::build(|config| config, Some(wallet), user_pubkey)
    }

    pub fn build_with_timeout(provider: Arc<dyn WalletProvider>, timeout: Duration) -> Self {
        Self::build(
            |config| config.with_connect_timeout(timeout),
            Some(provider),
            Pubkey::default(),
        )
    }

    fn build(
        tweak: impl FnOnce(PortalConfig) -> PortalConfig,
        provider: Option<Arc<dyn WalletProvider>>,
        user: Pubkey,
    ) -> Self {
        let program_id = Pubkey::new_unique();
        let ledger = Arc::new(MockLedger::new(program_id));
        let config = Arc::new(tweak(
            PortalConfig::new(Keypair::new()).with_program_id(program_id),
        ));
        let session = Arc::new(PortalSession::new(
            config.clone(),
            ledger.clone(),
            provider,
        ));
        Self {
            ledger,
            config,
            user,
            session,
        }
    }

    pub fn base_address(&self) -> Pubkey {
        self.config.base_account_address()
    }

    /// Seed the remote list with `links` submitted by the test user
    pub fn seed(&self, links: &[&str]) {
        self.ledger
            .seed_base_account(self.base_address(), &self.user, links);
    }

    pub fn remote_links(&self) -> Vec<String> {
        self.ledger
            .base_account(&self.base_address())
            .map(|account| account.gif_list.into_iter().map(|e| e.gif_link).collect())
            .unwrap_or_default()
    }
}
