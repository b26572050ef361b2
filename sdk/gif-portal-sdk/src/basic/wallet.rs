use crate::core::provider::WalletProvider;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::Transaction;
use std::sync::atomic::{AtomicBool, Ordering};

/// Wallet provider holding a local keypair.
///
/// Behaves like an injected wallet: a silent (`only_if_trusted`) connect
/// only succeeds once the wallet has been trusted, either up front or by
/// an explicit connect.
#[derive(Debug)]
pub struct KeypairWallet {
    keypair: Keypair,
    trusted: AtomicBool,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair,
            trusted: AtomicBool::new(false),
        }
    }

    /// Wallet that already approved this client
    pub fn trusted(keypair: Keypair) -> Self {
        Self {
            keypair,
            trusted: AtomicBool::new(true),
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn is_trusted(&self) -> bool {
        self.trusted.load(Ordering::Acquire)
    }
}

#[async_trait]
impl WalletProvider for KeypairWallet {
    async fn connect(&self, only_if_trusted: bool) -> Result<Pubkey, String> {
        if only_if_trusted && !self.is_trusted() {
            return Err("User rejected the request.".to_string());
        }
        self.trusted.store(true, Ordering::Release);
        Ok(self.keypair.pubkey())
    }

    async fn sign_transaction(&self, mut tx: Transaction) -> Result<Transaction, String> {
        let blockhash = tx.message.recent_blockhash;
        tx.try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| e.to_string())?;
        Ok(tx)
    }
}
