use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;

/// Abstraction for the wallet that owns the user's key.
/// This allows the SDK to work with:
/// 1. Local Keypairs (Backend/CLI)
/// 2. Browser-injected wallets (Frontend - the wallet signs on request)
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Connect handshake.
    ///
    /// With `only_if_trusted` set the provider must not prompt the user and
    /// only succeeds if the site was approved before.
    async fn connect(&self, only_if_trusted: bool) -> Result<Pubkey, String>;

    /// Add the wallet's signature to a transaction.
    /// Signatures already present on `tx` must be preserved.
    async fn sign_transaction(&self, tx: Transaction) -> Result<Transaction, String>;
}
