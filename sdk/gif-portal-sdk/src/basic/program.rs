use crate::advanced::instructions;
use crate::config::PortalConfig;
use crate::core::connection::SolConnection;
use crate::core::provider::WalletProvider;
use crate::error::{PortalError, Result};
use crate::types::BaseAccount;
use crate::utils;
use log::{debug, info};
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;

/// Client for the portal program bound to one base account.
///
/// Mirrors the three remote calls of the program: `initialize`,
/// `add_gif` and fetching the base account.
#[derive(Debug, Clone, Copy)]
pub struct GifPortalProgram<'a> {
    program_id: Pubkey,
    base_account: &'a Keypair,
}

impl<'a> GifPortalProgram<'a> {
    pub fn new(program_id: Pubkey, base_account: &'a Keypair) -> Self {
        Self {
            program_id,
            base_account,
        }
    }

    pub fn from_config(config: &'a PortalConfig) -> Self {
        Self::new(config.program_id, &config.base_account)
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn base_account(&self) -> Pubkey {
        self.base_account.pubkey()
    }

    /// `initialize` transaction paid by `user`, already signed by the
    /// base account.
    pub fn initialize_transaction(&self, user: &Pubkey, blockhash: Hash) -> Result<Transaction> {
        let ix = instructions::initialize(&self.program_id, &self.base_account(), user)?;
        let mut tx = unsigned_transaction(ix, user, blockhash);
        tx.try_partial_sign(&[self.base_account], blockhash)
            .map_err(|e| PortalError::Signing(e.to_string()))?;
        Ok(tx)
    }

    /// Unsigned `add_gif` transaction paid by `user`
    pub fn add_gif_transaction(
        &self,
        user: &Pubkey,
        gif_link: &str,
        blockhash: Hash,
    ) -> Result<Transaction> {
        let ix = instructions::add_gif(&self.program_id, &self.base_account(), user, gif_link)?;
        Ok(unsigned_transaction(ix, user, blockhash))
    }

    /// Create the base account. The wallet pays and co-signs.
    pub async fn initialize(
        &self,
        connection: &(impl SolConnection + ?Sized),
        wallet: &(impl WalletProvider + ?Sized),
        user: &Pubkey,
    ) -> Result<Signature> {
        let blockhash = latest_blockhash(connection).await?;
        let tx = self.initialize_transaction(user, blockhash)?;
        let signature = sign_and_send(connection, wallet, tx).await?;
        info!(
            "Created a new base account w/ address: {}",
            self.base_account()
        );
        Ok(signature)
    }

    /// Append `gif_link` on behalf of `user`.
    pub async fn add_gif(
        &self,
        connection: &(impl SolConnection + ?Sized),
        wallet: &(impl WalletProvider + ?Sized),
        user: &Pubkey,
        gif_link: &str,
    ) -> Result<Signature> {
        let blockhash = latest_blockhash(connection).await?;
        let tx = self.add_gif_transaction(user, gif_link, blockhash)?;
        let signature = sign_and_send(connection, wallet, tx).await?;
        info!("GIF successfully sent to program: {gif_link}");
        Ok(signature)
    }

    pub async fn fetch_account(
        &self,
        connection: &(impl SolConnection + ?Sized),
    ) -> Result<BaseAccount> {
        utils::fetch_base_account(connection, &self.program_id, &self.base_account()).await
    }
}

fn unsigned_transaction(ix: Instruction, payer: &Pubkey, blockhash: Hash) -> Transaction {
    let message = Message::new_with_blockhash(&[ix], Some(payer), &blockhash);
    Transaction::new_unsigned(message)
}

async fn latest_blockhash(connection: &(impl SolConnection + ?Sized)) -> Result<Hash> {
    connection
        .get_latest_blockhash()
        .await
        .map_err(|e| PortalError::Connection(e.to_string()))
}

async fn sign_and_send(
    connection: &(impl SolConnection + ?Sized),
    wallet: &(impl WalletProvider + ?Sized),
    tx: Transaction,
) -> Result<Signature> {
    let tx = wallet
        .sign_transaction(tx)
        .await
        .map_err(PortalError::Signing)?;
    if !tx.is_signed() {
        return Err(PortalError::Signing(
            "transaction is missing signatures".to_string(),
        ));
    }

    debug!("Sending transaction {}", tx.signatures[0]);
    connection
        .send_transaction(&tx)
        .await
        .map_err(|e| PortalError::Connection(e.to_string()))
}
