use anyhow::{Context, Result};
use gif_portal_sdk::config::read_keypair;
use gif_portal_sdk::core::constants::LOCALNET_URL;
use gif_portal_sdk::idl::Idl;
use gif_portal_sdk::{KeypairWallet, PortalConfig};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::Keypair,
};
use std::env;
use std::str::FromStr;

pub struct TestContext {
    pub rpc_url: String,
    pub program_id: Pubkey,
    keypair_path: String,
}

impl TestContext {
    pub fn new() -> Result<Self> {
        let rpc_url = env::var("RPC_URL").unwrap_or_else(|_| LOCALNET_URL.to_string());
        let keypair_path = env::var("KEYPAIR")
            .unwrap_or_else(|_| shellexpand::tilde("~/.config/solana/id.json").into_owned());
        let program_id = program_id_from_env()?;

        Ok(Self {
            rpc_url,
            program_id,
            keypair_path,
        })
    }

    /// Wallet loaded from `KEYPAIR`, already trusted
    pub fn wallet(&self) -> Result<KeypairWallet> {
        let keypair = read_keypair(&self.keypair_path)
            .with_context(|| format!("Failed to read keypair {}", self.keypair_path))?;
        Ok(KeypairWallet::trusted(keypair))
    }

    /// Config with a freshly generated base account. Scenarios build their
    /// RPC connection from it.
    pub fn fresh_config(&self) -> PortalConfig {
        PortalConfig::new(Keypair::new())
            .with_rpc_url(&self.rpc_url)
            .with_commitment(CommitmentConfig::confirmed())
            .with_program_id(self.program_id)
    }
}

/// `PROGRAM_ID`, or `metadata.address` of the IDL at `IDL`
fn program_id_from_env() -> Result<Pubkey> {
    if let Ok(id) = env::var("PROGRAM_ID") {
        return Pubkey::from_str(&id).with_context(|| format!("Invalid PROGRAM_ID {id}"));
    }
    let path = env::var("IDL").context("Please set PROGRAM_ID or IDL environment variable.")?;
    let idl = Idl::from_file(&path)?;
    idl.ensure_portal_interface()?;
    Ok(idl.program_id()?)
}
