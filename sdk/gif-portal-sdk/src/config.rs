use crate::core::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_PROGRAM_ID, DEVNET_URL};
use crate::error::{PortalError, Result};
use crate::idl::Idl;
use crate::types::SubmitPolicy;
use serde_json::Value;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use std::path::Path;
use std::time::Duration;

/// Settings shared by every operation of a portal session.
///
/// Built once at startup and handed to the session; nothing in the SDK
/// reads configuration from anywhere else.
#[derive(Debug)]
pub struct PortalConfig {
    /// JSON-RPC endpoint
    pub rpc_url: String,

    /// When a submitted transaction counts as done
    pub commitment: CommitmentConfig,

    /// Program ID of the portal contract
    pub program_id: Pubkey,

    /// Keypair of the account holding the GIF list; signs its creation
    pub base_account: Keypair,

    /// Upper bound on an explicit wallet connect handshake
    pub connect_timeout: Duration,

    pub submit_policy: SubmitPolicy,
}

impl PortalConfig {
    pub fn new(base_account: Keypair) -> Self {
        Self {
            rpc_url: DEVNET_URL.to_string(),
            commitment: CommitmentConfig::processed(),
            program_id: DEFAULT_PROGRAM_ID,
            base_account,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            submit_policy: SubmitPolicy::default(),
        }
    }

    /// Program ID from an IDL document and base account from a keypair file
    pub fn from_files(idl_path: impl AsRef<Path>, keypair_path: impl AsRef<Path>) -> Result<Self> {
        let idl = Idl::from_file(idl_path)?;
        idl.ensure_portal_interface()?;
        let base_account = read_keypair(keypair_path)?;
        Ok(Self::new(base_account).with_program_id(idl.program_id()?))
    }

    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_submit_policy(mut self, policy: SubmitPolicy) -> Self {
        self.submit_policy = policy;
        self
    }

    /// Address of the account holding the GIF list
    pub fn base_account_address(&self) -> Pubkey {
        self.base_account.pubkey()
    }
}

//=============================================================================
// Keypair files
//=============================================================================

/// Read a keypair file.
///
/// Accepts the Solana CLI format (a JSON array of 64 bytes) and a
/// serialized web3.js `Keypair` (`{"_keypair": {"secretKey": {"0": .., ..}}}`).
pub fn read_keypair(path: impl AsRef<Path>) -> Result<Keypair> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .map_err(|e| PortalError::Config(format!("{}: {e}", path.display())))?;
    parse_keypair_json(&json)
}

pub fn parse_keypair_json(json: &str) -> Result<Keypair> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| PortalError::Config(e.to_string()))?;

    let secret = match &value {
        Value::Array(_) => &value,
        Value::Object(map) => map
            .get("_keypair")
            .and_then(|kp| kp.get("secretKey"))
            .or_else(|| map.get("secretKey"))
            .ok_or_else(|| PortalError::Config("keypair has no secretKey".to_string()))?,
        _ => return Err(PortalError::Config("unrecognized keypair format".to_string())),
    };

    let bytes = secret_key_bytes(secret)?;
    Keypair::from_bytes(&bytes).map_err(|e| PortalError::Config(format!("bad keypair: {e}")))
}

fn secret_key_bytes(secret: &Value) -> Result<Vec<u8>> {
    let byte = |v: &Value| -> Result<u8> {
        v.as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| PortalError::Config(format!("not a byte: {v}")))
    };

    match secret {
        Value::Array(items) => items.iter().map(byte).collect(),
        // Object keyed by index, as produced by JSON.stringify on a Uint8Array
        Value::Object(map) => {
            let mut indexed = map
                .iter()
                .map(|(k, v)| {
                    let index = k
                        .parse::<usize>()
                        .map_err(|_| PortalError::Config(format!("bad secretKey index {k}")))?;
                    Ok((index, byte(v)?))
                })
                .collect::<Result<Vec<_>>>()?;
            indexed.sort_unstable_by_key(|(index, _)| *index);
            Ok(indexed.into_iter().map(|(_, b)| b).collect())
        }
        _ => Err(PortalError::Config("secretKey must be an array or object".to_string())),
    }
}
