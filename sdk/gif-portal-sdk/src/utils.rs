use crate::core::connection::SolConnection;
use crate::core::constants::BASE_ACCOUNT;
use crate::error::{PortalError, Result};
use crate::types::BaseAccount;
use borsh::BorshDeserialize;
use sha2::{Digest, Sha256};
use solana_sdk::account::Account;
use solana_sdk::pubkey::Pubkey;

pub const DISCRIMINATOR_LEN: usize = 8;

//=============================================================================
// Discriminators
//=============================================================================

/// First eight bytes of `sha256("<namespace>:<name>")`
pub fn discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let hash = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    out
}

/// Discriminator prefixing the data of instruction `name`
pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    discriminator("global", name)
}

/// Discriminator prefixing the data of account type `name`
pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    discriminator("account", name)
}

/// Converts IDL `camelCase` names to the program's `snake_case` names.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

//=============================================================================
// Account Fetching & Parsing
//=============================================================================

/// Serialize a base account the way the program stores it.
pub fn encode_base_account(account: &BaseAccount) -> Result<Vec<u8>> {
    let mut data = account_discriminator(BASE_ACCOUNT).to_vec();
    borsh::to_writer(&mut data, account)?;
    Ok(data)
}

/// Parse base account data. Trailing bytes past the encoded record are
/// unused account space and ignored.
pub fn parse_base_account(data: &[u8]) -> Result<BaseAccount> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(PortalError::InvalidAccountData(
            "Account data too small for discriminator".to_string(),
        ));
    }

    let (disc, mut body) = data.split_at(DISCRIMINATOR_LEN);
    if disc != account_discriminator(BASE_ACCOUNT) {
        return Err(PortalError::InvalidAccountData(format!(
            "Discriminator mismatch, not a {BASE_ACCOUNT}"
        )));
    }

    BaseAccount::deserialize(&mut body).map_err(|e| {
        PortalError::InvalidAccountData(format!("Failed to parse {BASE_ACCOUNT}: {e}"))
    })
}

/// Check ownership and parse a fetched account
pub fn decode_base_account(program_id: &Pubkey, account: &Account) -> Result<BaseAccount> {
    if account.owner != *program_id {
        return Err(PortalError::InvalidAccountData(format!(
            "Account owned by {}, expected {}",
            account.owner, program_id
        )));
    }
    parse_base_account(&account.data)
}

/// Fetch base account from the blockchain
pub async fn fetch_base_account(
    connection: &(impl SolConnection + ?Sized),
    program_id: &Pubkey,
    address: &Pubkey,
) -> Result<BaseAccount> {
    let account = connection
        .get_account(address)
        .await
        .map_err(|e| PortalError::Connection(e.to_string()))?
        .ok_or(PortalError::AccountNotFound(*address))?;

    decode_base_account(program_id, &account)
}
