//! Interface definition document of the portal program.
//!
//! Only the parts the client relies on are modelled: the deployed
//! address and the instruction and account names.

use crate::core::constants::{ADD_GIF_IX, BASE_ACCOUNT, INITIALIZE_IX};
use crate::error::{PortalError, Result};
use crate::utils::to_snake_case;
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Idl {
    #[serde(default)]
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub instructions: Vec<IdlInstruction>,
    #[serde(default)]
    pub accounts: Vec<IdlTypeDef>,
    #[serde(default)]
    pub metadata: Option<IdlMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<IdlAccountItem>,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlAccountItem {
    pub name: String,
    #[serde(default)]
    pub is_mut: bool,
    #[serde(default)]
    pub is_signer: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlField {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlTypeDef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlMetadata {
    pub address: Option<String>,
}

impl Idl {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PortalError::Idl(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PortalError::Idl(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Deployed program address recorded under `metadata.address`
    pub fn program_id(&self) -> Result<Pubkey> {
        let address = self
            .metadata
            .as_ref()
            .and_then(|m| m.address.as_deref())
            .ok_or_else(|| PortalError::Idl("missing metadata.address".to_string()))?;
        Pubkey::from_str(address)
            .map_err(|e| PortalError::Idl(format!("bad program address {address}: {e}")))
    }

    /// Looks up an instruction by its program-side (snake case) name.
    pub fn instruction(&self, name: &str) -> Option<&IdlInstruction> {
        self.instructions
            .iter()
            .find(|ix| to_snake_case(&ix.name) == name)
    }

    /// Fails unless the document describes the calls and account the
    /// client uses.
    pub fn ensure_portal_interface(&self) -> Result<()> {
        for name in [INITIALIZE_IX, ADD_GIF_IX] {
            if self.instruction(name).is_none() {
                return Err(PortalError::Idl(format!("missing instruction {name}")));
            }
        }
        if !self.accounts.is_empty() && !self.accounts.iter().any(|a| a.name == BASE_ACCOUNT) {
            return Err(PortalError::Idl(format!("missing account {BASE_ACCOUNT}")));
        }
        Ok(())
    }
}
