use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

// Program ID of the deployed GIF portal on Devnet
pub const DEFAULT_PROGRAM_ID: Pubkey = pubkey!("H6rRorzddTYHLnaep5aapZKXBCRqWA2UwDngNy9GNmj");

pub const DEVNET_URL: &str = "https://api.devnet.solana.com";
pub const LOCALNET_URL: &str = "http://127.0.0.1:8899";

/// Link submitted by the verification flow.
pub const VERIFY_GIF_LINK: &str = "giphy_link_here";

pub const INITIALIZE_IX: &str = "initialize";
pub const ADD_GIF_IX: &str = "add_gif";
pub const BASE_ACCOUNT: &str = "BaseAccount";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
