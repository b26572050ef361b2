use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

/// A single submitted GIF link as stored by the program
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Entry {
    /// Link to the image
    pub gif_link: String,

    /// Wallet that submitted the link
    pub user_address: Pubkey,
}

impl Entry {
    pub fn new(gif_link: impl Into<String>, user: &Pubkey) -> Self {
        Self {
            gif_link: gif_link.into(),
            user_address: *user,
        }
    }
}

/// The program's persisted record holding every submission
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BaseAccount {
    /// Number of submissions ever made
    pub total_gifs: u64,

    /// Submissions in insertion order
    pub gif_list: Vec<Entry>,
}

/// Why the last list fetch failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The account has not been initialized yet
    AccountMissing,
    /// RPC or network failure
    Transport(String),
    /// The account exists but does not decode as a portal account
    InvalidData(String),
}

/// Client-side cache of the remote list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GifList {
    #[default]
    NotFetched,
    FetchFailed(FetchFailure),
    Empty,
    Populated(Vec<Entry>),
}

impl GifList {
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        if entries.is_empty() {
            GifList::Empty
        } else {
            GifList::Populated(entries)
        }
    }

    /// Entries if the last fetch succeeded
    pub fn entries(&self) -> Option<&[Entry]> {
        match self {
            GifList::Empty => Some(&[]),
            GifList::Populated(entries) => Some(entries.as_slice()),
            GifList::NotFetched | GifList::FetchFailed(_) => None,
        }
    }

    pub fn len(&self) -> Option<usize> {
        self.entries().map(<[Entry]>::len)
    }
}

/// Connection state of the wallet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalletState {
    #[default]
    Disconnected,
    Connecting,
    Connected(Pubkey),
}

impl WalletState {
    pub fn address(&self) -> Option<Pubkey> {
        match self {
            WalletState::Connected(address) => Some(*address),
            _ => None,
        }
    }
}

/// User-visible phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting,
    /// Connected, list not fetched yet
    ListUnknown,
    /// Connected, the account does not exist
    NeedsInit,
    /// Connected, the list could not be read for another reason
    FetchFailed,
    HasList,
}

impl Phase {
    pub fn of(wallet: &WalletState, gifs: &GifList) -> Self {
        match wallet {
            WalletState::Disconnected => Phase::Disconnected,
            WalletState::Connecting => Phase::Connecting,
            WalletState::Connected(_) => match gifs {
                GifList::NotFetched => Phase::ListUnknown,
                GifList::FetchFailed(FetchFailure::AccountMissing) => Phase::NeedsInit,
                GifList::FetchFailed(_) => Phase::FetchFailed,
                GifList::Empty | GifList::Populated(_) => Phase::HasList,
            },
        }
    }
}

/// Which submissions are rejected before reaching the program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPolicy {
    /// Only the empty string is rejected; whitespace is sent as-is
    #[default]
    RejectEmpty,
    /// Empty and whitespace-only links are rejected
    RejectBlank,
}

impl SubmitPolicy {
    pub fn rejects(&self, link: &str) -> bool {
        match self {
            SubmitPolicy::RejectEmpty => link.is_empty(),
            SubmitPolicy::RejectBlank => link.trim().is_empty(),
        }
    }
}
