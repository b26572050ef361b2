pub mod advanced;
pub mod basic;
pub mod config;
pub mod core;
pub mod error;
pub mod idl;
pub mod types;
pub mod utils;
pub mod view;

pub use crate::basic::program::GifPortalProgram;
pub use crate::basic::session::{PortalSession, Refresh, SessionState};
pub use crate::basic::wallet::KeypairWallet;
pub use crate::config::PortalConfig;
pub use crate::core::connection::SolConnection;
pub use crate::core::provider::WalletProvider;
pub use crate::core::rpc::RpcConnection;
pub use crate::error::{Outcome, PortalError, Result, Severity};
pub use crate::types::{BaseAccount, Entry, FetchFailure, GifList, Phase, SubmitPolicy, WalletState};
pub use crate::view::PortalView;
