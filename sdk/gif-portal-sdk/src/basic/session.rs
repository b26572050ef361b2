use crate::basic::program::GifPortalProgram;
use crate::config::PortalConfig;
use crate::core::connection::SolConnection;
use crate::core::provider::WalletProvider;
use crate::error::{Outcome, PortalError};
use crate::types::{FetchFailure, GifList, Phase, WalletState};
use crate::view::PortalView;
use log::{debug, error, info, warn};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mutable part of a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub wallet: WalletState,

    /// Current contents of the submission form
    pub input: String,

    /// Last applied fetch of the remote list
    pub gifs: GifList,

    /// Message the user must see, e.g. a missing wallet
    pub alert: Option<String>,
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        Phase::of(&self.wallet, &self.gifs)
    }
}

/// Result of a list fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// The response was stored in the session
    Applied(GifList),
    /// A newer fetch was issued meanwhile; the response was dropped
    Superseded,
}

/// Drives one user's interaction with the portal: wallet connection,
/// one-time account initialization, submissions and list refreshes.
///
/// The remote account is the source of truth. The session never edits
/// its list locally, it re-reads the account after every change.
pub struct PortalSession<C: SolConnection> {
    config: Arc<PortalConfig>,
    connection: Arc<C>,
    provider: Option<Arc<dyn WalletProvider>>,
    state: Mutex<SessionState>,
    fetch_seq: AtomicU64,
}

impl<C: SolConnection> PortalSession<C> {
    pub fn new(
        config: Arc<PortalConfig>,
        connection: Arc<C>,
        provider: Option<Arc<dyn WalletProvider>>,
    ) -> Self {
        Self {
            config,
            connection,
            provider,
            state: Mutex::new(SessionState::default()),
            fetch_seq: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    fn program(&self) -> GifPortalProgram<'_> {
        GifPortalProgram::from_config(&self.config)
    }

    //=========================================================================
    // Wallet
    //=========================================================================

    /// Silently reuse a wallet connection approved earlier.
    pub async fn check_wallet_connection(&self) -> Outcome<Pubkey> {
        let Some(provider) = self.provider.clone() else {
            return self.provider_missing().await;
        };

        let previous = self.wallet_address().await;
        match provider.connect(true).await {
            Ok(address) => self.on_connected(previous, address).await,
            Err(reason) => {
                info!("No trusted wallet connection: {reason}");
                Outcome::Recoverable(PortalError::WalletRejected(reason))
            }
        }
    }

    /// Ask the wallet to connect, bounded by the configured timeout.
    ///
    /// A rejected or timed out request leaves the wallet as it was before
    /// the attempt, so an existing connection survives.
    pub async fn connect_wallet(&self) -> Outcome<Pubkey> {
        let Some(provider) = self.provider.clone() else {
            return self.provider_missing().await;
        };

        let before = {
            let mut state = self.state.lock().await;
            std::mem::replace(&mut state.wallet, WalletState::Connecting)
        };

        let timeout = self.config.connect_timeout;
        let err = match tokio::time::timeout(timeout, provider.connect(false)).await {
            Ok(Ok(address)) => return self.on_connected(before.address(), address).await,
            Ok(Err(reason)) => PortalError::WalletRejected(reason),
            Err(_) => PortalError::ConnectTimeout(timeout),
        };

        warn!("Wallet connect failed: {err}");
        let mut state = self.state.lock().await;
        if state.wallet == WalletState::Connecting {
            state.wallet = before;
        }
        err.into()
    }

    async fn provider_missing(&self) -> Outcome<Pubkey> {
        let err = PortalError::ProviderNotFound;
        error!("{err}");
        self.state.lock().await.alert = Some(err.to_string());
        err.into()
    }

    /// Records the address and refreshes the list if it differs from
    /// `previous`, the address held before the connect attempt.
    async fn on_connected(&self, previous: Option<Pubkey>, address: Pubkey) -> Outcome<Pubkey> {
        info!("Connected with Public Key: {address}");
        self.state.lock().await.wallet = WalletState::Connected(address);

        if previous != Some(address) {
            debug!("fetching gif list...");
            // A failed fetch is kept in the session state.
            let _ = self.fetch_list().await;
        }
        Outcome::Success(address)
    }

    /// Provider and address for signing, if connected.
    async fn signer(&self) -> Result<(Arc<dyn WalletProvider>, Pubkey), PortalError> {
        let provider = self.provider.clone().ok_or(PortalError::ProviderNotFound)?;
        let address = self
            .state
            .lock()
            .await
            .wallet
            .address()
            .ok_or(PortalError::WalletNotConnected)?;
        Ok((provider, address))
    }

    //=========================================================================
    // Remote calls
    //=========================================================================

    /// Re-read the remote list.
    ///
    /// Only the newest issued fetch may update the session; responses of
    /// older fetches that arrive later are discarded.
    pub async fn fetch_list(&self) -> Outcome<Refresh> {
        let token = self.fetch_seq.fetch_add(1, Ordering::AcqRel) + 1;
        let result = self.program().fetch_account(self.connection.as_ref()).await;

        let gifs = match &result {
            Ok(account) => GifList::from_entries(account.gif_list.clone()),
            Err(err) => GifList::FetchFailed(fetch_failure(err)),
        };

        {
            let mut state = self.state.lock().await;
            if self.fetch_seq.load(Ordering::Acquire) != token {
                debug!("Discarding stale gif list response (request {token})");
                return Outcome::Success(Refresh::Superseded);
            }
            state.gifs = gifs.clone();
        }

        match result {
            Ok(account) => {
                info!("Got the account with {} gifs", account.gif_list.len());
                Outcome::Success(Refresh::Applied(gifs))
            }
            Err(err) => {
                warn!("Error in fetch_list: {err}");
                err.into()
            }
        }
    }

    /// Create the remote account, then refresh the list.
    ///
    /// On failure the list is left as is so the init prompt stays up.
    pub async fn initialize_account(&self) -> Outcome<Signature> {
        let (provider, user) = match self.signer().await {
            Ok(signer) => signer,
            Err(err) => return err.into(),
        };

        match self
            .program()
            .initialize(self.connection.as_ref(), provider.as_ref(), &user)
            .await
        {
            Ok(signature) => {
                let _ = self.fetch_list().await;
                Outcome::Success(signature)
            }
            Err(err) => {
                warn!("Error creating base account: {err}");
                err.into()
            }
        }
    }

    /// Replace the form contents.
    pub async fn set_input(&self, value: impl Into<String>) {
        self.state.lock().await.input = value.into();
    }

    /// Submit `link`, then clear the form and refresh the list.
    ///
    /// Links rejected by the submit policy never reach the network. On
    /// failure the form keeps its contents.
    pub async fn submit_entry(&self, link: &str) -> Outcome<Signature> {
        if self.config.submit_policy.rejects(link) {
            info!("{}", PortalError::EmptyInput);
            return Outcome::Recoverable(PortalError::EmptyInput);
        }

        let (provider, user) = match self.signer().await {
            Ok(signer) => signer,
            Err(err) => return err.into(),
        };

        debug!("gif link: {link}");
        match self
            .program()
            .add_gif(self.connection.as_ref(), provider.as_ref(), &user, link)
            .await
        {
            Ok(signature) => {
                self.state.lock().await.input.clear();
                let _ = self.fetch_list().await;
                Outcome::Success(signature)
            }
            Err(err) => {
                warn!("Error sending GIF: {err}");
                err.into()
            }
        }
    }

    /// Submit the current form contents.
    pub async fn submit_input(&self) -> Outcome<Signature> {
        let link = self.state.lock().await.input.clone();
        self.submit_entry(&link).await
    }

    //=========================================================================
    // Accessors
    //=========================================================================

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase()
    }

    pub async fn view(&self) -> PortalView {
        PortalView::render(&*self.state.lock().await)
    }

    pub async fn wallet_address(&self) -> Option<Pubkey> {
        self.state.lock().await.wallet.address()
    }

    pub async fn input(&self) -> String {
        self.state.lock().await.input.clone()
    }

    pub async fn gif_list(&self) -> GifList {
        self.state.lock().await.gifs.clone()
    }

    pub async fn alert(&self) -> Option<String> {
        self.state.lock().await.alert.clone()
    }

    /// Return the pending alert and dismiss it.
    pub async fn take_alert(&self) -> Option<String> {
        self.state.lock().await.alert.take()
    }
}

fn fetch_failure(err: &PortalError) -> FetchFailure {
    match err {
        PortalError::AccountNotFound(_) => FetchFailure::AccountMissing,
        PortalError::InvalidAccountData(_) | PortalError::SerializationError(_) => {
            FetchFailure::InvalidData(err.to_string())
        }
        _ => FetchFailure::Transport(err.to_string()),
    }
}
