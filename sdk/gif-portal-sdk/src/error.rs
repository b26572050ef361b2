use solana_sdk::pubkey::Pubkey;
use std::time::Duration;
use thiserror::Error;

/// SDK-specific error types for GIF portal operations
#[derive(Debug, Error)]
pub enum PortalError {
    /// No wallet provider is available to the session
    #[error("Solana object not found! Get a Phantom Wallet")]
    ProviderNotFound,

    /// The wallet provider refused the request
    #[error("Wallet rejected request: {0}")]
    WalletRejected(String),

    /// Connect handshake did not finish in time
    #[error("Wallet connect timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// Operation needs a connected wallet
    #[error("Wallet is not connected")]
    WalletNotConnected,

    /// Submission was empty
    #[error("Empty input. Try again!")]
    EmptyInput,

    /// Account not found on-chain
    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    /// Connection or RPC error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Transaction could not be signed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Invalid account data or deserialization error
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// Malformed interface definition document
    #[error("Invalid IDL: {0}")]
    Idl(String),

    /// Malformed configuration input
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Borsh serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] std::io::Error),
}

/// How a caller should react to a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Retrying or prompting the user may succeed.
    Recoverable,
    /// Retrying will not help; abort the flow.
    Fatal,
}

impl PortalError {
    pub fn severity(&self) -> Severity {
        match self {
            PortalError::ProviderNotFound
            | PortalError::InvalidAccountData(_)
            | PortalError::Idl(_)
            | PortalError::Config(_)
            | PortalError::SerializationError(_) => Severity::Fatal,
            PortalError::WalletRejected(_)
            | PortalError::ConnectTimeout(_)
            | PortalError::WalletNotConnected
            | PortalError::EmptyInput
            | PortalError::AccountNotFound(_)
            | PortalError::Connection(_)
            | PortalError::Signing(_) => Severity::Recoverable,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, PortalError>;

/// Result of a session operation, split by how the caller should react.
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    Recoverable(PortalError),
    Fatal(PortalError),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Outcome::Fatal(_))
    }

    pub fn error(&self) -> Option<&PortalError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Recoverable(err) | Outcome::Fatal(err) => Some(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Recoverable(err) => Outcome::Recoverable(err),
            Outcome::Fatal(err) => Outcome::Fatal(err),
        }
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Recoverable(err) | Outcome::Fatal(err) => Err(err),
        }
    }
}

impl<T> From<PortalError> for Outcome<T> {
    fn from(err: PortalError) -> Self {
        match err.severity() {
            Severity::Recoverable => Outcome::Recoverable(err),
            Severity::Fatal => Outcome::Fatal(err),
        }
    }
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => err.into(),
        }
    }
}
