use crate::basic::session::SessionState;
use crate::types::{Entry, FetchFailure, GifList, WalletState};
use std::fmt;

pub const CONNECT_LABEL: &str = "Connect to Wallet";
pub const INIT_LABEL: &str = "Do One-Time Init for GIF Program Account";
pub const INPUT_PLACEHOLDER: &str = "Enter gif link!";
pub const SUBMIT_LABEL: &str = "Submit";
pub const RETRY_LABEL: &str = "Retry";

/// What the portal page shows for a given session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalView {
    /// No wallet yet: a single connect button
    ConnectPrompt { alert: Option<String> },
    Connecting,
    /// Connected, waiting for the first list fetch
    Loading,
    /// The list account does not exist: a single init button
    InitPrompt,
    /// The list could not be read: a single retry button
    RetryPrompt { reason: String },
    /// Submission form followed by the gallery, oldest first
    Gallery { input: String, items: Vec<Entry> },
}

impl PortalView {
    pub fn render(state: &SessionState) -> Self {
        match state.wallet {
            WalletState::Disconnected => PortalView::ConnectPrompt {
                alert: state.alert.clone(),
            },
            WalletState::Connecting => PortalView::Connecting,
            WalletState::Connected(_) => match &state.gifs {
                GifList::NotFetched => PortalView::Loading,
                GifList::FetchFailed(FetchFailure::AccountMissing) => PortalView::InitPrompt,
                GifList::FetchFailed(FetchFailure::Transport(reason))
                | GifList::FetchFailed(FetchFailure::InvalidData(reason)) => {
                    PortalView::RetryPrompt {
                        reason: reason.clone(),
                    }
                }
                GifList::Empty => PortalView::Gallery {
                    input: state.input.clone(),
                    items: Vec::new(),
                },
                GifList::Populated(entries) => PortalView::Gallery {
                    input: state.input.clone(),
                    items: entries.clone(),
                },
            },
        }
    }

    /// Labels of the buttons on screen
    pub fn buttons(&self) -> Vec<&'static str> {
        match self {
            PortalView::ConnectPrompt { .. } => vec![CONNECT_LABEL],
            PortalView::InitPrompt => vec![INIT_LABEL],
            PortalView::RetryPrompt { .. } => vec![RETRY_LABEL],
            PortalView::Gallery { .. } => vec![SUBMIT_LABEL],
            PortalView::Connecting | PortalView::Loading => Vec::new(),
        }
    }

    pub fn has_form(&self) -> bool {
        matches!(self, PortalView::Gallery { .. })
    }

    /// Gallery items in display order
    pub fn items(&self) -> &[Entry] {
        match self {
            PortalView::Gallery { items, .. } => items.as_slice(),
            _ => &[],
        }
    }
}

impl fmt::Display for PortalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GIF Portal")?;
        writeln!(f, "View your GIF collection in the metaverse")?;
        match self {
            PortalView::ConnectPrompt { alert } => {
                if let Some(alert) = alert {
                    writeln!(f, "! {alert}")?;
                }
                writeln!(f, "[{CONNECT_LABEL}]")
            }
            PortalView::Connecting => writeln!(f, "Connecting..."),
            PortalView::Loading => writeln!(f, "Loading..."),
            PortalView::InitPrompt => writeln!(f, "[{INIT_LABEL}]"),
            PortalView::RetryPrompt { reason } => {
                writeln!(f, "Could not load GIFs: {reason}")?;
                writeln!(f, "[{RETRY_LABEL}]")
            }
            PortalView::Gallery { input, items } => {
                if input.is_empty() {
                    writeln!(f, "> ({INPUT_PLACEHOLDER}) [{SUBMIT_LABEL}]")?;
                } else {
                    writeln!(f, "> {input} [{SUBMIT_LABEL}]")?;
                }
                for (index, item) in items.iter().enumerate() {
                    writeln!(f, "{:>3}. {}", index + 1, item.gif_link)?;
                }
                Ok(())
            }
        }
    }
}
