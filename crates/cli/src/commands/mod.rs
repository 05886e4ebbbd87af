//! Shared command context and error type.

use std::sync::Arc;

use thiserror::Error;

use orchard_client::api::ApiClient;
use orchard_client::cart::CartState;
use orchard_client::config::{ClientConfig, ConfigError};
use orchard_client::error::ApiError;
use orchard_client::notify::{Notice, Notifier, Severity, SharedNotifier};
use orchard_client::session::Session;
use orchard_client::store::{LocalStore, StoreError};

pub mod account;
pub mod admin;
pub mod shop;

/// Errors that can occur running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The operation ran but did not take effect; the detail has already
    /// been shown as a notice.
    #[error("{0}")]
    Failed(&'static str),
}

/// Notice sink that writes to the terminal instead of the log.
struct TermNotifier;

impl Notifier for TermNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Info => println!("{}: {}", notice.title, notice.body),
            Severity::Error => eprintln!("{}: {}", notice.title, notice.body),
        }
    }
}

/// Everything a command needs: the raw API client for one-shot calls and
/// the session (with its resumed identity) for stateful ones.
pub struct Context {
    pub client: ApiClient,
    pub session: Session,
    notifier: SharedNotifier,
}

impl Context {
    /// Build the context from the environment and resume any stored
    /// session.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the state file is
    /// unreadable.
    pub async fn from_env() -> Result<Self, CommandError> {
        let config = ClientConfig::from_env()?;
        let store = LocalStore::open(&config.state_file)?;
        let client = ApiClient::new(&config);
        let notifier: SharedNotifier = Arc::new(TermNotifier);
        let session = Session::new(client.clone(), store, notifier.clone());
        session.check_auth().await;

        Ok(Self {
            client,
            session,
            notifier,
        })
    }

    /// A cart holder tied to this context's session, already refreshed.
    pub async fn cart(&self) -> CartState {
        let cart = CartState::new(
            self.client.clone(),
            self.notifier.clone(),
            self.session.subscribe(),
        );
        cart.refresh().await;
        cart
    }

    /// Fail with `message` unless somebody is logged in.
    pub fn require_login(&self, message: &'static str) -> Result<(), CommandError> {
        if self.session.current_user().is_some() {
            Ok(())
        } else {
            Err(CommandError::Failed(message))
        }
    }
}
