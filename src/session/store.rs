use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::state::AuthState;
use super::storage::SessionStorage;
use crate::constants::SESSION_STORAGE_KEY;
use crate::models::Session;
use crate::utils::ScamwatchError;

/// Holds the logged-in user and keeps a persisted copy in sync
///
/// Owned by the application context and handed to whoever needs to read or
/// change the session; observers use [`SessionStore::subscribe`].
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    state: watch::Sender<AuthState>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self { storage, state }
    }

    /// Restore a previously persisted session
    ///
    /// Unreadable or corrupt records are logged and treated as "no session".
    pub async fn load(&self) -> Option<Session> {
        let restored = match self.storage.read(SESSION_STORAGE_KEY).await {
            Ok(Some(json)) => match serde_json::from_str::<Session>(&json) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable stored session");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                error!(error = %e, "Error loading user");
                None
            }
        };

        debug!(restored = restored.is_some(), "Session loaded");
        self.state.send_replace(AuthState {
            user: restored.clone(),
            is_loading: false,
        });
        restored
    }

    /// Make `session` current and persist it
    ///
    /// The in-memory session is updated before the write, so it stays set
    /// even when persisting fails and the error is returned.
    pub async fn login(&self, session: Session) -> Result<(), ScamwatchError> {
        info!(user_id = session.id, username = %session.username, "Logged in");
        let json = serde_json::to_string(&session)?;
        self.state.send_modify(|state| state.user = Some(session));

        self.storage
            .write(SESSION_STORAGE_KEY, &json)
            .await
            .inspect_err(|e| error!(error = %e, "Error storing user data"))
    }

    /// Forget the current session in memory and on disk
    pub async fn logout(&self) -> Result<(), ScamwatchError> {
        self.state.send_modify(|state| state.user = None);
        info!("Logged out");

        self.storage
            .remove(SESSION_STORAGE_KEY)
            .await
            .inspect_err(|e| error!(error = %e, "Error clearing user data"))
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn current(&self) -> Option<Session> {
        self.state.borrow().user.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().is_logged_in()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Observe every subsequent state change
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// The current session, or an error for actions that need one
    pub fn require_login(&self) -> Result<Session, ScamwatchError> {
        self.current().ok_or(ScamwatchError::NotLoggedIn)
    }

    /// The current session if it belongs to an admin
    pub fn require_admin(&self) -> Result<Session, ScamwatchError> {
        let session = self.require_login()?;
        if session.is_admin {
            Ok(session)
        } else {
            Err(ScamwatchError::AccessDenied(
                "You need admin privileges to access this page".to_string(),
            ))
        }
    }
}
