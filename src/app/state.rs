use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::api::Gateway;
use crate::app::Config;
use crate::session::{FileStorage, MemoryStorage, SessionStorage, SessionStore};

/// Application context owned by the composition root
///
/// Handlers receive it by reference instead of reaching for globals.
pub struct AppContext {
    /// Configuration
    pub config: Config,
    /// Remote service
    pub gateway: Gateway,
    /// Logged-in user
    pub session: SessionStore,
}

impl AppContext {
    /// Wire up the gateway and session store and restore any saved session
    ///
    /// `ephemeral` keeps the session in memory only.
    pub async fn bootstrap(config: Config, ephemeral: bool) -> Result<Self> {
        let storage: Arc<dyn SessionStorage> = if ephemeral {
            Arc::new(MemoryStorage::default())
        } else {
            let dir = config.storage.resolve_data_dir()?;
            debug!(dir = %dir.display(), "Using file session storage");
            Arc::new(FileStorage::new(dir))
        };

        let gateway = Gateway::new(&config.api)?;
        let context = Self::new(config, gateway, SessionStore::new(storage));
        context.session.load().await;
        Ok(context)
    }

    pub fn new(config: Config, gateway: Gateway, session: SessionStore) -> Self {
        Self {
            config,
            gateway,
            session,
        }
    }
}
