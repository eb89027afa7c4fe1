//! Command implementations and the shared client context.

use std::io::{BufRead, Write as _};
use std::path::PathBuf;
use std::sync::Arc;

use liquid_luxury_client::config::ClientConfig;
use liquid_luxury_client::error::ClientError;
use liquid_luxury_client::gateway::ApiClient;
use liquid_luxury_client::notice::{NoticeLevel, NoticeSink};
use liquid_luxury_client::resource::ResourceCache;
use liquid_luxury_client::session::Session;
use liquid_luxury_client::storage::{JsonFileStore, StorageBackend};

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod wishlist;

/// Everything a command needs: the session and the cached gateway.
pub struct Context {
    pub session: Session,
    pub resources: ResourceCache,
}

impl Context {
    /// Build the context from environment configuration, with state
    /// persisted to a JSON file so login survives across invocations.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if configuration is missing, the HTTP
    /// client cannot be built, or the state file cannot be opened.
    pub fn from_env() -> Result<Self, ClientError> {
        let config = ClientConfig::from_env()?;
        let path = config
            .storage_path
            .clone()
            .unwrap_or_else(default_storage_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::Storage(format!("create {}: {e}", parent.display())))?;
        }
        let store: Arc<dyn StorageBackend> = Arc::new(JsonFileStore::open(&path)?);
        let session = Session::new(store);
        let resources = ResourceCache::new(ApiClient::new(&config, session.clone())?);
        Ok(Self { session, resources })
    }
}

fn default_storage_path() -> PathBuf {
    std::env::var_os("HOME")
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(".liquid-luxury")
        .join("session.json")
}

/// Print drained notices at the level they carry.
pub fn report(notices: &mut NoticeSink) {
    for notice in notices.take_notices() {
        match notice.level {
            NoticeLevel::Success => tracing::info!("{}", notice.message),
            NoticeLevel::Error => tracing::error!("{}", notice.message),
        }
    }
}

/// Ask for confirmation on destructive operations unless `--yes` was given.
pub fn confirm(prompt: &str, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }
    print!("{prompt} [y/N] ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}
