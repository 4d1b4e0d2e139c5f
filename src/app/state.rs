use std::sync::Arc;

use crate::adapters::auth::TokenAuthority;
use crate::adapters::storage::{FileParcelStore, MemoryParcelStore};
use crate::config::ServerConfig;
use crate::domain::ports::{ParcelStore, ServerSettings};

pub struct AppState {
    /// `None` when no store could be connected; store-backed routes answer 500.
    pub store: Option<Arc<dyn ParcelStore>>,
    pub tokens: TokenAuthority,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn ParcelStore>>, tokens: TokenAuthority) -> Arc<Self> {
        Arc::new(Self { store, tokens })
    }

    pub async fn from_config(config: &ServerConfig) -> Arc<Self> {
        let store = connect_store(config).await;
        let tokens = TokenAuthority::new(config.jwt_secret(), config.token_ttl_days());
        Self::new(store, tokens)
    }
}

/// Mirrors a database that may be unreachable at boot: failures are logged
/// and the server starts without a store.
pub async fn connect_store(config: &ServerConfig) -> Option<Arc<dyn ParcelStore>> {
    match config.storage.backend.as_str() {
        "memory" => {
            tracing::info!("Using in-memory parcel store");
            let store: Arc<dyn ParcelStore> = Arc::new(MemoryParcelStore::new());
            Some(store)
        }
        "file" => match FileParcelStore::open(&config.storage.data_dir).await {
            Ok(store) => {
                let store: Arc<dyn ParcelStore> = Arc::new(store);
                Some(store)
            }
            Err(e) => {
                tracing::error!("Parcel store connection error: {}", e);
                tracing::warn!("Could not open the parcel store; store routes will return an error");
                None
            }
        },
        _ => {
            tracing::warn!("Parcel store disabled; store routes will return an error");
            None
        }
    }
}
