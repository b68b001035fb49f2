//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use ledger_registry::{AccountRegistry, AssetRegistry, MemoryRegistry};
use tokio_util::sync::CancellationToken;

/// Default bound on a whole batch, measured from receipt.
pub const DEFAULT_BATCH_DEADLINE: Duration = Duration::from_secs(30);

/// Default maximum number of items in one batch request.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Service limits.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub batch_deadline: Duration,
    pub max_batch_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            batch_deadline: DEFAULT_BATCH_DEADLINE,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

/// State shared by every handler.
///
/// The registries are trait objects so the pipeline can be exercised
/// against any create/define collaborator.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountRegistry>,
    pub assets: Arc<dyn AssetRegistry>,
    pub config: AppConfig,
    /// Cancelled on server shutdown. Every batch runs under a child of it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(accounts: Arc<dyn AccountRegistry>, assets: Arc<dyn AssetRegistry>, config: AppConfig) -> Self {
        Self {
            accounts,
            assets,
            config,
            shutdown: CancellationToken::new(),
        }
    }

    /// State backed by a single in-memory registry for both entity kinds.
    pub fn with_registry(registry: MemoryRegistry, config: AppConfig) -> Self {
        let registry = Arc::new(registry);
        Self::new(registry.clone(), registry, config)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("shutdown", &self.shutdown.is_cancelled())
            .finish_non_exhaustive()
    }
}
