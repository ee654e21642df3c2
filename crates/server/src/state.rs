use std::sync::Arc;

use bookfinder_core::{Config, LibraryState, SanitizedConfig, SearchOrchestrator};
use tokio::sync::RwLock;

/// Shared application state
pub struct AppState {
    config: Config,
    orchestrator: Arc<SearchOrchestrator>,
    library: Arc<RwLock<LibraryState>>,
}

impl AppState {
    pub fn new(
        config: Config,
        orchestrator: Arc<SearchOrchestrator>,
        library: LibraryState,
    ) -> Self {
        Self {
            config,
            orchestrator,
            library: Arc::new(RwLock::new(library)),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator {
        self.orchestrator.as_ref()
    }

    pub fn library(&self) -> &Arc<RwLock<LibraryState>> {
        &self.library
    }
}
