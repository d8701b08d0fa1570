use std::sync::Arc;

use crate::config::Config;
use crate::packing::PackageCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup, read-only afterwards. Each solve borrows it.
    pub catalog: Arc<PackageCatalog>,
    pub config: Config,
}
