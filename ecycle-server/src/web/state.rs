//! Application state for the web layer.

use std::path::PathBuf;
use std::sync::Arc;

use crate::advisor::RepairAdvisor;
use crate::bins::CachedBinSource;

/// Shared application state.
///
/// Contains everything needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Mtime-keyed cache over the bin source file
    pub bins: Arc<CachedBinSource>,

    /// Repair consultation gateway
    pub advisor: Arc<RepairAdvisor>,

    /// Path to the CSV source
    pub data_path: Arc<PathBuf>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(bins: CachedBinSource, advisor: RepairAdvisor, data_path: PathBuf) -> Self {
        Self {
            bins: Arc::new(bins),
            advisor: Arc::new(advisor),
            data_path: Arc::new(data_path),
        }
    }
}
