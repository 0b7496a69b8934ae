//! Shared application state.

use std::sync::Arc;

use crate::application::services::MappingService;
use crate::infrastructure::persistence::PgMappingRepository;

/// State injected into every handler.
///
/// Built once in [`crate::server::run`]; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService<PgMappingRepository>>,
    /// When true, error responses carry the full diagnostic in `stack`.
    pub expose_error_stack: bool,
}

impl AppState {
    pub fn new(
        mapping_service: Arc<MappingService<PgMappingRepository>>,
        expose_error_stack: bool,
    ) -> Self {
        Self {
            mapping_service,
            expose_error_stack,
        }
    }
}
