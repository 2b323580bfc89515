pub mod customers;
pub mod health;
pub mod project_leaders;
pub mod projects;
pub mod services;

use std::sync::Arc;

use crate::db::DbPool;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub projects: Arc<crate::services::ProjectService>,
    pub project_leaders: Arc<crate::services::ProjectLeaderService>,
    pub customers: Arc<crate::services::CustomerService>,
    pub catalog: Arc<crate::services::CatalogService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            projects: Arc::new(crate::services::ProjectService::new(db.clone())),
            project_leaders: Arc::new(crate::services::ProjectLeaderService::new(db.clone())),
            customers: Arc::new(crate::services::CustomerService::new(db.clone())),
            catalog: Arc::new(crate::services::CatalogService::new(db)),
        }
    }
}
