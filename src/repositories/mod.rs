use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub mod project_repository;

pub use project_repository::{ProjectGraph, ProjectRepository};

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

/// Shared connection handle for repositories. Simple entities are served
/// straight through sea-orm's `EntityTrait`; repositories exist for the
/// queries that need more than that.
#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}
