use std::sync::Arc;

use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionError, TransactionTrait};
use tracing::{info, instrument, warn};

use crate::db::DbPool;
use crate::dto::ProjectLeaderDto;
use crate::entities::project_leader::{self, UNASSIGNED_LEADER_ID};
use crate::entities::project;
use crate::errors::ServiceError;
use crate::factories;
use crate::repositories::ProjectRepository;

/// Service for managing project leaders
#[derive(Clone)]
pub struct ProjectLeaderService {
    db: Arc<DbPool>,
}

impl ProjectLeaderService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// All leaders, the soft-deleted ones included (the flag travels with
    /// the DTO).
    #[instrument(skip(self))]
    pub async fn list_leaders(&self) -> Result<Vec<ProjectLeaderDto>, ServiceError> {
        let leaders = project_leader::Entity::find().all(&*self.db).await?;
        Ok(leaders.iter().map(ProjectLeaderDto::from).collect())
    }

    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn create_leader(&self, dto: ProjectLeaderDto) -> Result<i32, ServiceError> {
        let created = factories::new_project_leader(&dto).insert(&*self.db).await?;
        info!(leader_id = created.id, "created project leader");
        Ok(created.id)
    }

    /// Soft-deletes a leader: every project assigned to them is repointed
    /// to the unassigned sentinel first, then the deleted flag is set. The
    /// row is never removed physically.
    #[instrument(skip(self))]
    pub async fn delete_leader(&self, id: i32) -> Result<(), ServiceError> {
        if id == UNASSIGNED_LEADER_ID {
            return Err(ServiceError::InvalidOperation(
                "The unassigned sentinel leader cannot be deleted".to_string(),
            ));
        }

        let leader = project_leader::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Project leader {} not found", id)))?;

        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let projects = ProjectRepository::find_by_leader_on(txn, leader.id).await?;
                    let reassigned = projects.len();

                    for found in projects {
                        let mut active: project::ActiveModel = found.into();
                        active.project_leader_id = Set(UNASSIGNED_LEADER_ID);
                        active.update(txn).await?;
                    }

                    let mut active: project_leader::ActiveModel = leader.into();
                    active.is_deleted = Set(true);
                    active.update(txn).await?;

                    info!(reassigned, "reassigned projects to the unassigned leader");
                    Ok(())
                })
            })
            .await
            .map_err(|err| match err {
                // Domain errors keep their meaning; anything else is wrapped
                // with a generic deletion failure.
                TransactionError::Transaction(inner @ ServiceError::NotFound(_)) => inner,
                TransactionError::Transaction(inner) => {
                    warn!(error = %inner, "leader deletion rolled back");
                    ServiceError::InternalError(format!(
                        "Failed to delete project leader: {}",
                        inner
                    ))
                }
                TransactionError::Connection(e) => ServiceError::DatabaseError(e),
            })?;

        info!(leader_id = id, "soft-deleted project leader");
        Ok(())
    }
}
