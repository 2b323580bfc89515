use std::sync::Arc;

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter};
use tracing::{info, instrument};

use crate::db::DbPool;
use crate::dto::ServiceDto;
use crate::entities::{order, service};
use crate::errors::ServiceError;
use crate::factories;

/// Service for the catalog of billable services referenced by orders.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DbPool>,
}

impl CatalogService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_services(&self) -> Result<Vec<ServiceDto>, ServiceError> {
        let services = service::Entity::find().all(&*self.db).await?;
        Ok(services.iter().map(ServiceDto::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_service(&self, id: i32) -> Result<ServiceDto, ServiceError> {
        let found = service::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Service {} not found", id)))?;
        Ok(ServiceDto::from(&found))
    }

    #[instrument(skip(self, dto), fields(service_name = %dto.service_name))]
    pub async fn create_service(&self, dto: ServiceDto) -> Result<i32, ServiceError> {
        let created = factories::new_service(&dto).insert(&*self.db).await?;
        info!(service_id = created.id, "created service");
        Ok(created.id)
    }

    /// Deletes a catalog service unless orders still reference it
    /// (restrict foreign key).
    #[instrument(skip(self))]
    pub async fn delete_service(&self, id: i32) -> Result<(), ServiceError> {
        let found = service::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Service {} not found", id)))?;

        let order_count = order::Entity::find()
            .filter(order::Column::ServiceId.eq(id))
            .count(&*self.db)
            .await?;
        if order_count > 0 {
            return Err(ServiceError::Conflict(format!(
                "Service {} is referenced by {} order(s)",
                id, order_count
            )));
        }

        found.delete(&*self.db).await?;
        info!(service_id = id, "deleted service");
        Ok(())
    }
}
