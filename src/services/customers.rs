use std::sync::Arc;

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter};
use tracing::{info, instrument};

use crate::db::DbPool;
use crate::dto::CustomerDto;
use crate::entities::{customer, order};
use crate::errors::ServiceError;
use crate::factories;

/// Service for managing customers
#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DbPool>,
}

impl CustomerService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<CustomerDto>, ServiceError> {
        let customers = customer::Entity::find().all(&*self.db).await?;
        Ok(customers.iter().map(CustomerDto::from).collect())
    }

    #[instrument(skip(self, dto), fields(customer_name = %dto.customer_name))]
    pub async fn create_customer(&self, dto: CustomerDto) -> Result<i32, ServiceError> {
        let created = factories::new_customer(&dto).insert(&*self.db).await?;
        info!(customer_id = created.id, "created customer");
        Ok(created.id)
    }

    /// Deletes a customer. Orders reference customers with a restrict
    /// foreign key, so a customer still used by orders is a conflict.
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: i32) -> Result<(), ServiceError> {
        let found = customer::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", id)))?;

        let order_count = order::Entity::find()
            .filter(order::Column::CustomerId.eq(id))
            .count(&*self.db)
            .await?;
        if order_count > 0 {
            return Err(ServiceError::Conflict(format!(
                "Customer {} is referenced by {} order(s)",
                id, order_count
            )));
        }

        found.delete(&*self.db).await?;
        info!(customer_id = id, "deleted customer");
        Ok(())
    }
}
