use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set, TransactionTrait,
};
use tracing::{info, instrument};

use crate::db::DbPool;
use crate::dto::{OrderDto, ProjectDto, SummaryDto};
use crate::entities::{customer, order, project, project_leader, service, summary};
use crate::errors::ServiceError;
use crate::factories;
use crate::repositories::{ProjectGraph, ProjectRepository};

/// Service for managing projects, including the order-reconciling update
/// workflow.
#[derive(Clone)]
pub struct ProjectService {
    db: Arc<DbPool>,
    repository: ProjectRepository,
}

impl ProjectService {
    pub fn new(db: Arc<DbPool>) -> Self {
        let repository = ProjectRepository::new(db.clone());
        Self { db, repository }
    }

    /// Next free project number based on the highest existing one.
    #[instrument(skip(self))]
    pub async fn next_project_number(&self) -> Result<String, ServiceError> {
        let max = self.repository.max_project_number().await?;
        Ok(next_in_sequence(max.as_deref()))
    }

    /// Creates a project with its initial orders and optional summary in a
    /// single transaction.
    #[instrument(skip(self, dto), fields(project_number = %dto.project_number))]
    pub async fn create_project(&self, dto: ProjectDto) -> Result<i32, ServiceError> {
        ensure_distinct_order_keys(&dto.orders)?;

        let id = self
            .db
            .transaction::<_, i32, ServiceError>(move |txn| {
                Box::pin(async move {
                    let leader = project_leader::Entity::find_by_id(dto.project_leader_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Project leader {} not found",
                                dto.project_leader_id
                            ))
                        })?;

                    let created = factories::new_project(&dto, &leader)?.insert(txn).await?;

                    for order_dto in &dto.orders {
                        resolve_order_references(txn, order_dto).await?;
                        factories::new_order(created.id, order_dto).insert(txn).await?;
                    }

                    if let Some(summary_dto) = &dto.summary {
                        factories::new_summary(created.id, summary_dto)
                            .insert(txn)
                            .await?;
                    }

                    Ok(created.id)
                })
            })
            .await
            .map_err(ServiceError::from)?;

        info!(project_id = id, "created project");
        Ok(id)
    }

    /// All projects with their full graphs.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<ProjectDto>, ServiceError> {
        let graphs = self.repository.find_all_with_details().await?;
        Ok(graphs.into_iter().map(to_project_dto).collect())
    }

    /// One project with leader name, orders and summary.
    #[instrument(skip(self))]
    pub async fn get_project(&self, id: i32) -> Result<ProjectDto, ServiceError> {
        let graph = self
            .repository
            .find_with_details(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Project {} not found", id)))?;
        Ok(to_project_dto(graph))
    }

    /// Reconciles a full project DTO against the persisted graph.
    ///
    /// Header fields are overwritten, orders are diffed by
    /// (customer, service) key, the summary is upserted. Everything runs in
    /// one transaction; any failure rolls the whole update back.
    #[instrument(skip(self, dto), fields(project_id = dto.id))]
    pub async fn update_project(&self, dto: ProjectDto) -> Result<(), ServiceError> {
        ensure_distinct_order_keys(&dto.orders)?;

        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let graph = ProjectRepository::find_with_details_on(txn, dto.id)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Project {} not found", dto.id))
                        })?;

                    factories::validate_date_range(dto.start_date, dto.end_date)?;

                    project_leader::Entity::find_by_id(dto.project_leader_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Project leader {} not found",
                                dto.project_leader_id
                            ))
                        })?;

                    let project_id = graph.project.id;
                    let mut header: project::ActiveModel = graph.project.into();
                    header.project_number = Set(dto.project_number.clone());
                    header.description = Set(dto.description.clone());
                    header.start_date = Set(dto.start_date);
                    header.end_date = Set(dto.end_date);
                    header.project_leader_id = Set(dto.project_leader_id);
                    if let Some(status) = dto.status.as_deref().filter(|s| !s.trim().is_empty()) {
                        header.status = Set(status.to_string());
                    }
                    header.update(txn).await?;

                    reconcile_orders(txn, project_id, &dto.orders, graph.orders).await?;

                    if let Some(summary_dto) = &dto.summary {
                        upsert_summary(txn, project_id, summary_dto, graph.summary).await?;
                    }

                    Ok(())
                })
            })
            .await
            .map_err(ServiceError::from)?;

        info!("updated project");
        Ok(())
    }

    /// Deletes a project together with its orders and summary.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: i32) -> Result<(), ServiceError> {
        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let found = project::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Project {} not found", id))
                        })?;

                    order::Entity::delete_many()
                        .filter(order::Column::ProjectId.eq(found.id))
                        .exec(txn)
                        .await?;
                    summary::Entity::delete_many()
                        .filter(summary::Column::ProjectId.eq(found.id))
                        .exec(txn)
                        .await?;
                    found.delete(txn).await?;

                    Ok(())
                })
            })
            .await
            .map_err(ServiceError::from)?;

        info!(project_id = id, "deleted project");
        Ok(())
    }
}

/// The (customer, service) pair is an order's identity within its project,
/// so a request may not carry it twice.
fn ensure_distinct_order_keys(orders: &[OrderDto]) -> Result<(), ServiceError> {
    let mut seen = HashSet::with_capacity(orders.len());
    for order_dto in orders {
        if !seen.insert(order_dto.key()) {
            return Err(ServiceError::InvalidInput(format!(
                "Duplicate order for customer {} and service {}",
                order_dto.customer_id, order_dto.service_id
            )));
        }
    }
    Ok(())
}

/// Diffs desired against existing orders by (customer, service) key:
/// matches get their hours/price overwritten, leftovers are deleted, new
/// keys are inserted once their referenced rows resolve.
async fn reconcile_orders<C: sea_orm::ConnectionTrait>(
    txn: &C,
    project_id: i32,
    desired: &[OrderDto],
    existing: Vec<(order::Model, Option<customer::Model>, Option<service::Model>)>,
) -> Result<(), ServiceError> {
    let mut existing: HashMap<(i32, i32), order::Model> = existing
        .into_iter()
        .map(|(o, _, _)| ((o.customer_id, o.service_id), o))
        .collect();

    for order_dto in desired {
        match existing.remove(&order_dto.key()) {
            Some(current) => {
                let mut active: order::ActiveModel = current.into();
                active.hours = Set(order_dto.hours);
                active.price = Set(order_dto.price);
                active.update(txn).await?;
            }
            None => {
                resolve_order_references(txn, order_dto).await?;
                factories::new_order(project_id, order_dto).insert(txn).await?;
            }
        }
    }

    for (_, stale) in existing {
        stale.delete(txn).await?;
    }

    Ok(())
}

/// An order's customer and service rows must exist before insert.
async fn resolve_order_references<C: sea_orm::ConnectionTrait>(
    txn: &C,
    order_dto: &OrderDto,
) -> Result<(), ServiceError> {
    service::Entity::find_by_id(order_dto.service_id)
        .one(txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Service {} not found", order_dto.service_id)))?;
    customer::Entity::find_by_id(order_dto.customer_id)
        .one(txn)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Customer {} not found", order_dto.customer_id))
        })?;
    Ok(())
}

async fn upsert_summary<C: sea_orm::ConnectionTrait>(
    txn: &C,
    project_id: i32,
    dto: &SummaryDto,
    existing: Option<summary::Model>,
) -> Result<(), ServiceError> {
    match existing {
        Some(current) => {
            let mut active: summary::ActiveModel = current.into();
            active.total_hours = Set(dto.total_hours);
            active.total_price = Set(dto.total_price);
            active.notes = Set(dto.notes.clone());
            active.update(txn).await?;
        }
        None => {
            factories::new_summary(project_id, dto).insert(txn).await?;
        }
    }
    Ok(())
}

fn to_project_dto(graph: ProjectGraph) -> ProjectDto {
    let mut dto = ProjectDto::from_header(&graph.project, graph.leader.as_ref());
    dto.orders = graph
        .orders
        .iter()
        .map(|(o, c, s)| {
            OrderDto::from_model(
                o,
                c.as_ref().map(|c| c.customer_name.clone()),
                s.as_ref().map(|s| s.service_name.clone()),
            )
        })
        .collect();
    dto.summary = graph.summary.as_ref().map(SummaryDto::from);
    dto
}

/// "P-7" -> "P-8"; anything unparsable (or an empty table) starts at "P-1".
fn next_in_sequence(max_number: Option<&str>) -> String {
    let next = max_number
        .and_then(|n| n.rsplit('-').next())
        .and_then(|part| part.parse::<u32>().ok())
        .map(|n| n + 1)
        .unwrap_or(1);
    format!("P-{}", next)
}
