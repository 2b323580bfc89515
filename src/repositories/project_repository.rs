use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    QueryFilter, QueryOrder,
};
use std::sync::Arc;

use crate::entities::{customer, order, project, project_leader, service, summary};
use crate::errors::ServiceError;
use crate::repositories::{BaseRepository, Repository};

/// A project with everything the presentation layer needs in one fetch:
/// leader, orders (with the customer and service rows they reference) and
/// the optional summary.
#[derive(Debug, Clone)]
pub struct ProjectGraph {
    pub project: project::Model,
    pub leader: Option<project_leader::Model>,
    pub orders: Vec<(order::Model, Option<customer::Model>, Option<service::Model>)>,
    pub summary: Option<summary::Model>,
}

/// Repository for project graph queries
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    base: BaseRepository,
}

impl ProjectRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Load one project with its leader, orders and summary.
    ///
    /// Generic over the connection so the update workflow can reuse it
    /// inside a transaction.
    pub async fn find_with_details_on<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<ProjectGraph>, ServiceError> {
        let Some(found) = project::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        Ok(Some(Self::load_graph(db, found).await?))
    }

    pub async fn find_with_details(&self, id: i32) -> Result<Option<ProjectGraph>, ServiceError> {
        Self::find_with_details_on(self.base.get_db(), id).await
    }

    /// Load every project as a full graph, ordered by project number.
    pub async fn find_all_with_details(&self) -> Result<Vec<ProjectGraph>, ServiceError> {
        let db = self.base.get_db();
        let projects = project::Entity::find()
            .order_by_asc(project::Column::Id)
            .all(db)
            .await?;

        let mut graphs = Vec::with_capacity(projects.len());
        for found in projects {
            graphs.push(Self::load_graph(db, found).await?);
        }
        Ok(graphs)
    }

    /// Highest existing project number, by insertion order.
    pub async fn max_project_number(&self) -> Result<Option<String>, ServiceError> {
        let last = project::Entity::find()
            .order_by_desc(project::Column::Id)
            .one(self.base.get_db())
            .await?;
        Ok(last.map(|p| p.project_number))
    }

    /// All projects currently assigned to the given leader.
    pub async fn find_by_leader_on<C: ConnectionTrait>(
        db: &C,
        leader_id: i32,
    ) -> Result<Vec<project::Model>, ServiceError> {
        let projects = project::Entity::find()
            .filter(project::Column::ProjectLeaderId.eq(leader_id))
            .all(db)
            .await?;
        Ok(projects)
    }

    async fn load_graph<C: ConnectionTrait>(
        db: &C,
        found: project::Model,
    ) -> Result<ProjectGraph, ServiceError> {
        let leader = found.find_related(project_leader::Entity).one(db).await?;
        let summary = found.find_related(summary::Entity).one(db).await?;

        let orders = found.find_related(order::Entity).all(db).await?;
        let customers = orders.load_one(customer::Entity, db).await?;
        let services = orders.load_one(service::Entity, db).await?;

        let orders = orders
            .into_iter()
            .zip(customers)
            .zip(services)
            .map(|((order, customer), service)| (order, customer, service))
            .collect();

        Ok(ProjectGraph {
            project: found,
            leader,
            orders,
            summary,
        })
    }
}

impl Repository for ProjectRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
