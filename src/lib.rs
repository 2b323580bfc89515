//! Projects API Library
//!
//! Layered CRUD backend for consulting projects: customers, services,
//! project leaders, projects, billable orders and per-project summaries.
#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod factories;
pub mod handlers;
pub mod migrator;
pub mod repositories;
pub mod services;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// The versioned API surface: one sub-router per resource.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", handlers::projects::project_routes())
        .nest(
            "/project-leaders",
            handlers::project_leaders::project_leader_routes(),
        )
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/services", handlers::services::service_routes())
}
