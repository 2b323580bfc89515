use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::json;
use validator::Validate;

use crate::dto::ProjectDto;
use crate::errors::ServiceError;
use crate::AppState;

async fn list_projects(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let projects = state.services.projects.list_projects().await?;
    Ok(Json(projects))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let found = state.services.projects.get_project(id).await?;
    Ok(Json(found))
}

async fn next_project_number(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let number = state.services.projects.next_project_number().await?;
    Ok(Json(json!({ "project_number": number })))
}

async fn create_project(
    State(state): State<AppState>,
    Json(dto): Json<ProjectDto>,
) -> Result<impl IntoResponse, ServiceError> {
    dto.validate()?;
    let id = state.services.projects.create_project(dto).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut dto): Json<ProjectDto>,
) -> Result<impl IntoResponse, ServiceError> {
    dto.id = id;
    dto.validate()?;
    state.services.projects.update_project(dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.projects.delete_project(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_project))
        .route("/", get(list_projects))
        .route("/next-number", get(next_project_number))
        .route("/:id", get(get_project))
        .route("/:id", put(update_project))
        .route("/:id", delete(delete_project))
}
