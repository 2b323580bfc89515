use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde_json::json;
use validator::Validate;

use crate::dto::ProjectLeaderDto;
use crate::errors::ServiceError;
use crate::AppState;

async fn list_project_leaders(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let leaders = state.services.project_leaders.list_leaders().await?;
    Ok(Json(leaders))
}

async fn create_project_leader(
    State(state): State<AppState>,
    Json(dto): Json<ProjectLeaderDto>,
) -> Result<impl IntoResponse, ServiceError> {
    dto.validate()?;
    let id = state.services.project_leaders.create_leader(dto).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn delete_project_leader(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.project_leaders.delete_leader(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn project_leader_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_project_leaders))
        .route("/", post(create_project_leader))
        .route("/:id", delete(delete_project_leader))
}
