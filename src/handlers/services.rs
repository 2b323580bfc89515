use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde_json::json;
use validator::Validate;

use crate::dto::ServiceDto;
use crate::errors::ServiceError;
use crate::AppState;

async fn list_services(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let services = state.services.catalog.list_services().await?;
    Ok(Json(services))
}

async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let found = state.services.catalog.get_service(id).await?;
    Ok(Json(found))
}

async fn create_service(
    State(state): State<AppState>,
    Json(dto): Json<ServiceDto>,
) -> Result<impl IntoResponse, ServiceError> {
    dto.validate()?;
    let id = state.services.catalog.create_service(dto).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.catalog.delete_service(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services))
        .route("/", post(create_service))
        .route("/:id", get(get_service))
        .route("/:id", delete(delete_service))
}
