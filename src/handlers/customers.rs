use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde_json::json;
use validator::Validate;

use crate::dto::CustomerDto;
use crate::errors::ServiceError;
use crate::AppState;

async fn list_customers(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let customers = state.services.customers.list_customers().await?;
    Ok(Json(customers))
}

async fn create_customer(
    State(state): State<AppState>,
    Json(dto): Json<CustomerDto>,
) -> Result<impl IntoResponse, ServiceError> {
    dto.validate()?;
    let id = state.services.customers.create_customer(dto).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.customers.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers))
        .route("/", post(create_customer))
        .route("/:id", delete(delete_customer))
}
