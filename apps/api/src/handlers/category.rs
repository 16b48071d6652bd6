//! Category CRUD over HTTP.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::error::ApiResult;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use kasir_core::{Category, CategoryInput};

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db.categories().list().await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = id?;
    Ok(Json(state.db.categories().get_by_id(id).await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(input) = payload?;
    let category = state.db.categories().create(&input).await?;

    info!(category_id = category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(Json(state.db.categories().update(id, &input).await?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    state.db.categories().delete(id).await?;

    info!(category_id = id, "Category deleted");
    Ok(Json(MessageResponse::new("Category deleted")))
}
