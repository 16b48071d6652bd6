//! # Product Handlers
//!
//! Catalogue CRUD over HTTP.
//!
//! ```text
//! GET    /api/products?name=indomie   → 200 [Product]
//! POST   /api/products                → 201 Product
//! GET    /api/products/{id}           → 200 Product | 404
//! PUT    /api/products/{id}           → 200 Product | 404
//! DELETE /api/products/{id}           → 200 {message} | 404 | 409 (already sold)
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::ApiResult;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use kasir_core::{Product, ProductInput};

/// Query string of the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive name fragment
    pub name: Option<String>,
}

#[instrument(skip(state, query))]
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(query) = query?;
    let products = state.db.products().list(query.name.as_deref()).await?;
    Ok(Json(products))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    Ok(Json(state.db.products().get_by_id(id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(input) = payload?;
    let product = state.db.products().create(&input).await?;

    info!(product_id = product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(Json(state.db.products().update(id, &input).await?))
}

#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    state.db.products().delete(id).await?;

    info!(product_id = id, "Product deleted");
    Ok(Json(MessageResponse::new("Product deleted")))
}
