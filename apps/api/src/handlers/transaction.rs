//! # Checkout Handlers
//!
//! ```text
//! POST /api/checkout
//!   {"items":[{"product_id":1,"quantity":2}]}   or   [{"product_id":1,"quantity":2}]
//!      │
//!      ▼
//! TransactionRepository::checkout  (one unit of work, all lines or none)
//!      │
//!      ├── 201 Transaction
//!      ├── 400 VALIDATION_ERROR / INSUFFICIENT_STOCK
//!      ├── 404 NOT_FOUND (unknown product)
//!      └── 503 STORAGE_BUSY (lock wait expired, safe to retry)
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiResult;
use crate::state::AppState;
use kasir_core::{CheckoutLine, Transaction};

/// Checkout body. Both the wrapped and the bare-array form are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckoutRequest {
    Wrapped { items: Vec<CheckoutLine> },
    Lines(Vec<CheckoutLine>),
}

impl CheckoutRequest {
    pub fn into_lines(self) -> Vec<CheckoutLine> {
        match self {
            CheckoutRequest::Wrapped { items } => items,
            CheckoutRequest::Lines(lines) => lines,
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let Json(request) = payload?;
    let lines = request.into_lines();

    let transaction = state.db.transactions().checkout(&lines).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

#[instrument(skip(state))]
pub async fn get_transaction(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Transaction>> {
    let Path(id) = id?;
    Ok(Json(state.db.transactions().get_by_id(id).await?))
}
