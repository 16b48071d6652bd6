//! # HTTP Handlers
//!
//! One module per resource. Handlers only decode the request, call a
//! repository, and encode the result; every rule lives in kasir-core or
//! kasir-db.
//!
//! ```text
//! ┌──────────────┬────────────────────────────────────────────────────────┐
//! │ health       │ GET /health                                            │
//! │ product      │ /api/products, /api/products/{id}                      │
//! │ category     │ /api/categories, /api/categories/{id}                  │
//! │ transaction  │ POST /api/checkout, GET /api/transactions/{id}         │
//! │ report       │ GET /api/report/today, GET /api/report?start_date=..   │
//! └──────────────┴────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

pub mod category;
pub mod health;
pub mod product;
pub mod report;
pub mod transaction;

/// Body of successful deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
