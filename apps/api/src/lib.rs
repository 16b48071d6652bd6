//! # Kasir API
//!
//! HTTP/JSON surface of the Kasir point-of-sale backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Kasir API                                    │
//! │                                                                         │
//! │  Client ──► axum Router ──► handlers ──► kasir-db ──► SQLite (WAL)     │
//! │               │                              │                          │
//! │          TraceLayer                    kasir-core                       │
//! │        (request spans)          (validation, checkout draft,           │
//! │                                   report ranges)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Routes
//! | Method | Path                      | Handler                                |
//! |--------|---------------------------|----------------------------------------|
//! | GET    | `/health`                 | [`handlers::health::health`]           |
//! | GET    | `/api/products`           | [`handlers::product::list_products`]   |
//! | POST   | `/api/products`           | [`handlers::product::create_product`]  |
//! | GET    | `/api/products/{id}`      | [`handlers::product::get_product`]     |
//! | PUT    | `/api/products/{id}`      | [`handlers::product::update_product`]  |
//! | DELETE | `/api/products/{id}`      | [`handlers::product::delete_product`]  |
//! | GET    | `/api/categories`         | [`handlers::category::list_categories`]|
//! | POST   | `/api/categories`         | [`handlers::category::create_category`]|
//! | GET    | `/api/categories/{id}`    | [`handlers::category::get_category`]   |
//! | PUT    | `/api/categories/{id}`    | [`handlers::category::update_category`]|
//! | DELETE | `/api/categories/{id}`    | [`handlers::category::delete_category`]|
//! | POST   | `/api/checkout`           | [`handlers::transaction::checkout`]    |
//! | GET    | `/api/transactions/{id}`  | [`handlers::transaction::get_transaction`] |
//! | GET    | `/api/report/today`       | [`handlers::report::report_today`]     |
//! | GET    | `/api/report`             | [`handlers::report::report_range`]     |

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

use handlers::{category, health, product, report, transaction};

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/products",
            get(product::list_products).post(product::create_product),
        )
        .route(
            "/products/{id}",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .route(
            "/categories",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/categories/{id}",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        .route("/checkout", post(transaction::checkout))
        .route("/transactions/{id}", get(transaction::get_transaction))
        .route("/report/today", get(report::report_today))
        .route("/report", get(report::report_range));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
