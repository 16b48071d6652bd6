//! Sales report endpoints.
//!
//! Calendar days are interpreted in the configured report offset
//! (`REPORT_UTC_OFFSET`), both for "today" and for explicit dates.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::ApiResult;
use crate::state::AppState;
use kasir_core::{ReportRange, SalesReport};

/// `?start_date=YYYY-MM-DD[&end_date=YYYY-MM-DD]`
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start_date: NaiveDate,
    /// Defaults to `start_date`
    pub end_date: Option<NaiveDate>,
}

/// `GET /api/report/today`
#[instrument(skip(state))]
pub async fn report_today(State(state): State<AppState>) -> ApiResult<Json<SalesReport>> {
    let today = Utc::now().with_timezone(&state.report_offset).date_naive();
    let range = ReportRange::daily(today, state.report_offset);

    debug!(%today, start = %range.start(), end = %range.end(), "Daily report range");
    Ok(Json(state.db.transactions().report(&range).await?))
}

/// `GET /api/report`
#[instrument(skip(state, query))]
pub async fn report_range(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<Json<SalesReport>> {
    let Query(query) = query?;
    let last = query.end_date.unwrap_or(query.start_date);
    let range = ReportRange::for_days(query.start_date, last, state.report_offset)?;

    Ok(Json(state.db.transactions().report(&range).await?))
}
