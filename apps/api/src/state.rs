//! Shared router state.

use chrono::FixedOffset;

use kasir_db::Database;

/// Handed to every handler through `State<AppState>`.
///
/// Cheap to clone: `Database` wraps a pooled handle.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,

    /// Offset whose calendar day `/api/report/today` covers.
    pub report_offset: FixedOffset,
}

impl AppState {
    pub fn new(db: Database, report_offset: FixedOffset) -> Self {
        AppState { db, report_offset }
    }
}
