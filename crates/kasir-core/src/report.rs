//! # Report Ranges
//!
//! Day-boundary math for sales reports. Reports filter transactions by an
//! inclusive `[start, end]` range of UTC instants; this module turns calendar
//! days in the store's reference offset into such ranges.
//!
//! ```text
//! reference offset +07:00, day 2024-03-10
//!
//!   local  2024-03-10 00:00:00.000000000  ──►  UTC 2024-03-09 17:00:00
//!   local  2024-03-10 23:59:59.999999999  ──►  UTC 2024-03-10 16:59:59.999999999
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// An inclusive range of instants a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ReportRange {
    /// A single calendar day in the given offset.
    pub fn daily(day: NaiveDate, offset: FixedOffset) -> Self {
        ReportRange {
            start: start_of_day(day, offset),
            end: end_of_day(day, offset),
        }
    }

    /// From the start of `first` to the end of `last`, both in `offset`.
    ///
    /// ## User Workflow
    /// ```text
    /// GET /api/report?start_date=2024-03-01&end_date=2024-03-07
    ///      │
    ///      ▼
    /// for_days(03-01, 03-07, +07:00) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// [03-01 00:00:00 local, 03-07 23:59:59.999999999 local]
    /// ```
    pub fn for_days(
        first: NaiveDate,
        last: NaiveDate,
        offset: FixedOffset,
    ) -> ValidationResult<Self> {
        if first > last {
            return Err(ValidationError::InvalidFormat {
                field: "date range".to_string(),
                reason: format!("start_date {first} is after end_date {last}"),
            });
        }
        Ok(ReportRange {
            start: start_of_day(first, offset),
            end: end_of_day(last, offset),
        })
    }

    #[inline]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

fn start_of_day(day: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    local_to_utc(day, NaiveTime::MIN, offset)
}

fn end_of_day(day: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    // 23:59:59 plus 999_999_999 ns is always a valid NaiveTime
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    local_to_utc(day, last, offset)
}

fn local_to_utc(day: NaiveDate, time: NaiveTime, offset: FixedOffset) -> DateTime<Utc> {
    let naive = day.and_time(time);
    // A fixed offset maps every local time to exactly one instant.
    match offset.from_local_datetime(&naive).single() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&(naive - offset)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
