//! DTOs exposed by the JSON API endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::birthday::BirthdayBucket;

/// Query parameters accepted by `/api/v1/birthdays`.
#[derive(Debug, Default, Deserialize)]
pub struct BirthdaysQuery {
    /// Reference day; the local calendar day when absent.
    pub date: Option<NaiveDate>,
}

/// Upcoming birthdays grouped in display order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdaysResponse {
    pub today: NaiveDate,
    pub next_day: NaiveDate,
    pub next_week: NaiveDate,
    pub next_month: NaiveDate,
    pub total: usize,
    pub buckets: Vec<BirthdayBucket>,
}
