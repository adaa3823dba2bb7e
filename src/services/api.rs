use chrono::NaiveDate;

use crate::dto::api::{BirthdaysQuery, BirthdaysResponse};
use crate::repository::BirthdayReader;
use crate::services::ServiceResult;
use crate::services::birthdays::load_upcoming;

/// Returns the upcoming birthdays relative to the requested day, or to
/// `today` when the caller did not pass one.
pub async fn upcoming_birthdays<R>(
    repo: &R,
    params: BirthdaysQuery,
    today: NaiveDate,
) -> ServiceResult<BirthdaysResponse>
where
    R: BirthdayReader + ?Sized,
{
    let upcoming = load_upcoming(repo, params.date.unwrap_or(today)).await?;
    let total = upcoming.buckets.iter().map(|b| b.entries.len()).sum();

    Ok(BirthdaysResponse {
        today: upcoming.range.today,
        next_day: upcoming.range.next_day,
        next_week: upcoming.range.next_week,
        next_month: upcoming.range.next_month,
        total,
        buckets: upcoming.buckets,
    })
}
