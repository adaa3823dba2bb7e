use chrono::NaiveDate;

use crate::domain::birthday::{DateRange, bucket_birthdays};
use crate::dto::birthdays::UpcomingBirthdays;
use crate::repository::BirthdayReader;
use crate::services::ServiceResult;

/// Fetches the people whose birthday is coming up after `today` and groups
/// them into the display buckets.
pub async fn load_upcoming<R>(repo: &R, today: NaiveDate) -> ServiceResult<UpcomingBirthdays>
where
    R: BirthdayReader + ?Sized,
{
    let people = repo.next_birthdays(today).await.map_err(|err| {
        log::error!("Failed to load upcoming birthdays: {err}");
        err
    })?;

    Ok(UpcomingBirthdays {
        range: DateRange::from_today(today),
        buckets: bucket_birthdays(people, today),
    })
}
