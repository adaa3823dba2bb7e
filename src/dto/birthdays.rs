use crate::domain::birthday::{BirthdayBucket, DateRange};

/// Data required to render the upcoming birthdays.
#[derive(Debug)]
pub struct UpcomingBirthdays {
    pub range: DateRange,
    pub buckets: Vec<BirthdayBucket>,
}

impl UpcomingBirthdays {
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(BirthdayBucket::is_empty)
    }
}
