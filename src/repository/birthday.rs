use chrono::NaiveDate;
use reqwest::Method;

use crate::domain::birthday::BirthdayPerson;
use crate::models::birthday::NextBirthdaysEnvelope;
use crate::models::format_wire_date;
use crate::repository::errors::RepositoryResult;
use crate::repository::{BirthdayReader, HttpRepository};

impl BirthdayReader for HttpRepository {
    async fn next_birthdays(&self, date: NaiveDate) -> RepositoryResult<Vec<BirthdayPerson>> {
        let envelope: NextBirthdaysEnvelope = self
            .send_json(
                self.request(Method::GET, "birthdays/next")
                    .query(&[("date", format_wire_date(date))]),
            )
            .await?;
        Ok(envelope.into_domain())
    }
}
