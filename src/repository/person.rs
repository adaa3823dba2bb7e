use reqwest::Method;

use crate::domain::person::{NewPerson, Person};
use crate::domain::types::PersonId;
use crate::models::person::{PeopleEnvelope, PersonPayload, PersonRecord};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{HttpRepository, PersonListQuery, PersonReader, PersonWriter};

impl PersonListQuery {
    /// Query-string pairs understood by the people listing endpoint.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("pageNumber", self.pagination.page.to_string()),
            ("pageSize", self.pagination.per_page.to_string()),
        ];
        if let Some(term) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", term.to_string()));
        }
        if let Some((field, order)) = self.sort {
            params.push(("sortBy", field.as_str().to_string()));
            params.push(("sortOrder", order.as_str().to_string()));
        }
        params
    }
}

fn into_person(record: PersonRecord) -> RepositoryResult<Person> {
    Person::try_from(record).map_err(RepositoryError::from)
}

impl PersonReader for HttpRepository {
    async fn list_people(&self, query: PersonListQuery) -> RepositoryResult<(usize, Vec<Person>)> {
        let envelope: PeopleEnvelope = self
            .send_json(self.request(Method::GET, "people").query(&query.to_params()))
            .await?;
        Ok(envelope.into_domain())
    }

    async fn get_person(&self, id: PersonId) -> RepositoryResult<Option<Person>> {
        match self
            .send_json::<PersonRecord>(self.request(Method::GET, &format!("people/{id}")))
            .await
        {
            Ok(record) => into_person(record).map(Some),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

impl PersonWriter for HttpRepository {
    async fn create_person(&self, person: &NewPerson) -> RepositoryResult<Person> {
        let record: PersonRecord = self
            .send_json(
                self.request(Method::POST, "people")
                    .json(&PersonPayload::from(person)),
            )
            .await?;
        into_person(record)
    }

    async fn update_person(&self, id: PersonId, person: &NewPerson) -> RepositoryResult<Person> {
        let record: PersonRecord = self
            .send_json(
                self.request(Method::PUT, &format!("people/{id}"))
                    .json(&PersonPayload::from(person)),
            )
            .await?;
        into_person(record)
    }

    async fn delete_person(&self, id: PersonId) -> RepositoryResult<()> {
        self.send(self.request(Method::DELETE, &format!("people/{id}")))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{SortField, SortOrder};

    #[test]
    fn params_include_only_present_filters() {
        let query = PersonListQuery::new(2, 50);
        assert_eq!(
            query.to_params(),
            vec![("pageNumber", "2".to_string()), ("pageSize", "50".to_string())]
        );

        let query = PersonListQuery::new(1, 50)
            .search("ali")
            .sort(SortField::BirthDate, SortOrder::Desc);
        assert_eq!(
            query.to_params(),
            vec![
                ("pageNumber", "1".to_string()),
                ("pageSize", "50".to_string()),
                ("search", "ali".to_string()),
                ("sortBy", "birthDate".to_string()),
                ("sortOrder", "desc".to_string()),
            ]
        );
    }
}
