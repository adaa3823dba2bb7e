use serde::{Deserialize, Serialize};

use crate::domain::person::{ApplicationMetadata, NewPerson, Person};
use crate::domain::types::{Application, PersonId, TypeConstraintError};
use crate::models::{format_wire_date, parse_wire_date};

/// Person as sent by the backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(alias = "birthdate")]
    pub birth_date: Option<String>,
    pub application: Option<String>,
    #[serde(alias = "metadata")]
    pub application_metadata: Option<ApplicationMetadata>,
}

impl TryFrom<PersonRecord> for Person {
    type Error = TypeConstraintError;

    fn try_from(record: PersonRecord) -> Result<Self, Self::Error> {
        let id = PersonId::new(record.id.unwrap_or_default())?;
        let birth_date = record.birth_date.as_deref().and_then(|raw| {
            let parsed = parse_wire_date(raw);
            if parsed.is_none() {
                log::warn!("Ignoring unparseable birth date {raw:?} of person {id}");
            }
            parsed
        });

        Ok(Person {
            id,
            name: record.name.unwrap_or_default(),
            birth_date,
            application: record
                .application
                .map(Application::from)
                .unwrap_or_default(),
            application_metadata: record.application_metadata.unwrap_or_default(),
        })
    }
}

/// Paginated people list envelope.
#[derive(Debug, Default, Deserialize)]
pub struct PeopleEnvelope {
    #[serde(alias = "items")]
    pub people: Option<Vec<PersonRecord>>,
    pub count: Option<usize>,
}

impl PeopleEnvelope {
    /// Normalizes the envelope, dropping records without a usable id.
    pub fn into_domain(self) -> (usize, Vec<Person>) {
        let people = self
            .people
            .unwrap_or_default()
            .into_iter()
            .filter_map(|record| match Person::try_from(record) {
                Ok(person) => Some(person),
                Err(err) => {
                    log::warn!("Skipping person record: {err}");
                    None
                }
            })
            .collect::<Vec<_>>();
        let count = self.count.unwrap_or(people.len());
        (count, people)
    }
}

/// Request body for person creation and replacement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPayload<'a> {
    pub name: &'a str,
    pub birth_date: String,
    pub application: &'a str,
    pub application_metadata: &'a ApplicationMetadata,
}

impl<'a> From<&'a NewPerson> for PersonPayload<'a> {
    fn from(person: &'a NewPerson) -> Self {
        Self {
            name: person.name.as_str(),
            birth_date: format_wire_date(person.birth_date),
            application: person.application.as_str(),
            application_metadata: &person.application_metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::domain::person::MetadataValue;
    use crate::domain::types::PersonName;

    #[test]
    fn missing_fields_are_defaulted() {
        let record: PersonRecord = serde_json::from_value(json!({
            "id": 3,
            "name": null,
            "birthDate": null
        }))
        .unwrap();
        let person = Person::try_from(record).unwrap();

        assert_eq!(person.name, "");
        assert_eq!(person.birth_date, None);
        assert_eq!(person.application, Application::None);
        assert!(person.application_metadata.is_empty());
    }

    #[test]
    fn record_without_id_is_rejected() {
        let record = PersonRecord::default();
        assert_eq!(
            Person::try_from(record),
            Err(TypeConstraintError::NonPositiveId)
        );
    }

    #[test]
    fn envelope_accepts_people_and_items_keys() {
        let people: PeopleEnvelope = serde_json::from_value(json!({
            "people": [{"id": 1, "name": "Alice", "birthDate": "1990-05-12T00:00:00.000Z",
                        "application": "slack",
                        "applicationMetadata": {"channelId": "C1", "userId": "U1"}}],
            "count": 120
        }))
        .unwrap();
        let (count, people) = people.into_domain();
        assert_eq!(count, 120);
        assert_eq!(people[0].birth_date, NaiveDate::from_ymd_opt(1990, 5, 12));
        assert_eq!(people[0].application, Application::Slack);

        let items: PeopleEnvelope = serde_json::from_value(json!({
            "items": [{"id": 2, "name": "Bob"}, {"id": null, "name": "Ghost"}]
        }))
        .unwrap();
        let (count, people) = items.into_domain();
        assert_eq!(count, 1);
        assert_eq!(people[0].name, "Bob");
    }

    #[test]
    fn payload_uses_backend_field_names() {
        let person = NewPerson::new(
            PersonName::new("Alice").unwrap(),
            NaiveDate::from_ymd_opt(1990, 5, 12).unwrap(),
            Application::Slack,
            [("channelId".to_string(), MetadataValue::from("C1"))].into(),
        );
        let body = serde_json::to_value(PersonPayload::from(&person)).unwrap();

        assert_eq!(
            body,
            json!({
                "name": "Alice",
                "birthDate": "1990-05-12",
                "application": "slack",
                "applicationMetadata": {"channelId": "C1"}
            })
        );
    }
}
