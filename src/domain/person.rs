use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Application, PersonId, PersonName};

/// Metadata key holding the Slack channel a person is notified in.
pub const SLACK_CHANNEL_ID: &str = "channelId";
/// Metadata key holding the Slack user mentioned in the notification.
pub const SLACK_USER_ID: &str = "userId";

/// Scalar value stored in a person's application metadata.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Display for MetadataValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataValue::Bool(value) => write!(f, "{value}"),
            MetadataValue::Number(value) => write!(f, "{value}"),
            MetadataValue::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

pub type ApplicationMetadata = BTreeMap<String, MetadataValue>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// Absent until the backend guarantees a birth date for every record.
    pub birth_date: Option<NaiveDate>,
    pub application: Application,
    pub application_metadata: ApplicationMetadata,
}

impl Person {
    /// Metadata value rendered as text, empty when the key is missing.
    pub fn metadata_text(&self, key: &str) -> String {
        self.application_metadata
            .get(key)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Birth date formatted for display, `N/A` when unknown.
    pub fn birth_date_display(&self) -> String {
        self.birth_date
            .map(|date| date.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Payload used both to create a person and to replace an existing one.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPerson {
    pub name: PersonName,
    pub birth_date: NaiveDate,
    pub application: Application,
    pub application_metadata: ApplicationMetadata,
}

impl NewPerson {
    #[must_use]
    pub fn new(
        name: PersonName,
        birth_date: NaiveDate,
        application: Application,
        application_metadata: ApplicationMetadata,
    ) -> Self {
        Self {
            name,
            birth_date,
            application,
            application_metadata: application_metadata
                .into_iter()
                .filter(|(_, value)| {
                    !matches!(value, MetadataValue::Text(text) if text.trim().is_empty())
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(birth_date: Option<NaiveDate>) -> Person {
        Person {
            id: PersonId::new(1).unwrap(),
            name: "Alice".to_string(),
            birth_date,
            application: Application::Slack,
            application_metadata: BTreeMap::from([
                (SLACK_CHANNEL_ID.to_string(), MetadataValue::from("C42")),
                ("muted".to_string(), MetadataValue::Bool(false)),
            ]),
        }
    }

    #[test]
    fn birth_date_display_defaults_to_na() {
        assert_eq!(person(None).birth_date_display(), "N/A");
        assert_eq!(
            person(NaiveDate::from_ymd_opt(1990, 5, 12)).birth_date_display(),
            "12/05/1990"
        );
    }

    #[test]
    fn metadata_text_renders_scalars() {
        let person = person(None);
        assert_eq!(person.metadata_text(SLACK_CHANNEL_ID), "C42");
        assert_eq!(person.metadata_text("muted"), "false");
        assert_eq!(person.metadata_text(SLACK_USER_ID), "");
    }

    #[test]
    fn new_person_drops_blank_metadata() {
        let metadata = BTreeMap::from([
            (SLACK_CHANNEL_ID.to_string(), MetadataValue::from("C42")),
            (SLACK_USER_ID.to_string(), MetadataValue::from("  ")),
        ]);
        let new_person = NewPerson::new(
            PersonName::new("Bob").unwrap(),
            NaiveDate::from_ymd_opt(1985, 1, 2).unwrap(),
            Application::Slack,
            metadata,
        );
        assert_eq!(new_person.application_metadata.len(), 1);
        assert!(new_person.application_metadata.contains_key(SLACK_CHANNEL_ID));
    }
}
