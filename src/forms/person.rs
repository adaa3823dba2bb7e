use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::person::{
    ApplicationMetadata, MetadataValue, NewPerson, Person, SLACK_CHANNEL_ID, SLACK_USER_ID,
};
use crate::domain::types::{Application, PersonName};
use crate::forms::FormError;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
/// Form data for creating or editing a person.
pub struct PersonForm {
    #[validate(custom(function = "validate_required_name"))]
    #[serde(default)]
    pub name: String,
    /// `YYYY-MM-DD`, as sent by a date input.
    #[validate(custom(function = "validate_birth_date"))]
    #[serde(default)]
    pub birth_date: String,
    #[validate(length(min = 1, message = "L'application est requise"))]
    #[serde(default)]
    pub application: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub user_id: String,
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    error
}

fn validate_required_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "Le nom est requis"));
    }
    Ok(())
}

fn validate_birth_date(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(invalid("required", "La date d'anniversaire est requise"))
    } else if NaiveDate::parse_from_str(value, DATE_FORMAT).is_err() {
        Err(invalid("date", "La date d'anniversaire est invalide"))
    } else {
        Ok(())
    }
}

impl PersonForm {
    pub fn application(&self) -> Application {
        Application::from(self.application.trim())
    }

    /// Field rules plus the Slack identifiers, reported together.
    pub fn check(&self) -> Result<(), FormError> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);
        if self.application() == Application::Slack {
            if self.channel_id.trim().is_empty() {
                errors.add(
                    "channel_id",
                    invalid("required", "L'ID du canal est requis pour Slack"),
                );
            }
            if self.user_id.trim().is_empty() {
                errors.add(
                    "user_id",
                    invalid("required", "L'ID de l'utilisateur est requis pour Slack"),
                );
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }

    fn metadata(&self) -> ApplicationMetadata {
        let mut metadata = ApplicationMetadata::new();
        if self.application() == Application::Slack {
            metadata.insert(
                SLACK_CHANNEL_ID.to_string(),
                MetadataValue::from(self.channel_id.trim()),
            );
            metadata.insert(
                SLACK_USER_ID.to_string(),
                MetadataValue::from(self.user_id.trim()),
            );
        }
        metadata
    }
}

impl From<&Person> for PersonForm {
    /// Pre-fills the edit form.
    fn from(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            birth_date: person
                .birth_date
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            application: person.application.as_str().to_string(),
            channel_id: person.metadata_text(SLACK_CHANNEL_ID),
            user_id: person.metadata_text(SLACK_USER_ID),
        }
    }
}

impl TryFrom<PersonForm> for NewPerson {
    type Error = FormError;

    fn try_from(form: PersonForm) -> Result<Self, Self::Error> {
        form.check()?;

        let name = ammonia::clean(form.name.trim());
        let name = PersonName::new(name).map_err(|_| FormError::InvalidName)?;
        let birth_date = NaiveDate::parse_from_str(form.birth_date.trim(), DATE_FORMAT)
            .map_err(|_| FormError::InvalidBirthDate)?;
        let metadata = form.metadata();

        Ok(NewPerson::new(name, birth_date, form.application(), metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PersonId;

    fn form(application: &str) -> PersonForm {
        PersonForm {
            name: "  Ada Lovelace ".to_string(),
            birth_date: "1815-12-10".to_string(),
            application: application.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_becomes_new_person() {
        let person = NewPerson::try_from(form("email")).unwrap();

        assert_eq!(person.name.as_str(), "Ada Lovelace");
        assert_eq!(person.birth_date, NaiveDate::from_ymd_opt(1815, 12, 10).unwrap());
        assert_eq!(person.application, Application::Email);
        assert!(person.application_metadata.is_empty());
    }

    #[test]
    fn slack_requires_channel_and_user() {
        let mut slack = form("slack");
        slack.channel_id = "C123".to_string();

        let err = NewPerson::try_from(slack.clone()).unwrap_err();
        assert!(matches!(err, FormError::Validation(_)));
        assert_eq!(
            err.messages(),
            vec!["L'ID de l'utilisateur est requis pour Slack"]
        );

        slack.user_id = " U456 ".to_string();
        let person = NewPerson::try_from(slack).unwrap();
        assert_eq!(
            person.application_metadata.get(SLACK_CHANNEL_ID),
            Some(&MetadataValue::from("C123"))
        );
        assert_eq!(
            person.application_metadata.get(SLACK_USER_ID),
            Some(&MetadataValue::from("U456"))
        );
    }

    #[test]
    fn no_application_is_a_valid_choice() {
        let person = NewPerson::try_from(form("none")).unwrap();
        assert_eq!(person.application, Application::None);
    }

    #[test]
    fn slack_ids_are_ignored_for_other_applications() {
        let mut discord = form("discord");
        discord.channel_id = "C123".to_string();

        let person = NewPerson::try_from(discord).unwrap();
        assert!(person.application_metadata.is_empty());
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let err = NewPerson::try_from(PersonForm::default()).unwrap_err();

        let messages = err.messages();
        assert!(messages.contains(&"Le nom est requis".to_string()));
        assert!(messages.contains(&"La date d'anniversaire est requise".to_string()));
        assert!(messages.contains(&"L'application est requise".to_string()));
    }

    #[test]
    fn malformed_birth_date_is_rejected() {
        let mut bad = form("email");
        bad.birth_date = "10/12/1815".to_string();

        let err = NewPerson::try_from(bad).unwrap_err();
        assert_eq!(err.messages(), vec!["La date d'anniversaire est invalide"]);
    }

    #[test]
    fn markup_only_name_is_rejected() {
        let mut bad = form("email");
        bad.name = "<script>alert(1)</script>".to_string();

        assert!(matches!(
            NewPerson::try_from(bad),
            Err(FormError::InvalidName)
        ));
    }

    #[test]
    fn edit_form_is_prefilled_from_person() {
        let person = Person {
            id: PersonId::new(7).unwrap(),
            name: "Grace".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1906, 12, 9),
            application: Application::Slack,
            application_metadata: [
                (SLACK_CHANNEL_ID.to_string(), MetadataValue::from("C1")),
                (SLACK_USER_ID.to_string(), MetadataValue::from("U1")),
            ]
            .into_iter()
            .collect(),
        };

        let form = PersonForm::from(&person);
        assert_eq!(form.birth_date, "1906-12-09");
        assert_eq!(form.application, "slack");
        assert_eq!(form.channel_id, "C1");
        assert_eq!(form.user_id, "U1");
    }
}
