//! Form definitions backing the web routes.

use std::collections::HashMap;

use thiserror::Error;
use validator::ValidationErrors;

pub mod auth;
pub mod person;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid birth date")]
    InvalidBirthDate,
}

impl FormError {
    /// Messages shown to the operator, one per failed rule.
    pub fn messages(&self) -> Vec<String> {
        match self {
            FormError::Validation(errors) => {
                let mut messages: Vec<String> = errors
                    .field_errors()
                    .values()
                    .flat_map(|errors| errors.iter())
                    .map(|error| match &error.message {
                        Some(message) => message.to_string(),
                        None => format!("Champ invalide ({})", error.code),
                    })
                    .collect();
                messages.sort();
                messages.dedup();
                messages
            }
            FormError::InvalidName => vec!["Le nom est requis".to_string()],
            FormError::InvalidBirthDate => {
                vec!["La date d'anniversaire est invalide".to_string()]
            }
        }
    }

    /// First message per form field, for inline display next to inputs.
    pub fn field_messages(&self) -> HashMap<String, String> {
        match self {
            FormError::Validation(errors) => errors
                .field_errors()
                .into_iter()
                .filter_map(|(field, errors)| {
                    let message = errors.first()?.message.as_ref()?.to_string();
                    Some((field.to_string(), message))
                })
                .collect(),
            FormError::InvalidName => {
                HashMap::from([("name".to_string(), self.messages().remove(0))])
            }
            FormError::InvalidBirthDate => {
                HashMap::from([("birth_date".to_string(), self.messages().remove(0))])
            }
        }
    }
}
