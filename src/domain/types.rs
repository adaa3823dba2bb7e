//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! non-empty names) so that once a value reaches the domain layer it can be
//! treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i64` backing this identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(PersonId, "Backend-assigned identifier of a person.");
id_newtype!(CommunicationId, "Backend-assigned identifier of a sent communication.");

/// Trimmed, non-empty display name of a person.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    pub fn new<S: Into<String>>(name: S) -> Result<Self, TypeConstraintError> {
        let trimmed = name.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for PersonName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for PersonName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PersonName {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PersonName {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

/// Messaging application a person is notified through.
///
/// Matching is case-insensitive; unknown values are kept verbatim in
/// [`Application::Other`] so they survive a round trip to the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Application {
    Slack,
    Discord,
    Teams,
    Email,
    #[default]
    None,
    Other(String),
}

/// Visual weight of an application badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Outline,
}

impl Application {
    /// Wire value sent to the backend.
    pub fn as_str(&self) -> &str {
        match self {
            Application::Slack => "slack",
            Application::Discord => "discord",
            Application::Teams => "teams",
            Application::Email => "email",
            Application::None => "none",
            Application::Other(value) => value.as_str(),
        }
    }

    /// Human readable label shown in badges.
    pub fn label(&self) -> &str {
        match self {
            Application::Slack => "Slack",
            Application::Discord => "Discord",
            Application::Teams => "Teams",
            Application::Email => "Email",
            Application::None => "Aucune application",
            Application::Other(value) => value.as_str(),
        }
    }

    pub fn badge(&self) -> BadgeVariant {
        match self {
            Application::Slack | Application::Teams => BadgeVariant::Secondary,
            Application::Discord => BadgeVariant::Default,
            Application::Email | Application::None | Application::Other(_) => {
                BadgeVariant::Outline
            }
        }
    }

    /// Applications offered by the person form.
    pub fn selectable() -> [Application; 5] {
        [
            Application::Slack,
            Application::Discord,
            Application::Teams,
            Application::Email,
            Application::None,
        ]
    }
}

impl From<&str> for Application {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_lowercase().as_str() {
            "slack" => Application::Slack,
            "discord" => Application::Discord,
            "teams" => Application::Teams,
            "email" => Application::Email,
            "none" | "" => Application::None,
            _ => Application::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for Application {
    fn from(value: String) -> Self {
        Application::from(value.as_str())
    }
}

impl Display for Application {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Application {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Application {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(Application::from).unwrap_or_default())
    }
}
