//! Access to the Birthy backend and to operator-local state.
//!
//! Reader/writer traits are the seams services are written against;
//! [`HttpRepository`] implements them over the backend REST API.
#![allow(async_fn_in_trait)]

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::auth::PersistedAuth;
use crate::domain::birthday::BirthdayPerson;
use crate::domain::communication::Communication;
use crate::domain::person::{NewPerson, Person};
use crate::domain::types::PersonId;
use crate::repository::errors::RepositoryResult;

pub mod auth;
pub mod birthday;
pub mod communication;
pub mod errors;
pub mod http;
pub mod key_store;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod person;

pub use http::HttpRepository;
pub use key_store::{FileKeyStore, MemoryKeyStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "birthDate")]
    BirthDate,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::BirthDate => "birthDate",
        }
    }

    /// Lenient parse of a `sort` query parameter; unknown values mean unsorted.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "name" => Some(SortField::Name),
            "birthDate" | "birth_date" => Some(SortField::BirthDate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonListQuery {
    pub search: Option<String>,
    pub sort: Option<(SortField, SortOrder)>,
    pub pagination: Pagination,
}

impl PersonListQuery {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            search: None,
            sort: None,
            pagination: Pagination { page, per_page },
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort = Some((field, order));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination { page, per_page };
        self
    }
}

pub trait PersonReader {
    async fn list_people(&self, query: PersonListQuery) -> RepositoryResult<(usize, Vec<Person>)>;
    async fn get_person(&self, id: PersonId) -> RepositoryResult<Option<Person>>;
}

pub trait PersonWriter {
    async fn create_person(&self, person: &NewPerson) -> RepositoryResult<Person>;
    async fn update_person(&self, id: PersonId, person: &NewPerson) -> RepositoryResult<Person>;
    async fn delete_person(&self, id: PersonId) -> RepositoryResult<()>;
}

pub trait CommunicationReader {
    async fn list_communications(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<Communication>)>;
}

pub trait BirthdayReader {
    /// People whose birthday is coming up relative to `date`.
    async fn next_birthdays(&self, date: NaiveDate) -> RepositoryResult<Vec<BirthdayPerson>>;
}

pub trait KeyValidator {
    /// Resolves the admin flag of `api_key`, or
    /// [`errors::RepositoryError::ValidationError`] when the key is rejected.
    async fn validate_api_key(&self, api_key: &str) -> RepositoryResult<bool>;
}

/// Operator-local storage for the API key and its cached admin flag.
pub trait KeyStore: Send + Sync {
    fn load(&self) -> RepositoryResult<Option<PersistedAuth>>;
    fn save(&self, auth: &PersistedAuth) -> RepositoryResult<()>;
    fn clear(&self) -> RepositoryResult<()>;
}

/// Source of the key attached to outbound backend requests.
pub trait ApiKeyProvider: Send + Sync {
    fn current_api_key(&self) -> Option<String>;
}
