use serde::Serialize;

use crate::domain::person::{Person, SLACK_CHANNEL_ID, SLACK_USER_ID};
use crate::domain::types::BadgeVariant;
use crate::pagination::Paginated;
use crate::repository::{PersonListQuery, SortField, SortOrder};

/// Parameters accepted by the people list page.
#[derive(Debug, Default, Clone)]
pub struct PeopleQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
}

impl PeopleQuery {
    pub(crate) fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub(crate) fn to_repository_query(&self, per_page: usize, page: usize) -> PersonListQuery {
        let mut query = PersonListQuery::new(page, per_page);
        if let Some(term) = self.search_term() {
            query = query.search(term);
        }
        if let Some(field) = self.sort {
            query = query.sort(field, self.order.unwrap_or_default());
        }
        query
    }
}

/// Data required to render the people page.
#[derive(Debug)]
pub struct PeoplePageData {
    pub people: Paginated<Person>,
    pub search: Option<String>,
    pub sort: Option<SortField>,
    pub order: SortOrder,
}

/// Person flattened for the people table and badges.
#[derive(Debug, Serialize)]
pub struct PersonRow {
    pub id: i64,
    pub name: String,
    pub birth_date: String,
    pub application: String,
    pub application_label: String,
    pub badge: BadgeVariant,
    pub channel_id: String,
    pub user_id: String,
}

impl From<Person> for PersonRow {
    fn from(person: Person) -> Self {
        Self {
            id: person.id.get(),
            birth_date: person.birth_date_display(),
            application: person.application.as_str().to_string(),
            application_label: person.application.label().to_string(),
            badge: person.application.badge(),
            channel_id: person.metadata_text(SLACK_CHANNEL_ID),
            user_id: person.metadata_text(SLACK_USER_ID),
            name: person.name,
        }
    }
}

/// Order a column header link should request next: toggles when the column
/// is already the active sort, ascending otherwise.
pub fn next_sort_order(
    active: Option<SortField>,
    order: SortOrder,
    column: SortField,
) -> SortOrder {
    if active == Some(column) {
        order.toggled()
    } else {
        SortOrder::Asc
    }
}

/// Query suffix (`&q=..&sort=..&order=..`) appended to list links so that
/// paging and sorting keep the other parameters.
pub fn list_params(search: Option<&str>, sort: Option<(SortField, SortOrder)>) -> String {
    let mut pairs = Vec::new();
    if let Some(term) = search {
        pairs.push(("q", term));
    }
    if let Some((field, order)) = sort {
        pairs.push(("sort", field.as_str()));
        pairs.push(("order", order.as_str()));
    }
    if pairs.is_empty() {
        return String::new();
    }
    match serde_html_form::to_string(&pairs) {
        Ok(encoded) => format!("&{encoded}"),
        Err(err) => {
            log::warn!("Failed to encode list parameters: {err}");
            String::new()
        }
    }
}
