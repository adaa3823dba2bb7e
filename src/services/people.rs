use crate::domain::auth::AuthSession;
use crate::domain::person::{NewPerson, Person};
use crate::domain::types::PersonId;
use crate::dto::people::{PeoplePageData, PeopleQuery};
use crate::pagination::{Paginated, clamp_page, total_pages};
use crate::repository::{PersonReader, PersonWriter};
use crate::services::{ServiceError, ServiceResult};

pub const PEOPLE_PER_PAGE: usize = 50;

/// Loads one page of people, re-fetching the last page when the requested
/// one lies beyond it.
pub async fn load_people_page<R>(repo: &R, params: PeopleQuery) -> ServiceResult<PeoplePageData>
where
    R: PersonReader + ?Sized,
{
    let requested = params.page.unwrap_or(1).max(1);

    let (mut total, mut people) = repo
        .list_people(params.to_repository_query(PEOPLE_PER_PAGE, requested))
        .await
        .map_err(|err| {
            log::error!("Failed to list people: {err}");
            err
        })?;

    let last_page = total_pages(total, PEOPLE_PER_PAGE);
    let page = clamp_page(requested, last_page);
    if page != requested {
        (total, people) = repo
            .list_people(params.to_repository_query(PEOPLE_PER_PAGE, page))
            .await
            .map_err(|err| {
                log::error!("Failed to list people: {err}");
                err
            })?;
    }

    Ok(PeoplePageData {
        people: Paginated::new(people, page, PEOPLE_PER_PAGE, total),
        search: params.search_term(),
        sort: params.sort,
        order: params.order.unwrap_or_default(),
    })
}

/// Fetches a person for the edit form.
pub async fn load_person<R>(
    repo: &R,
    session: &AuthSession,
    person_id: PersonId,
) -> ServiceResult<Person>
where
    R: PersonReader + ?Sized,
{
    if !session.is_admin {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_person(person_id)
        .await
        .map_err(|err| {
            log::error!("Failed to load person {person_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

pub async fn create_person<R>(
    repo: &R,
    session: &AuthSession,
    person: &NewPerson,
) -> ServiceResult<Person>
where
    R: PersonWriter + ?Sized,
{
    if !session.is_admin {
        return Err(ServiceError::Unauthorized);
    }

    let created = repo.create_person(person).await.map_err(|err| {
        log::error!("Failed to create person: {err}");
        err
    })?;
    log::info!("Created person {}", created.id);
    Ok(created)
}

pub async fn update_person<R>(
    repo: &R,
    session: &AuthSession,
    person_id: PersonId,
    person: &NewPerson,
) -> ServiceResult<Person>
where
    R: PersonWriter + ?Sized,
{
    if !session.is_admin {
        return Err(ServiceError::Unauthorized);
    }

    repo.update_person(person_id, person).await.map_err(|err| {
        log::error!("Failed to update person {person_id}: {err}");
        ServiceError::from(err)
    })
}

pub async fn delete_person<R>(
    repo: &R,
    session: &AuthSession,
    person_id: PersonId,
) -> ServiceResult<()>
where
    R: PersonWriter + ?Sized,
{
    if !session.is_admin {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_person(person_id).await.map_err(|err| {
        log::error!("Failed to delete person {person_id}: {err}");
        err
    })?;
    log::info!("Deleted person {person_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::{Application, PersonName};
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::repository::{PersonListQuery, SortField, SortOrder};

    #[derive(Default)]
    struct FakeRepo {
        total: usize,
        queries: RefCell<Vec<PersonListQuery>>,
        deleted: RefCell<Vec<PersonId>>,
        offline: bool,
    }

    fn person(id: i64) -> Person {
        Person {
            id: PersonId::new(id).unwrap(),
            name: format!("Person {id}"),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
            application: Application::Email,
            application_metadata: Default::default(),
        }
    }

    impl PersonReader for FakeRepo {
        async fn list_people(
            &self,
            query: PersonListQuery,
        ) -> RepositoryResult<(usize, Vec<Person>)> {
            if self.offline {
                return Err(RepositoryError::ConnectionError("refused".to_string()));
            }
            let page = query.pagination.page;
            let per_page = query.pagination.per_page;
            self.queries.borrow_mut().push(query);
            let start = (page - 1) * per_page;
            let people = (start..self.total.min(start + per_page))
                .map(|i| person(i as i64 + 1))
                .collect();
            Ok((self.total, people))
        }

        async fn get_person(&self, id: PersonId) -> RepositoryResult<Option<Person>> {
            Ok((id.get() <= self.total as i64).then(|| person(id.get())))
        }
    }

    impl PersonWriter for FakeRepo {
        async fn create_person(&self, new: &NewPerson) -> RepositoryResult<Person> {
            Ok(Person {
                id: PersonId::new(self.total as i64 + 1).unwrap(),
                name: new.name.to_string(),
                birth_date: Some(new.birth_date),
                application: new.application.clone(),
                application_metadata: new.application_metadata.clone(),
            })
        }

        async fn update_person(&self, id: PersonId, new: &NewPerson) -> RepositoryResult<Person> {
            let mut person = person(id.get());
            person.name = new.name.to_string();
            Ok(person)
        }

        async fn delete_person(&self, id: PersonId) -> RepositoryResult<()> {
            self.deleted.borrow_mut().push(id);
            Ok(())
        }
    }

    fn admin() -> AuthSession {
        let mut session = AuthSession::default();
        session.accept("KEY".to_string(), true);
        session
    }

    fn new_person() -> NewPerson {
        NewPerson::new(
            PersonName::new("Ada").unwrap(),
            NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            Application::Email,
            Default::default(),
        )
    }

    #[actix_web::test]
    async fn second_page_of_120_people() {
        let repo = FakeRepo {
            total: 120,
            ..Default::default()
        };

        let data = load_people_page(
            &repo,
            PeopleQuery {
                page: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(data.people.total_pages, 3);
        assert_eq!(data.people.pages, vec![1, 2, 3]);
        assert!(data.people.has_previous);
        assert!(data.people.has_next);
        assert_eq!(data.people.items.len(), 50);
    }

    #[actix_web::test]
    async fn page_beyond_last_refetches_last_page() {
        let repo = FakeRepo {
            total: 60,
            ..Default::default()
        };

        let data = load_people_page(
            &repo,
            PeopleQuery {
                page: Some(9),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(data.people.page, 2);
        assert_eq!(data.people.items.len(), 10);
        let queries = repo.queries.borrow();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].pagination.page, 2);
    }

    #[actix_web::test]
    async fn search_and_sort_are_forwarded() {
        let repo = FakeRepo::default();

        let data = load_people_page(
            &repo,
            PeopleQuery {
                search: Some("  ada ".to_string()),
                page: None,
                sort: Some(SortField::BirthDate),
                order: Some(SortOrder::Desc),
            },
        )
        .await
        .unwrap();

        assert_eq!(data.search.as_deref(), Some("ada"));
        let queries = repo.queries.borrow();
        assert_eq!(queries[0].search.as_deref(), Some("ada"));
        assert_eq!(
            queries[0].sort,
            Some((SortField::BirthDate, SortOrder::Desc))
        );
        assert_eq!(queries[0].pagination.page, 1);
    }

    #[actix_web::test]
    async fn backend_failure_is_a_connection_error() {
        let repo = FakeRepo {
            offline: true,
            ..Default::default()
        };

        let result = load_people_page(&repo, PeopleQuery::default()).await;
        assert!(matches!(result, Err(ServiceError::Connection(_))));
    }

    #[actix_web::test]
    async fn writes_require_admin() {
        let repo = FakeRepo::default();
        let viewer = AuthSession::default();
        let id = PersonId::new(1).unwrap();

        assert!(matches!(
            create_person(&repo, &viewer, &new_person()).await,
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            update_person(&repo, &viewer, id, &new_person()).await,
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            delete_person(&repo, &viewer, id).await,
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            load_person(&repo, &viewer, id).await,
            Err(ServiceError::Unauthorized)
        ));
        assert!(repo.deleted.borrow().is_empty());
    }

    #[actix_web::test]
    async fn admin_can_create_and_delete() {
        let repo = FakeRepo {
            total: 3,
            ..Default::default()
        };
        let session = admin();

        let created = create_person(&repo, &session, &new_person()).await.unwrap();
        assert_eq!(created.name, "Ada");
        assert_eq!(created.id.get(), 4);

        delete_person(&repo, &session, PersonId::new(2).unwrap())
            .await
            .unwrap();
        assert_eq!(repo.deleted.borrow().as_slice(), &[PersonId::new(2).unwrap()]);
    }

    #[actix_web::test]
    async fn missing_person_is_not_found() {
        let repo = FakeRepo {
            total: 1,
            ..Default::default()
        };

        let result = load_person(&repo, &admin(), PersonId::new(5).unwrap()).await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
