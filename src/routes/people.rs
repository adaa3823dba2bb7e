//! People list and the admin-only person create/edit/delete routes.

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::domain::person::NewPerson;
use crate::domain::types::PersonId;
use crate::dto::people::{PeopleQuery, PersonRow, list_params, next_sort_order};
use crate::forms::person::PersonForm;
use crate::repository::{HttpRepository, SortField, SortOrder};
use crate::routes::{
    application_options, base_context, current_url, ensure_admin, insert_load_error, redirect,
    render_template,
};
use crate::services::auth::AuthManager;
use crate::services::{ServiceError, people as people_service};

const PEOPLE_URL: &str = "/people";

#[derive(Deserialize)]
struct PeopleQueryParams {
    q: Option<String>,
    page: Option<usize>,
    sort: Option<String>,
    order: Option<String>,
}

impl From<PeopleQueryParams> for PeopleQuery {
    fn from(params: PeopleQueryParams) -> Self {
        Self {
            search: params.q,
            page: params.page,
            sort: params.sort.as_deref().and_then(SortField::from_param),
            order: params.order.as_deref().and_then(SortOrder::from_param),
        }
    }
}

#[get("/people")]
/// Searchable, sortable and paginated list of people.
pub async fn show_people(
    req: HttpRequest,
    params: web::Query<PeopleQueryParams>,
    auth: web::Data<AuthManager>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = PeopleQuery::from(params.into_inner());
    let mut context = base_context(&flash_messages, &auth.snapshot(), "people", &current_url(&req));
    context.insert("search_query", query.search.as_deref().unwrap_or("").trim());

    match people_service::load_people_page(repo.get_ref(), query).await {
        Ok(data) => {
            context.insert(
                "name_order",
                next_sort_order(data.sort, data.order, SortField::Name).as_str(),
            );
            context.insert(
                "birth_date_order",
                next_sort_order(data.sort, data.order, SortField::BirthDate).as_str(),
            );
            let active_sort = data.sort.map(|field| (field, data.order));
            context.insert("sort", &data.sort.map(SortField::as_str));
            context.insert("order", data.order.as_str());
            context.insert("search_params", &list_params(data.search.as_deref(), None));
            context.insert(
                "page_params",
                &list_params(data.search.as_deref(), active_sort),
            );
            context.insert("people", &data.people.map(PersonRow::from));
        }
        Err(err) => insert_load_error(&mut context, &err),
    }

    render_template(&tera, "people/index.html", &context)
}

fn form_context(
    flash_messages: &IncomingFlashMessages,
    auth: &AuthManager,
    req: &HttpRequest,
    form: &PersonForm,
    person_id: Option<PersonId>,
) -> Context {
    let mut context = base_context(flash_messages, &auth.snapshot(), "people", &current_url(req));
    context.insert("form", form);
    context.insert("person_id", &person_id.map(PersonId::get));
    context.insert("applications", &application_options());
    context.insert("errors", &HashMap::<String, String>::new());
    context
}

fn parse_person_id(raw: i64) -> Result<PersonId, HttpResponse> {
    PersonId::new(raw).map_err(|_| {
        FlashMessage::error("Personne introuvable.").send();
        redirect(PEOPLE_URL)
    })
}

#[get("/person/create")]
pub async fn show_create_person(
    req: HttpRequest,
    auth: web::Data<AuthManager>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_admin(&auth.snapshot(), PEOPLE_URL) {
        return response;
    }

    let context = form_context(&flash_messages, &auth, &req, &PersonForm::default(), None);
    render_template(&tera, "person/form.html", &context)
}

#[post("/person/create")]
pub async fn create_person(
    req: HttpRequest,
    auth: web::Data<AuthManager>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<PersonForm>,
) -> impl Responder {
    let session = auth.snapshot();
    if let Err(response) = ensure_admin(&session, PEOPLE_URL) {
        return response;
    }

    let mut context = form_context(&flash_messages, &auth, &req, &form, None);
    let new_person = match NewPerson::try_from(form) {
        Ok(new_person) => new_person,
        Err(err) => {
            log::warn!("Rejected person form: {err}");
            context.insert("errors", &err.field_messages());
            return render_template(&tera, "person/form.html", &context);
        }
    };

    match people_service::create_person(repo.get_ref(), &session, &new_person).await {
        Ok(person) => {
            FlashMessage::success(format!("{} a été ajouté(e).", person.name)).send();
            redirect(PEOPLE_URL)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Accès réservé aux administrateurs.").send();
            redirect(PEOPLE_URL)
        }
        Err(_) => {
            context.insert("submit_error", "Erreur lors de la création de la personne");
            render_template(&tera, "person/form.html", &context)
        }
    }
}

#[get("/person/{person_id}/edit")]
pub async fn show_edit_person(
    req: HttpRequest,
    person_id: web::Path<i64>,
    auth: web::Data<AuthManager>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let session = auth.snapshot();
    if let Err(response) = ensure_admin(&session, PEOPLE_URL) {
        return response;
    }
    let person_id = match parse_person_id(person_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match people_service::load_person(repo.get_ref(), &session, person_id).await {
        Ok(person) => {
            let form = PersonForm::from(&person);
            let context = form_context(&flash_messages, &auth, &req, &form, Some(person_id));
            render_template(&tera, "person/form.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Personne introuvable.").send();
            redirect(PEOPLE_URL)
        }
        Err(err) => {
            let mut context =
                form_context(&flash_messages, &auth, &req, &PersonForm::default(), Some(person_id));
            insert_load_error(&mut context, &err);
            render_template(&tera, "person/form.html", &context)
        }
    }
}

#[post("/person/{person_id}/edit")]
pub async fn update_person(
    req: HttpRequest,
    person_id: web::Path<i64>,
    auth: web::Data<AuthManager>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<PersonForm>,
) -> impl Responder {
    let session = auth.snapshot();
    if let Err(response) = ensure_admin(&session, PEOPLE_URL) {
        return response;
    }
    let person_id = match parse_person_id(person_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let mut context = form_context(&flash_messages, &auth, &req, &form, Some(person_id));
    let new_person = match NewPerson::try_from(form) {
        Ok(new_person) => new_person,
        Err(err) => {
            log::warn!("Rejected person form: {err}");
            context.insert("errors", &err.field_messages());
            return render_template(&tera, "person/form.html", &context);
        }
    };

    match people_service::update_person(repo.get_ref(), &session, person_id, &new_person).await {
        Ok(person) => {
            FlashMessage::success(format!("{} a été mis(e) à jour.", person.name)).send();
            redirect(PEOPLE_URL)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Personne introuvable.").send();
            redirect(PEOPLE_URL)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Accès réservé aux administrateurs.").send();
            redirect(PEOPLE_URL)
        }
        Err(_) => {
            context.insert("submit_error", "Erreur lors de la mise à jour de la personne");
            render_template(&tera, "person/form.html", &context)
        }
    }
}

#[post("/person/{person_id}/delete")]
pub async fn delete_person(
    person_id: web::Path<i64>,
    auth: web::Data<AuthManager>,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    let session = auth.snapshot();
    if let Err(response) = ensure_admin(&session, PEOPLE_URL) {
        return response;
    }
    let person_id = match parse_person_id(person_id.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match people_service::delete_person(repo.get_ref(), &session, person_id).await {
        Ok(()) => FlashMessage::success("Personne supprimée.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Personne introuvable.").send(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Accès réservé aux administrateurs.").send()
        }
        Err(_) => FlashMessage::error("Erreur lors de la suppression de la personne.").send(),
    }

    redirect(PEOPLE_URL)
}
