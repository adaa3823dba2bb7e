use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::dto::communications::CommunicationRow;
use crate::repository::HttpRepository;
use crate::routes::{base_context, current_url, insert_load_error, render_template};
use crate::services::auth::AuthManager;
use crate::services::communications as communications_service;

#[derive(Deserialize)]
struct CommunicationsQueryParams {
    page: Option<usize>,
}

#[get("/communications")]
/// Read-only log of the notifications sent by the backend.
pub async fn show_communications(
    req: HttpRequest,
    params: web::Query<CommunicationsQueryParams>,
    auth: web::Data<AuthManager>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &auth.snapshot(),
        "communications",
        &current_url(&req),
    );

    match communications_service::load_communications(repo.get_ref(), params.page).await {
        Ok(page) => {
            let page = page.map(CommunicationRow::from);
            context.insert("communications", &page);
        }
        Err(err) => insert_load_error(&mut context, &err),
    }

    render_template(&tera, "communications/index.html", &context)
}
