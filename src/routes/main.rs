use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::birthday::today;
use crate::repository::HttpRepository;
use crate::routes::{base_context, current_url, insert_load_error, render_template};
use crate::services::auth::AuthManager;
use crate::services::birthdays as birthdays_service;

#[get("/")]
/// Upcoming birthdays grouped by how soon they come.
pub async fn show_index(
    req: HttpRequest,
    auth: web::Data<AuthManager>,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &auth.snapshot(), "index", &current_url(&req));

    match birthdays_service::load_upcoming(repo.get_ref(), today()).await {
        Ok(upcoming) => {
            context.insert("range", &upcoming.range);
            context.insert("no_birthdays", &upcoming.is_empty());
            context.insert("buckets", &upcoming.buckets);
        }
        Err(err) => insert_load_error(&mut context, &err),
    }

    render_template(&tera, "main/index.html", &context)
}
