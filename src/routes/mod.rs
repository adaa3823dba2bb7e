//! HTTP route handlers and the helpers they share.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::auth::AuthSession;
use crate::domain::types::Application;
use crate::services::ServiceError;

pub mod api;
pub mod auth;
pub mod communications;
pub mod main;
pub mod people;

/// Maps a flash message level to the CSS class used by the alert partial.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Path and query of the request, used for retry links and post-action returns.
pub fn current_url(req: &HttpRequest) -> String {
    req.uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.path().to_string())
}

/// Context shared by every page: alerts, the auth badge and navigation state.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    session: &AuthSession,
    current_page: &str,
    current_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("auth", session);
    context.insert("auth_state", &session.state());
    context.insert("is_admin", &session.is_admin);
    context.insert("current_page", current_page);
    context.insert("current_url", current_url);
    context
}

/// Lets only admins through; everyone else is sent to `fallback` with a notice.
pub fn ensure_admin(session: &AuthSession, fallback: &str) -> Result<(), HttpResponse> {
    if session.is_admin {
        return Ok(());
    }
    FlashMessage::error("Accès réservé aux administrateurs.").send();
    Err(redirect(fallback))
}

/// Fills the inline error block shown in place of page content when the
/// backend could not serve the page.
pub fn insert_load_error(context: &mut Context, err: &ServiceError) {
    let detail = match err {
        ServiceError::Connection(_) => "Impossible de joindre le serveur de notifications.",
        ServiceError::Unauthorized => "Le serveur a refusé la requête : vérifiez la clé API.",
        _ => "Une erreur inattendue est survenue.",
    };
    context.insert("connection_error", detail);
}

/// `(value, label)` pairs for the application select.
pub fn application_options() -> Vec<(String, String)> {
    Application::selectable()
        .iter()
        .map(|app| (app.as_str().to_string(), app.label().to_string()))
        .collect()
}
