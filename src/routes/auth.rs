use actix_web::{Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::domain::auth::AuthState;
use crate::forms::auth::ApiKeyForm;
use crate::repository::HttpRepository;
use crate::routes::redirect;
use crate::services::auth::AuthManager;

#[post("/auth/key")]
/// Stores and validates a key pasted in the header form.
pub async fn set_api_key(
    auth: web::Data<AuthManager>,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ApiKeyForm>,
) -> impl Responder {
    let session = auth.set_api_key(repo.get_ref(), &form.api_key).await;

    match session.state() {
        AuthState::Authenticated { is_admin: true } => {
            FlashMessage::success("Clé API validée (administrateur).").send();
        }
        AuthState::Authenticated { is_admin: false } => {
            FlashMessage::success("Clé API validée (lecture seule).").send();
        }
        AuthState::Invalid => {
            let detail = session.error.unwrap_or_default();
            FlashMessage::error(format!("Erreur d'authentification : {detail}")).send();
        }
        AuthState::Unauthenticated => {
            FlashMessage::info("Clé API supprimée.").send();
        }
        // Superseded by a concurrent change; the badge reflects the outcome.
        AuthState::Validating => {}
    }

    redirect(form.return_path())
}

#[post("/auth/clear")]
pub async fn clear_api_key(
    auth: web::Data<AuthManager>,
    web::Form(form): web::Form<ApiKeyForm>,
) -> impl Responder {
    auth.clear_api_key();
    FlashMessage::info("Clé API supprimée.").send();
    redirect(form.return_path())
}
