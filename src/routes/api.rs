use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::domain::birthday::today;
use crate::dto::api::BirthdaysQuery;
use crate::repository::HttpRepository;
use crate::services::{ServiceError, api as api_service};

#[get("/v1/birthdays")]
/// Upcoming birthdays as JSON, relative to `?date=` or to the local day.
pub async fn api_v1_birthdays(
    params: web::Query<BirthdaysQuery>,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    match api_service::upcoming_birthdays(repo.get_ref(), params.into_inner(), today()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(ServiceError::Connection(message)) => {
            HttpResponse::BadGateway().json(json!({ "error": message }))
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to list upcoming birthdays: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
