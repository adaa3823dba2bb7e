use std::sync::Arc;

use actix_web::middleware::from_fn;
use actix_web::{
    App, HttpResponse,
    http::{StatusCode, header},
    test, web,
};

use birthy::domain::auth::{AuthState, PersistedAuth};
use birthy::middleware::capture_api_key;
use birthy::repository::errors::{RepositoryError, RepositoryResult};
use birthy::repository::{FileKeyStore, KeyStore, KeyValidator};
use birthy::services::auth::AuthManager;

/// Accepts `ABC` as an admin key and rejects everything else.
struct FakeValidator;

impl KeyValidator for FakeValidator {
    async fn validate_api_key(&self, api_key: &str) -> RepositoryResult<bool> {
        match api_key {
            "ABC" => Ok(true),
            _ => Err(RepositoryError::ValidationError("unknown key".to_string())),
        }
    }
}

macro_rules! init_app {
    ($auth:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from($auth.clone()))
                .app_data(web::Data::new(FakeValidator))
                .wrap(from_fn(capture_api_key::<FakeValidator, _>))
                .default_service(web::to(|| async { HttpResponse::Ok().finish() })),
        )
        .await
    };
}

#[actix_web::test]
async fn url_key_is_stored_and_stripped() {
    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("auth.json");
    let auth = Arc::new(AuthManager::new(FileKeyStore::new(&state_file)));
    let app = init_app!(auth);

    let req = test::TestRequest::get()
        .uri("/people?apiKey=ABC&page=2")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/people?page=2"
    );
    assert_eq!(auth.api_key().as_deref(), Some("ABC"));
    assert!(auth.is_admin());
    assert_eq!(
        FileKeyStore::new(&state_file).load().unwrap(),
        Some(PersistedAuth {
            api_key: "ABC".to_string(),
            is_admin: true,
        })
    );
}

#[actix_web::test]
async fn rejected_url_key_still_redirects() {
    let dir = tempfile::tempdir().unwrap();
    let auth = Arc::new(AuthManager::new(FileKeyStore::new(
        dir.path().join("auth.json"),
    )));
    let app = init_app!(auth);

    let req = test::TestRequest::get().uri("/?API_KEY=WRONG").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    assert_eq!(auth.snapshot().state(), AuthState::Invalid);
    assert!(!auth.is_admin());
}

#[actix_web::test]
async fn requests_without_key_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    let auth = Arc::new(AuthManager::new(FileKeyStore::new(
        dir.path().join("auth.json"),
    )));
    let app = init_app!(auth);

    let req = test::TestRequest::get().uri("/people?page=3").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(auth.snapshot().state(), AuthState::Unauthenticated);
}
