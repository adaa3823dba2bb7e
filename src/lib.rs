//! Birthy: administrative front-end for the birthday notification backend.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_cors::Cors;
    use actix_files::Files;
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::middleware::capture_api_key;
    use crate::models::config::ServerConfig;
    use crate::repository::{FileKeyStore, HttpRepository};
    use crate::routes::api::api_v1_birthdays;
    use crate::routes::auth::{clear_api_key, set_api_key};
    use crate::routes::communications::show_communications;
    use crate::routes::main::show_index;
    use crate::routes::people::{
        create_person, delete_person, show_create_person, show_edit_person, show_people,
        update_person,
    };
    use crate::services::auth::AuthManager;

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Process-wide API key session, restored from the state file.
        let auth = Arc::new(AuthManager::new(FileKeyStore::new(&server_config.state_file)));

        let repo = HttpRepository::new(
            &server_config.backend_url,
            Duration::from_secs(server_config.request_timeout_secs),
            auth.clone(),
        )
        .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;

        if let Some(api_key) = auth.restore() {
            log::info!("Revalidating persisted API key");
            let auth = auth.clone();
            let repo = repo.clone();
            actix_web::rt::spawn(async move {
                auth.validate(&repo, api_key).await;
            });
        }

        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

        let message_store = CookieMessageStore::builder(secret_key).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Serving on {}:{} against backend {}",
            server_config.address,
            server_config.port,
            repo.base_url()
        );

        let auth = web::Data::from(auth);

        HttpServer::new(move || {
            App::new()
                .wrap(middleware::from_fn(capture_api_key::<HttpRepository, _>))
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(web::scope("/api").service(api_v1_birthdays))
                .service(show_index)
                .service(show_people)
                .service(show_create_person)
                .service(create_person)
                .service(show_edit_person)
                .service(update_person)
                .service(delete_person)
                .service(show_communications)
                .service(set_api_key)
                .service(clear_api_key)
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(auth.clone())
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
