//! HTTP client for the Birthy backend.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::repository::ApiKeyProvider;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Header carrying the API key on every backend request.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Backend repository speaking JSON over HTTP.
///
/// Cloning is cheap: the underlying connection pool and key provider are shared.
#[derive(Clone)]
pub struct HttpRepository {
    client: reqwest::Client,
    base_url: String,
    api_key: Arc<dyn ApiKeyProvider>,
}

impl HttpRepository {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        api_key: Arc<dyn ApiKeyProvider>,
    ) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request builder with the current API key attached when one is known.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.api_key.current_api_key() {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    /// Request builder carrying an explicit key instead of the current one.
    pub(crate) fn request_with_key(&self, method: Method, path: &str, key: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(API_KEY_HEADER, key)
    }

    /// Sends the request and maps error statuses onto [`RepositoryError`].
    pub(crate) async fn send(&self, builder: RequestBuilder) -> RepositoryResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("Backend answered {status}"));

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(RepositoryError::ValidationError(message))
        } else {
            Err(RepositoryError::ConnectionError(message))
        }
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> RepositoryResult<T> {
        let response = self.send(builder).await?;
        Ok(response.json::<T>().await?)
    }
}
