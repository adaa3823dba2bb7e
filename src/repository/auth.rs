use reqwest::Method;

use crate::models::auth::{ValidateApiKeyRequest, ValidateApiKeyResponse};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{HttpRepository, KeyValidator};

impl KeyValidator for HttpRepository {
    async fn validate_api_key(&self, api_key: &str) -> RepositoryResult<bool> {
        let builder = self
            .request_with_key(Method::POST, "auth/validate", api_key)
            .json(&ValidateApiKeyRequest { api_key });

        match self.send_json::<ValidateApiKeyResponse>(builder).await {
            Ok(response) => Ok(response.is_admin()),
            Err(RepositoryError::NotFound) => Err(RepositoryError::ValidationError(
                "Validation endpoint not found".to_string(),
            )),
            Err(err) => Err(err),
        }
    }
}
