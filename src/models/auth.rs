use serde::{Deserialize, Serialize};

/// Body posted to the key validation endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateApiKeyRequest<'a> {
    pub api_key: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateApiKeyResponse {
    #[serde(default)]
    pub is_admin: Option<bool>,
}

impl ValidateApiKeyResponse {
    pub fn is_admin(&self) -> bool {
        self.is_admin.unwrap_or(false)
    }
}
