//! Picks up an API key passed in the URL.
//!
//! Links shared with operators may carry `?apiKey=...` (or `API_KEY`). The key
//! is stored and validated, then the browser is redirected to the same URL
//! without it so the key does not linger in history or logs.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{Error, web};

use crate::domain::auth::AuthState;
use crate::repository::KeyValidator;
use crate::routes::redirect;
use crate::services::auth::{API_KEY_QUERY_PARAMS, AuthManager};

fn query_pairs(query: &str) -> Vec<(String, String)> {
    serde_html_form::from_str(query).unwrap_or_else(|err| {
        log::debug!("Ignoring unparseable query string: {err}");
        Vec::new()
    })
}

/// First non-blank API key in `query`, honouring parameter priority.
pub fn extract_api_key(query: &str) -> Option<String> {
    let pairs = query_pairs(query);
    API_KEY_QUERY_PARAMS.iter().find_map(|name| {
        pairs
            .iter()
            .find(|(key, value)| key == name && !value.trim().is_empty())
            .map(|(_, value)| value.trim().to_string())
    })
}

/// `path` with the API key parameters removed from `query`.
pub fn strip_api_key(path: &str, query: &str) -> String {
    let remaining: Vec<(String, String)> = query_pairs(query)
        .into_iter()
        .filter(|(key, _)| !API_KEY_QUERY_PARAMS.contains(&key.as_str()))
        .collect();
    if remaining.is_empty() {
        return path.to_string();
    }
    match serde_html_form::to_string(&remaining) {
        Ok(query) => format!("{path}?{query}"),
        Err(err) => {
            log::warn!("Failed to re-encode query string: {err}");
            path.to_string()
        }
    }
}

/// Middleware validating a URL-supplied key with `V` and redirecting to the
/// cleaned URL. Requests without a key pass straight through.
pub async fn capture_api_key<V, B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    V: KeyValidator + 'static,
    B: MessageBody + 'static,
{
    let Some(api_key) = extract_api_key(req.query_string()) else {
        return next.call(req).await.map(ServiceResponse::map_into_left_body);
    };

    let auth = req.app_data::<web::Data<AuthManager>>().cloned();
    let validator = req.app_data::<web::Data<V>>().cloned();
    let (Some(auth), Some(validator)) = (auth, validator) else {
        log::error!("API key in URL ignored: auth manager or validator not configured");
        return next.call(req).await.map(ServiceResponse::map_into_left_body);
    };

    let session = auth.set_api_key(validator.get_ref(), &api_key).await;
    if session.state() == AuthState::Invalid {
        log::warn!("API key supplied in URL was rejected");
    }

    let location = strip_api_key(req.path(), req.query_string());
    Ok(req.into_response(redirect(&location)).map_into_right_body())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_param_takes_priority() {
        assert_eq!(
            extract_api_key("API_KEY=second&apiKey=first").as_deref(),
            Some("first")
        );
        assert_eq!(extract_api_key("API_KEY=only").as_deref(), Some("only"));
        assert_eq!(extract_api_key("apiKey=&page=2"), None);
        assert_eq!(extract_api_key(""), None);
    }

    #[test]
    fn stripping_keeps_other_params() {
        assert_eq!(
            strip_api_key("/people", "apiKey=ABC&page=2&q=jean+dupont"),
            "/people?page=2&q=jean+dupont"
        );
        assert_eq!(strip_api_key("/", "API_KEY=ABC"), "/");
        assert_eq!(
            strip_api_key("/communications", "apiKey=A&API_KEY=B&page=3"),
            "/communications?page=3"
        );
    }
}
