use serde::Deserialize;

/// Header form used to paste an API key by hand.
#[derive(Debug, Deserialize)]
pub struct ApiKeyForm {
    #[serde(default)]
    pub api_key: String,
    /// Page to return to once the key is handled.
    #[serde(default)]
    pub next: Option<String>,
}

impl ApiKeyForm {
    /// Local path to redirect to; anything else falls back to `/`.
    pub fn return_path(&self) -> &str {
        safe_return_path(self.next.as_deref())
    }
}

/// Keeps redirects on this site: only absolute local paths are accepted.
pub fn safe_return_path(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_path_rejects_foreign_targets() {
        assert_eq!(safe_return_path(Some("/people?page=2")), "/people?page=2");
        assert_eq!(safe_return_path(Some("//evil.example")), "/");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/");
        assert_eq!(safe_return_path(None), "/");
    }
}
