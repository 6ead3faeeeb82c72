use crate::error::AppError;
use serde::{Deserialize, Serialize};
use shortcut_core::Alias;
use url::Url;

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub url: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl CreateUrlRequest {
    /// Checks the target URL and parses the requested alias, if any.
    ///
    /// An empty `alias` counts as absent.
    pub fn validate(&self) -> Result<Option<Alias>, AppError> {
        validate_url(&self.url)?;

        match self.alias.as_deref() {
            None | Some("") => Ok(None),
            Some(alias) => Ok(Some(Alias::new(alias)?)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub status: &'static str,
    pub alias: String,
}

/// Validates that the URL parses, has an http(s) scheme and a host.
///
/// The raw string is what gets stored and sent back as `Location`, so control
/// characters are rejected before parsing (the parser strips tabs and newlines).
fn validate_url(raw: &str) -> Result<(), AppError> {
    if raw.is_empty() {
        return Err(AppError::BadRequest("url cannot be empty".to_string()));
    }

    if raw.chars().any(char::is_control) {
        return Err(AppError::BadRequest("url contains control characters".to_string()));
    }

    let parsed = Url::parse(raw)
        .map_err(|e| AppError::BadRequest(format!("invalid url {raw}: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::BadRequest(format!(
            "url scheme must be http or https: {}",
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AppError::BadRequest(format!("url has no host: {raw}")));
    }

    Ok(())
}
