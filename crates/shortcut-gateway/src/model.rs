mod url;

pub use url::{CreateUrlRequest, CreateUrlResponse};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Generic response body: `{"status": "OK"}` or `{"status": "Error", "error": "..."}`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResponse {
    pub const OK: &'static str = "OK";
    pub const ERROR: &'static str = "Error";

    pub fn ok() -> Self {
        Self {
            status: Self::OK,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Self::ERROR,
            error: Some(message.into()),
        }
    }
}
