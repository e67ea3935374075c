use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Client-facing failures of the API handlers.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("{message}")]
    Upstream {
        message: String,
        data: Option<serde_json::Value>,
    },
}

/// Failures talking to a provider, before they are mapped for the client.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("{provider} API error: {status}")]
    Http {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("No usable content in {0} API response")]
    EmptyResponse(&'static str),

    #[error("Audio URL not found in {provider} API response (available keys: {})", .keys.join(", "))]
    MissingField {
        provider: &'static str,
        keys: Vec<String>,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ProviderError {
    /// Upstream HTTP status, when the provider answered with one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ProviderError::Http { status, .. } => Some(*status),
            ProviderError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Diagnostic snapshot for logs and the development fallback.
    pub fn debug_info(&self) -> serde_json::Value {
        let mut info = serde_json::json!({ "message": self.to_string() });
        if let ProviderError::Http { status, body, .. } = self {
            info["status"] = status.as_u16().into();
            info["statusText"] = status.canonical_reason().unwrap_or_default().into();
            info["data"] = serde_json::from_str(body)
                .unwrap_or_else(|_| serde_json::Value::String(body.clone()));
        }
        if let ProviderError::Transport(e) = self {
            info["timeout"] = e.is_timeout().into();
        }
        info
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub status_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        tracing::error!("Request failed: {} - {}", status.as_u16(), message);

        let data = match self {
            AppError::Upstream { data, .. } => data,
            _ => None,
        };

        (
            status,
            Json(ErrorResponse {
                status_code: status.as_u16(),
                status_message: message,
                data,
            }),
        )
            .into_response()
    }
}
