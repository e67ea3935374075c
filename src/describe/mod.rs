pub mod gemini;

use reqwest::Client;

use crate::config::{key_presence, ApiKey, GeminiSettings, RuntimeMode};
use crate::error::{AppError, ProviderError};

use gemini::{GenerateContentRequest, GenerateContentResponse, PROVIDER};

/// Turns camera frames into spoken-style scene descriptions.
pub struct DescribeService {
    client: Client,
    settings: GeminiSettings,
    mode: RuntimeMode,
}

impl DescribeService {
    pub fn new(settings: GeminiSettings, mode: RuntimeMode) -> Self {
        Self {
            client: Client::new(),
            settings,
            mode,
        }
    }

    pub async fn describe(&self, image: &str) -> Result<String, AppError> {
        if image.is_empty() {
            return Err(AppError::Validation("Image data is required".into()));
        }

        let api_key = match &self.settings.api_key {
            Some(key) if !key.is_empty() => key,
            _ => {
                tracing::error!("Gemini API key is not configured");
                return Err(AppError::Config(
                    "Gemini API key is not configured. Please check your server configuration."
                        .into(),
                ));
            }
        };

        tracing::info!(
            model = %self.settings.model,
            api_key = key_presence(Some(api_key)),
            mode = self.mode.as_str(),
            "Sending request to Gemini API"
        );

        match self.generate(api_key, image).await {
            Ok(text) => {
                tracing::info!("Extracted text from Gemini API: {}", text);
                Ok(text)
            }
            Err(e) => {
                tracing::error!(debug = %e.debug_info(), "Error calling Gemini API");
                Err(AppError::Upstream {
                    message: format!("Failed to get description: {}", e),
                    data: Some(serde_json::json!({ "originalError": e.to_string() })),
                })
            }
        }
    }

    async fn generate(&self, api_key: &ApiKey, image: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key.expose())
            .json(&GenerateContentRequest::describe_scene(image))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), error = %body, "Gemini API error");
            return Err(ProviderError::Http {
                provider: PROVIDER,
                status,
                body,
            });
        }

        tracing::debug!("Gemini API response: {}", body);

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        parsed.text().ok_or_else(|| {
            tracing::error!("Could not extract text from Gemini API response: {}", body);
            ProviderError::EmptyResponse(PROVIDER)
        })
    }
}
