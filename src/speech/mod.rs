pub mod murf;

use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::config::{key_presence, ApiKey, MurfSettings, RuntimeMode};
use crate::error::{AppError, ProviderError};

use murf::{GenerateSpeechRequest, GeneratedSpeech, SpeechUsage};

pub const FALLBACK_AUDIO_URL: &str = "https://www.soundjay.com/misc/sounds/bell-ringing-05.mp3";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponse {
    pub audio_url: String,
    #[serde(flatten)]
    pub usage: SpeechUsage,
    #[serde(rename = "_error", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "_debug", skip_serializing_if = "Option::is_none")]
    pub debug: Option<serde_json::Value>,
    #[serde(rename = "_warning", skip_serializing_if = "Option::is_none")]
    pub fallback_warning: Option<String>,
}

impl From<GeneratedSpeech> for SpeechResponse {
    fn from(speech: GeneratedSpeech) -> Self {
        Self {
            audio_url: speech.audio_url,
            usage: speech.usage,
            error: None,
            debug: None,
            fallback_warning: None,
        }
    }
}

impl SpeechResponse {
    fn fallback(err: &ProviderError) -> Self {
        Self {
            audio_url: FALLBACK_AUDIO_URL.to_string(),
            usage: SpeechUsage::default(),
            error: Some(err.to_string()),
            debug: Some(err.debug_info()),
            fallback_warning: Some(
                "Using fallback audio due to Murf API error in development mode".to_string(),
            ),
        }
    }
}

/// Converts text to a hosted audio file via the speech provider.
pub struct SpeechService {
    client: Client,
    settings: MurfSettings,
    mode: RuntimeMode,
}

impl SpeechService {
    pub fn new(settings: MurfSettings, mode: RuntimeMode) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            settings,
            mode,
        })
    }

    pub async fn synthesize(&self, text: &str) -> Result<SpeechResponse, AppError> {
        if text.is_empty() {
            return Err(AppError::Validation(
                "Text is required for text-to-speech conversion".into(),
            ));
        }

        let api_key = match &self.settings.api_key {
            Some(key) if !key.is_empty() => key,
            _ => {
                tracing::error!("Murf API key is not configured");
                return Err(AppError::Config(
                    "Murf API key is not configured. Please check your server configuration."
                        .into(),
                ));
            }
        };

        tracing::info!(
            api_key = key_presence(Some(api_key)),
            chars = text.chars().count(),
            "Sending text to Murf API for TTS conversion"
        );

        match self.generate(api_key, text).await {
            Ok(speech) => {
                tracing::info!("Successfully generated audio URL: {}", speech.audio_url);
                Ok(speech.into())
            }
            Err(e) => {
                tracing::error!(debug = %e.debug_info(), "Error in text-to-speech conversion");
                classify_failure(e, self.mode)
            }
        }
    }

    async fn generate(&self, api_key: &ApiKey, text: &str) -> Result<GeneratedSpeech, ProviderError> {
        let url = format!(
            "{}/v1/speech/generate",
            self.settings.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header("api-key", api_key.expose())
            .json(&GenerateSpeechRequest::new(text))
            .send()
            .await?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "Received response from Murf API");

        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Http {
                provider: murf::PROVIDER,
                status,
                body,
            });
        }

        tracing::debug!("Full Murf API response: {}", body);

        murf::parse_response(&body)
    }
}

/// Maps a provider failure to the client-facing outcome.
///
/// Authentication and rate-limit failures are always reported. Anything else
/// degrades to the placeholder audio in development and fails in production.
pub fn classify_failure(err: ProviderError, mode: RuntimeMode) -> Result<SpeechResponse, AppError> {
    match err.status() {
        Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN) => Err(AppError::Unauthorized(
            "Invalid Murf API key. Please check your API key configuration.".into(),
        )),
        Some(StatusCode::TOO_MANY_REQUESTS) => Err(AppError::RateLimited(
            "Murf API rate limit exceeded. Please try again later.".into(),
        )),
        _ if mode.is_development() => {
            tracing::warn!("Development mode: providing fallback audio and error details");
            Ok(SpeechResponse::fallback(&err))
        }
        _ => Err(AppError::Upstream {
            message: format!("Text-to-speech conversion failed: {}", err),
            data: None,
        }),
    }
}
