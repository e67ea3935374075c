use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ProviderError;

pub const PROVIDER: &str = "Murf";

pub const VOICE_ID: &str = "en-US-natalie";
pub const AUDIO_FORMAT: &str = "mp3";
pub const SAMPLE_RATE: u32 = 24_000;

/// Field names the audio URL has appeared under, most likely first.
pub const AUDIO_URL_FIELDS: [&str; 4] = ["audioFile", "url", "audioUrl", "audio_url"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSpeechRequest<'a> {
    pub text: &'a str,
    pub voice_id: &'a str,
    pub format: &'a str,
    pub sample_rate: u32,
}

impl<'a> GenerateSpeechRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            voice_id: VOICE_ID,
            format: AUDIO_FORMAT,
            sample_rate: SAMPLE_RATE,
        }
    }
}

/// Optional metadata passed straight through to the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_length_in_seconds: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_character_count: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_character_count: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSpeech {
    pub audio_url: String,
    pub usage: SpeechUsage,
}

/// First non-empty string among `fields`, in order.
pub fn probe_field<'a>(body: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|name| body.get(*name).and_then(Value::as_str))
        .find(|value| !value.is_empty())
}

/// Pulls the audio URL and usage metadata out of a successful response body.
pub fn parse_response(body: &str) -> Result<GeneratedSpeech, ProviderError> {
    let value: Value = serde_json::from_str(body)?;

    let object = match value {
        Value::Object(map) => map,
        _ => return Err(ProviderError::EmptyResponse(PROVIDER)),
    };

    let audio_url = probe_field(&object, &AUDIO_URL_FIELDS).ok_or_else(|| {
        let keys: Vec<String> = object.keys().cloned().collect();
        tracing::error!(
            "Murf API response did not contain an audio URL. Available keys: {}",
            keys.join(", ")
        );
        ProviderError::MissingField {
            provider: PROVIDER,
            keys,
        }
    })?;

    let audio_url = audio_url.to_string();
    let usage = SpeechUsage {
        audio_length_in_seconds: object.get("audioLengthInSeconds").cloned(),
        consumed_character_count: object.get("consumedCharacterCount").cloned(),
        remaining_character_count: object.get("remainingCharacterCount").cloned(),
        warning: object.get("warning").cloned(),
    };

    Ok(GeneratedSpeech { audio_url, usage })
}
