use serde::{Deserialize, Serialize};

pub const PROVIDER: &str = "Gemini";

/// Instruction sent alongside every frame.
pub const NAVIGATION_PROMPT: &str = "You are a navigation assistant for blind and visually impaired users. \
Describe the surroundings naturally as if you are their eyes, focusing on:\n\n\
1. IMMEDIATE SAFETY: Any obstacles, hazards, or things to be cautious about in the path ahead\n\
2. DISTANCE ESTIMATION: Approximate distances to key objects (e.g., \"about 3 feet ahead\", \"roughly 10 steps to your right\")\n\
3. SPATIAL LAYOUT: General layout of the space and navigation guidance\n\
4. IMPORTANT DETAILS: Signs, text, people, or significant objects\n\n\
IMPORTANT GUIDELINES:\n\
- Never mention \"image\", \"photo\", \"picture\" or \"I can see\" - speak as if you are naturally observing the environment\n\
- Use natural, conversational language like \"There is...\" or \"Ahead of you...\" or \"To your left...\"\n\
- Prioritize safety information first\n\
- Give specific distance estimates when possible\n\
- Keep descriptions clear and actionable for navigation";

pub const IMAGE_MIME_TYPE: &str = "image/jpeg";
pub const TEMPERATURE: f64 = 0.4;
pub const MAX_OUTPUT_TOKENS: u32 = 1000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateContentRequest {
    /// Prompt plus one inline JPEG frame, with the fixed sampling and safety parameters.
    pub fn describe_scene(image_base64: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::text(NAVIGATION_PROMPT),
                    Part::inline_data(IMAGE_MIME_TYPE, image_base64),
                ],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
            safety_settings: vec![
                SafetySetting::new(HarmCategory::Harassment, HarmBlockThreshold::BlockMediumAndAbove),
                SafetySetting::new(HarmCategory::HateSpeech, HarmBlockThreshold::BlockOnlyHigh),
                SafetySetting::new(HarmCategory::SexuallyExplicit, HarmBlockThreshold::BlockOnlyHigh),
                SafetySetting::new(HarmCategory::DangerousContent, HarmBlockThreshold::BlockOnlyHigh),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    pub fn inline_data(mime_type: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    pub fn new(category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        Self { category, threshold }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub enum HarmBlockThreshold {
    #[serde(rename = "BLOCK_MEDIUM_AND_ABOVE")]
    BlockMediumAndAbove,
    #[serde(rename = "BLOCK_ONLY_HIGH")]
    BlockOnlyHigh,
}

/// Only the fields we read. Everything is optional so odd shapes still decode.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Space-joined text parts of the first candidate, or `None` if there are none.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;

        let text = parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn joins_text_parts_with_spaces() {
        let resp = response(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Hello" }, { "text": "world" }] }
            }]
        }));
        assert_eq!(resp.text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn uses_first_candidate_only() {
        let resp = response(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }] } },
                { "content": { "parts": [{ "text": "second" }] } }
            ]
        }));
        assert_eq!(resp.text().as_deref(), Some("first"));
    }

    #[test]
    fn skips_parts_without_text() {
        let resp = response(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Door" }, { "inlineData": { "mimeType": "x", "data": "y" } }, { "text": "ahead" }] }
            }]
        }));
        assert_eq!(resp.text().as_deref(), Some("Door ahead"));
    }

    #[test]
    fn missing_structure_yields_none() {
        assert!(response(json!({})).text().is_none());
        assert!(response(json!({ "candidates": [] })).text().is_none());
        assert!(response(json!({ "candidates": [{ "finishReason": "SAFETY" }] })).text().is_none());
        assert!(response(json!({ "candidates": [{ "content": { "parts": [] } }] })).text().is_none());
        assert!(response(json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] }))
            .text()
            .is_none());
    }

    #[test]
    fn keeps_whitespace_only_output() {
        let resp = response(json!({ "candidates": [{ "content": { "parts": [{ "text": " " }] } }] }));
        assert_eq!(resp.text().as_deref(), Some(" "));
    }

    #[test]
    fn request_carries_prompt_image_and_safety_settings() {
        let body = serde_json::to_value(GenerateContentRequest::describe_scene("abc")).unwrap();

        let parts = &body["contents"][0]["parts"];
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(parts[0]["text"], NAVIGATION_PROMPT);
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["inlineData"]["data"], "abc");

        assert_eq!(body["generationConfig"]["temperature"], 0.4);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1000);

        assert_eq!(
            body["safetySettings"],
            json!([
                { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_ONLY_HIGH" },
                { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_ONLY_HIGH" },
                { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_ONLY_HIGH" }
            ])
        );
    }
}
