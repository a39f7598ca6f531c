//! Gemini generateContent backend

use super::http::{build_client, send_json};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use boardroom_application::{GatewayError, LlmBackend};
use boardroom_domain::{ChatRole, GenerationRequest, ProviderKind};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct GeminiBackend {
    client: Client,
    endpoint: String,
    api_key: String,
    max_tokens: u32,
}

impl GeminiBackend {
    pub fn new(config: &FileGeminiConfig, api_key: String) -> Result<Self, GatewayError> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            api_key,
            max_tokens: config.max_tokens,
        })
    }

    fn build_body(&self, request: &GenerationRequest) -> GenerateContentRequest {
        let mut contents: Vec<Content> = request
            .prior_messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "model",
                };
                Content::text(Some(role), &m.content)
            })
            .collect();
        contents.push(Content::text(Some("user"), &request.user_turn));

        GenerateContentRequest {
            system_instruction: Content::text(None, &request.system_prompt),
            contents,
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: self.max_tokens,
            },
        }
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let http = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_body(request));

        let response: GenerateContentResponse = send_json(http, "gemini").await?;
        extract_text(response)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(rename = "system_instruction")]
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&'static str>, text: &str) -> Self {
        Self {
            role,
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// A 200 reply can still carry an `error` object; it wins over candidates.
fn extract_text(response: GenerateContentResponse) -> Result<String, GatewayError> {
    if let Some(error) = response.error {
        return Err(GatewayError::ProviderError(
            error
                .message
                .unwrap_or_else(|| "unspecified Gemini error".to_string()),
        ));
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GatewayError::MalformedResponse(
            "no candidate text in response".to_string(),
        ));
    }
    Ok(text)
}
