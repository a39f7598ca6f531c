//! Anthropic messages backend

use super::http::{build_client, send_json};
use crate::config::FileAnthropicConfig;
use async_trait::async_trait;
use boardroom_application::{GatewayError, LlmBackend};
use boardroom_domain::{GenerationRequest, ProviderKind};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct AnthropicBackend {
    client: Client,
    endpoint: String,
    api_key: String,
    api_version: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicBackend {
    pub fn new(config: &FileAnthropicConfig, api_key: String) -> Result<Self, GatewayError> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            endpoint: format!("{}/v1/messages", config.base_url.trim_end_matches('/')),
            api_key,
            api_version: config.api_version.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn build_body(&self, request: &GenerationRequest) -> CreateMessageRequest {
        let mut messages: Vec<WireMessage> = request
            .prior_messages
            .iter()
            .map(|m| WireMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            })
            .collect();
        messages.push(WireMessage {
            role: "user".to_string(),
            content: request.user_turn.clone(),
        });

        CreateMessageRequest {
            model: self.model.clone(),
            system: request.system_prompt.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl LlmBackend for AnthropicBackend {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let http = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&self.build_body(request));

        let response: CreateMessageResponse = send_json(http, "anthropic").await?;
        extract_text(response)
    }
}

#[derive(Serialize)]
struct CreateMessageRequest {
    model: String,
    system: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct CreateMessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Join every text block; non-text blocks are skipped
fn extract_text(response: CreateMessageResponse) -> Result<String, GatewayError> {
    let texts: Vec<String> = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect();

    if texts.is_empty() {
        return Err(GatewayError::MalformedResponse(
            "no text blocks in response".to_string(),
        ));
    }
    Ok(texts.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_domain::ChatMessage;

    #[test]
    fn test_system_prompt_is_top_level() {
        let backend = AnthropicBackend::new(&FileAnthropicConfig::default(), "k".into()).unwrap();
        assert_eq!(backend.endpoint, "https://api.anthropic.com/v1/messages");

        let request = GenerationRequest::new("sys", "question")
            .with_prior_messages(vec![ChatMessage::user("a"), ChatMessage::assistant("b")]);
        let json = serde_json::to_value(backend.build_body(&request)).unwrap();

        assert_eq!(json["system"], "sys");
        assert_eq!(json["model"], "claude-3-5-sonnet-20241022");
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(messages[2]["content"], "question");
    }

    #[test]
    fn test_extract_text_joins_text_blocks() {
        let response: CreateMessageResponse = serde_json::from_str(
            r#"{"content": [
                {"type": "text", "text": "first"},
                {"type": "tool_use", "id": "x", "name": "y", "input": {}},
                {"type": "text", "text": "second"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "first\nsecond");
    }

    #[test]
    fn test_extract_text_without_text_blocks() {
        let response: CreateMessageResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(extract_text(response).is_err());
    }
}
