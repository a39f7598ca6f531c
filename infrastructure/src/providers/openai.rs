//! Chat-completions backend (OpenAI and xAI)

use super::http::{build_client, send_json};
use crate::config::{FileOpenAiConfig, FileXaiConfig};
use async_trait::async_trait;
use boardroom_application::{GatewayError, LlmBackend};
use boardroom_domain::{GenerationRequest, ProviderKind};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Backend for any provider speaking the `/v1/chat/completions` format
pub struct OpenAiCompatibleBackend {
    kind: ProviderKind,
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiCompatibleBackend {
    pub fn openai(config: &FileOpenAiConfig, api_key: String) -> Result<Self, GatewayError> {
        Self::new(
            ProviderKind::OpenAi,
            &config.base_url,
            api_key,
            &config.model,
            config.max_tokens,
            config.timeout_secs,
        )
    }

    pub fn xai(config: &FileXaiConfig, api_key: String) -> Result<Self, GatewayError> {
        Self::new(
            ProviderKind::Xai,
            &config.base_url,
            api_key,
            &config.model,
            config.max_tokens,
            config.timeout_secs,
        )
    }

    fn new(
        kind: ProviderKind,
        base_url: &str,
        api_key: String,
        model: &str,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self, GatewayError> {
        Ok(Self {
            kind,
            client: build_client(timeout_secs)?,
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            model: model.to_string(),
            max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_body(&self, request: &GenerationRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.prior_messages.len() + 2);
        messages.push(WireMessage {
            role: "system".to_string(),
            content: request.system_prompt.clone(),
        });
        messages.extend(request.prior_messages.iter().map(|m| WireMessage {
            role: m.role.as_str().to_string(),
            content: m.content.clone(),
        }));
        messages.push(WireMessage {
            role: "user".to_string(),
            content: request.user_turn.clone(),
        });

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl LlmBackend for OpenAiCompatibleBackend {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let body = self.build_body(request);
        let http = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body);

        let response: ChatCompletionResponse = send_json(http, self.kind.as_str()).await?;
        extract_text(response)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
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
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn extract_text(response: ChatCompletionResponse) -> Result<String, GatewayError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GatewayError::MalformedResponse("no choices in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_domain::ChatMessage;

    fn backend() -> OpenAiCompatibleBackend {
        OpenAiCompatibleBackend::xai(&FileXaiConfig::default(), "key".to_string()).unwrap()
    }

    #[test]
    fn test_endpoint_and_kind() {
        let backend = backend();
        assert_eq!(backend.kind(), ProviderKind::Xai);
        assert_eq!(backend.endpoint, "https://api.x.ai/v1/chat/completions");
        assert_eq!(backend.model(), "grok-2-vision-1212");

        let config = FileOpenAiConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        let local = OpenAiCompatibleBackend::openai(&config, "key".to_string()).unwrap();
        assert_eq!(local.endpoint, "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_body_orders_system_history_then_user() {
        let request = GenerationRequest::new("be brief", "and now?")
            .with_prior_messages(vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")])
            .with_temperature(0.9);

        let json = serde_json::to_value(backend().build_body(&request)).unwrap();
        let roles: Vec<_> = json["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(json["messages"][3]["content"], "and now?");
        assert_eq!(json["max_tokens"], 1000);
        assert!((json["temperature"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_extract_text() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "Buy."}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Buy.");

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            extract_text(empty),
            Err(GatewayError::MalformedResponse(_))
        ));
    }
}
