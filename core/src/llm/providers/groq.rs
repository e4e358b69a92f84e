//! Groq chat client
//!
//! Groq serves an OpenAI-compatible API, so this wraps [`OpenAiChat`]
//! pointed at the Groq endpoint.

use super::OpenAiChat;
use crate::config::LlmProvider;
use crate::error::Result;
use crate::llm::{ChatOptions, LlmClient, LlmMessage, LlmResponse};
use async_trait::async_trait;

/// Groq chat client
#[derive(Debug, Clone)]
pub struct GroqChat {
    inner: OpenAiChat,
}

impl GroqChat {
    /// Create a client for the Groq API
    pub fn new(api_key: &str, model: impl Into<String>, temperature: f32) -> Result<Self> {
        let inner = OpenAiChat::compatible(
            LlmProvider::Groq.as_str(),
            api_key,
            model.into(),
            temperature,
            LlmProvider::Groq.default_base_url(),
        )?;
        Ok(Self { inner })
    }

    /// Point the client at a different API base URL
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self {
            inner: self.inner.with_base_url(base_url),
        }
    }

    /// API base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }
}

#[async_trait]
impl LlmClient for GroqChat {
    async fn chat_completion(
        &self,
        messages: Vec<LlmMessage>,
        options: Option<ChatOptions>,
    ) -> Result<LlmResponse> {
        self.inner.chat_completion(messages, options).await
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    fn temperature(&self) -> f32 {
        self.inner.temperature()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_uses_groq_endpoint() {
        let chat = GroqChat::new("gsk-test", "llama-3.1-8b-instant", 0.5).unwrap();
        assert_eq!(chat.base_url(), "https://api.groq.com/openai/v1");
        assert_eq!(chat.provider_name(), "groq");
        assert_eq!(chat.temperature(), 0.5);
    }

    #[tokio::test]
    async fn test_invoke_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("authorization", "Bearer gsk-test"))
            .and(body_partial_json(json!({ "model": "llama-3.1-8b-instant" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-groq",
                "object": "chat.completion",
                "created": 1_700_000_000,
                "model": "llama-3.1-8b-instant",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": "New Delhi" },
                    "finish_reason": "length"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let chat = GroqChat::new("gsk-test", "llama-3.1-8b-instant", 0.5)
            .unwrap()
            .with_base_url(format!("{}/openai/v1", server.uri()));

        let response = chat.invoke("capital?").await.unwrap();
        assert_eq!(response.text(), "New Delhi");
        assert_eq!(response.model, "llama-3.1-8b-instant");
        assert_eq!(response.finish_reason, Some(crate::llm::FinishReason::Length));
        assert!(response.usage.is_none());
    }
}
