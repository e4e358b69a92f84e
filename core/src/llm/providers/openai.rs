//! OpenAI chat client implementation using async-openai library
//!
//! The same client serves any OpenAI-compatible endpoint; see `groq.rs`.

use crate::config::LlmProvider;
use crate::error::{LlmError, Result};
use crate::llm::{
    ChatOptions, FinishReason, LlmClient, LlmMessage, LlmResponse, MessageRole, Usage,
};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
    Client,
};
use async_trait::async_trait;
use std::fmt;

/// OpenAI chat client
#[derive(Clone)]
pub struct OpenAiChat {
    client: Client<OpenAIConfig>,
    api_key: String,
    model: String,
    temperature: f32,
    base_url: String,
    provider: &'static str,
}

impl OpenAiChat {
    /// Create a client for the OpenAI API
    pub fn new(api_key: &str, model: impl Into<String>, temperature: f32) -> Result<Self> {
        Self::compatible(
            LlmProvider::OpenAi.as_str(),
            api_key,
            model.into(),
            temperature,
            LlmProvider::OpenAi.default_base_url(),
        )
    }

    /// Create a client for an OpenAI-compatible endpoint
    pub(crate) fn compatible(
        provider: &'static str,
        api_key: &str,
        model: String,
        temperature: f32,
        base_url: &str,
    ) -> Result<Self> {
        if api_key.is_empty() {
            return Err(LlmError::Authentication {
                message: format!("No API key found for {}", provider),
            }
            .into());
        }

        Ok(Self {
            client: build_client(api_key, base_url),
            api_key: api_key.to_string(),
            model,
            temperature,
            base_url: base_url.to_string(),
            provider,
        })
    }

    /// Point the client at a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.client = build_client(&self.api_key, &self.base_url);
        self
    }

    /// API base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Convert our internal message format to async-openai format
    fn convert_messages(&self, messages: Vec<LlmMessage>) -> Vec<ChatCompletionRequestMessage> {
        messages
            .into_iter()
            .map(|message| match message.role {
                MessageRole::System => {
                    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                        content: message.content.into(),
                        name: None,
                    })
                }
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: message.content.into(),
                        name: None,
                    })
                }
                MessageRole::Assistant => ChatCompletionRequestMessage::Assistant(
                    ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            message.content,
                        )),
                        name: None,
                        ..Default::default()
                    },
                ),
            })
            .collect()
    }

    fn convert_response(&self, response: CreateChatCompletionResponse) -> Result<LlmResponse> {
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            LlmError::InvalidResponse {
                message: format!("{} returned no choices", self.provider),
            }
        })?;

        let finish_reason = choice.finish_reason.map(|reason| match reason {
            async_openai::types::FinishReason::Stop => FinishReason::Stop,
            async_openai::types::FinishReason::Length => FinishReason::Length,
            async_openai::types::FinishReason::ToolCalls => FinishReason::ToolCalls,
            async_openai::types::FinishReason::ContentFilter => FinishReason::ContentFilter,
            async_openai::types::FinishReason::FunctionCall => FinishReason::ToolCalls,
        });

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(LlmResponse {
            message: LlmMessage::assistant(choice.message.content.unwrap_or_default()),
            usage,
            model: response.model,
            finish_reason,
        })
    }

    fn map_error(&self, error: OpenAIError) -> LlmError {
        match error {
            OpenAIError::Reqwest(e) => LlmError::Network {
                message: e.to_string(),
            },
            OpenAIError::InvalidArgument(message) => LlmError::InvalidRequest { message },
            other => LlmError::Provider {
                provider: self.provider.to_string(),
                message: other.to_string(),
            },
        }
    }
}

fn build_client(api_key: &str, base_url: &str) -> Client<OpenAIConfig> {
    let config = OpenAIConfig::new()
        .with_api_key(api_key)
        .with_api_base(base_url);
    Client::with_config(config)
}

#[async_trait]
impl LlmClient for OpenAiChat {
    async fn chat_completion(
        &self,
        messages: Vec<LlmMessage>,
        options: Option<ChatOptions>,
    ) -> Result<LlmResponse> {
        let options = options.unwrap_or_default();

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model);
        request_builder.messages(self.convert_messages(messages));
        request_builder.temperature(options.temperature.unwrap_or(self.temperature));

        if let Some(max_tokens) = options.max_tokens {
            request_builder.max_tokens(max_tokens);
        }
        if let Some(stop) = options.stop {
            request_builder.stop(stop);
        }

        let request = request_builder.build().map_err(|e| {
            tracing::error!("Failed to build {} request: {}", self.provider, e);
            LlmError::InvalidRequest {
                message: format!("Failed to build request: {}", e),
            }
        })?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!("{} API call failed: {}", self.provider, e);
            self.map_error(e)
        })?;

        self.convert_response(response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        self.provider
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }
}

impl fmt::Debug for OpenAiChat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiChat")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .finish()
    }
}
