//! Chat model selected by provider

use super::{ChatOptions, GoogleChat, GroqChat, LlmClient, LlmMessage, LlmResponse, OpenAiChat};
use crate::config::LlmProvider;
use crate::error::Result;
use async_trait::async_trait;

/// A constructed chat client, tagged by provider
#[derive(Debug, Clone)]
pub enum LlmModel {
    Groq(GroqChat),
    Google(GoogleChat),
    OpenAi(OpenAiChat),
}

impl LlmModel {
    /// Build the client for `provider`
    pub fn build(
        provider: LlmProvider,
        api_key: &str,
        model: &str,
        temperature: f32,
    ) -> Result<Self> {
        Ok(match provider {
            LlmProvider::Groq => LlmModel::Groq(GroqChat::new(api_key, model, temperature)?),
            LlmProvider::Google => LlmModel::Google(GoogleChat::new(api_key, model, temperature)?),
            LlmProvider::OpenAi => LlmModel::OpenAi(OpenAiChat::new(api_key, model, temperature)?),
        })
    }

    /// Provider this client talks to
    pub fn provider(&self) -> LlmProvider {
        match self {
            LlmModel::Groq(_) => LlmProvider::Groq,
            LlmModel::Google(_) => LlmProvider::Google,
            LlmModel::OpenAi(_) => LlmProvider::OpenAi,
        }
    }

    fn client(&self) -> &dyn LlmClient {
        match self {
            LlmModel::Groq(c) => c,
            LlmModel::Google(c) => c,
            LlmModel::OpenAi(c) => c,
        }
    }
}

#[async_trait]
impl LlmClient for LlmModel {
    async fn chat_completion(
        &self,
        messages: Vec<LlmMessage>,
        options: Option<ChatOptions>,
    ) -> Result<LlmResponse> {
        self.client().chat_completion(messages, options).await
    }

    fn model_name(&self) -> &str {
        self.client().model_name()
    }

    fn provider_name(&self) -> &str {
        self.client().provider_name()
    }

    fn temperature(&self) -> f32 {
        self.client().temperature()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_selects_variant() {
        for provider in LlmProvider::ALL {
            let model = LlmModel::build(provider, "key", "some-model", 0.3).unwrap();
            assert_eq!(model.provider(), provider);
            assert_eq!(model.provider_name(), provider.as_str());
            assert_eq!(model.model_name(), "some-model");
            assert_eq!(model.temperature(), 0.3);
        }
    }
}
