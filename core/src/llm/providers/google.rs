//! Google Gemini chat and embedding clients

use crate::config::LlmProvider;
use crate::error::{Error, LlmError, Result};
use crate::llm::{
    ChatOptions, EmbeddingClient, FinishReason, LlmClient, LlmMessage, LlmResponse, MessageRole,
    Usage,
};
use crate::runtime::ExecutionContext;
use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of texts per `batchEmbedContents` call
pub const MAX_EMBED_BATCH: usize = 100;

/// Gemini resource name for a model, e.g. `models/gemini-2.0-flash`
fn model_resource(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

async fn post_json<B, R>(client: &Client, url: &str, api_key: &str, body: &B) -> Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = client
        .post(url)
        .header("x-goog-api-key", api_key)
        .header("content-type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| LlmError::Network {
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let error_text = response.text().await.unwrap_or_default();
        return Err(LlmError::ApiError {
            status,
            message: error_text,
        }
        .into());
    }

    response.json().await.map_err(|e| {
        LlmError::InvalidResponse {
            message: format!("Failed to parse response: {}", e),
        }
        .into()
    })
}

/// Gemini chat client
#[derive(Clone)]
pub struct GoogleChat {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl GoogleChat {
    /// Create a new Gemini chat client
    pub fn new(api_key: &str, model: impl Into<String>, temperature: f32) -> Result<Self> {
        if api_key.is_empty() {
            return Err(LlmError::Authentication {
                message: "No API key found for Google".to_string(),
            }
            .into());
        }

        Ok(Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: LlmProvider::Google.default_base_url().to_string(),
            model: model.into(),
            temperature,
        })
    }

    /// Point the client at a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// API base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(&self, messages: Vec<LlmMessage>, options: ChatOptions) -> GenerateContentRequest {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in messages {
            let role = match message.role {
                MessageRole::System => {
                    system_parts.push(Part::text(message.content));
                    continue;
                }
                MessageRole::User => "user",
                MessageRole::Assistant => "model",
            };
            contents.push(Content {
                role: Some(role.to_string()),
                parts: vec![Part::text(message.content)],
            });
        }

        GenerateContentRequest {
            contents,
            system_instruction: if system_parts.is_empty() {
                None
            } else {
                Some(Content {
                    role: None,
                    parts: system_parts,
                })
            },
            generation_config: GenerationConfig {
                temperature: options.temperature.unwrap_or(self.temperature),
                max_output_tokens: options.max_tokens,
                stop_sequences: options.stop,
            },
        }
    }

    fn convert_response(&self, response: GenerateContentResponse) -> Result<LlmResponse> {
        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            LlmError::InvalidResponse {
                message: "Gemini returned no candidates".to_string(),
            }
        })?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let finish_reason = candidate.finish_reason.map(|reason| match reason.as_str() {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::Length,
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" => {
                FinishReason::ContentFilter
            }
            _ => FinishReason::Other(reason),
        });

        let usage = response.usage_metadata.map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(LlmResponse {
            message: LlmMessage::assistant(text),
            usage,
            model: response.model_version.unwrap_or_else(|| self.model.clone()),
            finish_reason,
        })
    }
}

#[async_trait]
impl LlmClient for GoogleChat {
    async fn chat_completion(
        &self,
        messages: Vec<LlmMessage>,
        options: Option<ChatOptions>,
    ) -> Result<LlmResponse> {
        let request = self.build_request(messages, options.unwrap_or_default());
        let url = format!(
            "{}/{}:generateContent",
            self.base_url,
            model_resource(&self.model)
        );

        let response: GenerateContentResponse =
            post_json(&self.client, &url, &self.api_key, &request)
                .await
                .map_err(|e| {
                    tracing::error!("Gemini API call failed: {}", e);
                    e
                })?;

        self.convert_response(response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        LlmProvider::Google.as_str()
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }
}

impl fmt::Debug for GoogleChat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleChat")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Gemini embedding client
///
/// Document batches are spawned on the execution context handed in at
/// construction.
#[derive(Clone)]
pub struct GoogleEmbeddings {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    context: ExecutionContext,
}

impl GoogleEmbeddings {
    /// Create a new Gemini embedding client
    pub fn new(api_key: &str, model: &str, context: ExecutionContext) -> Result<Self> {
        if api_key.is_empty() {
            return Err(LlmError::Authentication {
                message: "No API key found for Google".to_string(),
            }
            .into());
        }

        Ok(Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: LlmProvider::Google.default_base_url().to_string(),
            model: model_resource(model),
            context,
        })
    }

    /// Point the client at a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Execution context used for batch requests
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    fn embed_request(&self, text: &str) -> EmbedContentRequest {
        EmbedContentRequest {
            model: self.model.clone(),
            content: Content {
                role: None,
                parts: vec![Part::text(text.to_string())],
            },
        }
    }
}

async fn batch_embed(
    client: Client,
    url: String,
    api_key: String,
    requests: Vec<EmbedContentRequest>,
) -> Result<Vec<Vec<f32>>> {
    let expected = requests.len();
    let response: BatchEmbedContentsResponse =
        post_json(&client, &url, &api_key, &BatchEmbedContentsRequest { requests }).await?;

    if response.embeddings.len() != expected {
        return Err(LlmError::InvalidResponse {
            message: format!(
                "Expected {} embeddings, got {}",
                expected,
                response.embeddings.len()
            ),
        }
        .into());
    }

    Ok(response.embeddings.into_iter().map(|e| e.values).collect())
}

#[async_trait]
impl EmbeddingClient for GoogleEmbeddings {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/{}:embedContent", self.base_url, self.model);
        let response: EmbedContentResponse =
            post_json(&self.client, &url, &self.api_key, &self.embed_request(text)).await?;
        Ok(response.embedding.values)
    }

    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/{}:batchEmbedContents", self.base_url, self.model);
        let handles = texts.chunks(MAX_EMBED_BATCH).map(|chunk| {
            let requests = chunk.iter().map(|text| self.embed_request(text)).collect();
            self.context.handle().spawn(batch_embed(
                self.client.clone(),
                url.clone(),
                self.api_key.clone(),
                requests,
            ))
        });

        let batches = try_join_all(handles)
            .await
            .map_err(|e| Error::Runtime(format!("Embedding task failed: {}", e)))?;

        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in batches {
            embeddings.extend(batch?);
        }
        Ok(embeddings)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

impl fmt::Debug for GoogleEmbeddings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleEmbeddings")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("context", &self.context)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Part {
    fn text(text: String) -> Self {
        Self { text: Some(text) }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_sequences: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest {
    model: String,
    content: Content,
}

#[derive(Debug, Serialize)]
struct BatchEmbedContentsRequest {
    requests: Vec<EmbedContentRequest>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedContentsResponse {
    #[serde(default)]
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}
