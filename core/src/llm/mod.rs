//! LLM client abstractions and implementations

pub mod client;
pub mod message;
pub mod model;
pub mod providers;

pub use client::{ChatOptions, EmbeddingClient, FinishReason, LlmClient, LlmResponse, Usage};
pub use message::{LlmMessage, MessageRole};
pub use model::LlmModel;
pub use providers::*;
