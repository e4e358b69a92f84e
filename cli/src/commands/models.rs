//! Commands that build and call the configured models

use analyst_core::{EmbeddingClient, LlmClient, ModelLoader};
use anyhow::{Context, Result};
use tracing::info;

const DEMO_TEXT: &str = "Hello, world!";
const DEMO_QUESTION: &str = "WHAT is the capital of INDIA?";

/// Embed a sample text, then ask the chat model a sample question
pub async fn demo_command(loader: ModelLoader) -> Result<()> {
    embed_command(loader.clone(), DEMO_TEXT).await?;
    chat_command(loader, DEMO_QUESTION).await
}

/// Print the embedding of `text`
pub async fn embed_command(loader: ModelLoader, text: &str) -> Result<()> {
    let embeddings = loader.load_embedding_model()?;
    info!("🔢 Embedding with model: {}", embeddings.model_name());

    let vector = embeddings
        .embed_query(text)
        .await
        .context("Embedding request failed")?;

    println!("{:?}", vector);
    Ok(())
}

/// Send `prompt` to the configured chat model and print the answer
pub async fn chat_command(loader: ModelLoader, prompt: &str) -> Result<()> {
    let llm = loader.load_llm_model()?;
    info!(
        "🤖 Using {} model: {}",
        llm.provider_name(),
        llm.model_name()
    );

    let response = llm.invoke(prompt).await.context("Chat request failed")?;

    println!("{}", response.text());
    Ok(())
}
