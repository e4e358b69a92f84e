//! Provider client implementations

pub mod google;
pub mod groq;
pub mod openai;

pub use google::{GoogleChat, GoogleEmbeddings};
pub use groq::GroqChat;
pub use openai::OpenAiChat;
