//! Language model backend for the party-line platform.
//!
//! This crate provides:
//!
//! - **Backend abstraction**: A chat-with-tools interface the orchestrator
//!   drives without knowing which provider is behind it
//! - **OpenAI-compatible client**: The concrete HTTP backend (the park's
//!   deployment targets xAI Grok through the OpenAI-compatible surface)
//!
//! Streaming is deliberately not part of the contract; the orchestrator
//! replays full history every turn and expects a complete response.

pub mod backend;
pub mod error;
pub mod openai;

pub use backend::{
    ChatMessage, ChatRequest, ChatResponse, ChatRole, LlmBackend, LlmBackendConfig, LlmProvider,
    TokenUsage, ToolCallRequest, ToolSpec,
};
pub use error::LlmError;
pub use openai::OpenAiCompatBackend;
