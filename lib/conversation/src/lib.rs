//! Conversational booking orchestration for the party-line platform.
//!
//! This crate provides:
//!
//! - **Messages and sessions**: The append-only conversation log
//! - **Tool router**: Maps model-issued tool calls onto catalog, pricing,
//!   availability, booking, and document-search operations
//! - **Orchestrator**: The bounded model/tool turn loop
//!
//! One turn is one user message through to one final natural-language
//! answer, potentially spanning several tool-call iterations. History is
//! retained across turns, giving the conversation memory.

pub mod error;
pub mod message;
pub mod orchestrator;
pub mod persona;
pub mod router;
pub mod session;
pub mod tools;

pub use error::{RouterError, SearchError, SessionError, TurnError};
pub use message::{Message, MessageRole, ToolCall, ToolResult};
pub use orchestrator::ConversationOrchestrator;
pub use persona::PERSONA;
pub use router::ToolRouter;
pub use session::{InMemorySessionStore, Session, SessionState, SessionStore};
pub use tools::{DocumentSearch, SearchSnippet, ToolName, builtin_tools};
