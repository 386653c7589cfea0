//! Error types for the conversation crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `SessionError`: Errors from session storage
//! - `RouterError`: Errors from tool-call routing (always serialized into a
//!   tool result, never thrown past the router)
//! - `SearchError`: Errors from the document-search collaborator
//! - `TurnError`: What a failed turn surfaces to the caller
//!
//! A single bad tool call must not end the conversation: the router converts
//! every failure into a structured tool result the model can explain. Only
//! model-call failures end the turn.

use party_line_ai::LlmError;
use party_line_core::ConversationSessionId;
use std::fmt;

/// Errors from session storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session not found.
    NotFound { id: ConversationSessionId },
    /// Storage operation failed.
    StorageFailed { reason: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "session not found: {id}"),
            Self::StorageFailed { reason } => {
                write!(f, "session storage failed: {reason}")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Errors from tool-call routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The model named a tool that does not exist.
    UnknownTool { name: String },
    /// A tool argument was missing or malformed.
    InvalidArguments {
        tool: String,
        field: &'static str,
        reason: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTool { name } => write!(f, "unknown tool: {name}"),
            Self::InvalidArguments {
                tool,
                field,
                reason,
            } => {
                write!(f, "invalid argument '{field}' for tool '{tool}': {reason}")
            }
        }
    }
}

impl std::error::Error for RouterError {}

/// Errors from the document-search collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The search backend failed.
    QueryFailed { reason: String },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueryFailed { reason } => {
                write!(f, "document search failed: {reason}")
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Errors that end a conversation turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// The language model could not be reached. There is no mock model; the
    /// caller surfaces a try-again failure.
    ModelUnavailable(LlmError),
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelUnavailable(err) => {
                write!(f, "model call failed: {err}")
            }
        }
    }
}

impl std::error::Error for TurnError {}
