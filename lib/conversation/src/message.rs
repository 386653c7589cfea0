//! Message types for conversations.
//!
//! The conversation log is append-only and replayed to the model in full
//! every turn, so equality and ordering of roles and content are kept exact.

use chrono::{DateTime, Utc};
use party_line_core::MessageId;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// User/human message.
    User,
    /// Assistant/AI message.
    Assistant,
    /// System message.
    System,
    /// Tool result message.
    Tool,
}

/// A message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// Message role.
    pub role: MessageRole,
    /// Message content.
    pub content: String,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
    /// Tool calls issued by this message (assistant messages).
    pub tool_calls: Vec<ToolCall>,
    /// Tool result carried by this message (tool messages).
    pub tool_result: Option<ToolResult>,
}

impl Message {
    /// Creates a new message.
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            tool_calls: Vec::new(),
            tool_result: None,
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Creates a tool result message.
    #[must_use]
    pub fn tool(result: ToolResult) -> Self {
        let mut msg = Self::new(MessageRole::Tool, "");
        msg.tool_result = Some(result);
        msg
    }

    /// Adds a tool call.
    #[must_use]
    pub fn with_tool_call(mut self, tool_call: ToolCall) -> Self {
        self.tool_calls.push(tool_call);
        self
    }

    /// Returns true if this message has tool calls.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// A tool call made by the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call.
    pub id: String,
    /// The tool name.
    pub name: String,
    /// Arguments for the tool.
    pub arguments: JsonValue,
}

impl ToolCall {
    /// Creates a new tool call.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: JsonValue) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Result of a tool invocation.
///
/// Failures are structured, not thrown away: the payload carries a
/// machine-readable error kind and the `error` field carries the
/// human-readable message the model turns into an explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The tool call ID this result is for.
    pub tool_call_id: String,
    /// The result value.
    pub result: JsonValue,
    /// Error message if the tool failed.
    pub error: Option<String>,
}

impl ToolResult {
    /// Creates a successful tool result.
    #[must_use]
    pub fn success(tool_call_id: impl Into<String>, result: JsonValue) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            result,
            error: None,
        }
    }

    /// Creates a failed tool result with a machine-readable kind.
    #[must_use]
    pub fn failure(
        tool_call_id: impl Into<String>,
        kind: &str,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        Self {
            tool_call_id: tool_call_id.into(),
            result: serde_json::json!({
                "error": { "kind": kind, "message": message }
            }),
            error: Some(message),
        }
    }

    /// Returns true if the tool call succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the machine-readable error kind, if this is a failure.
    #[must_use]
    pub fn error_kind(&self) -> Option<&str> {
        self.result.get("error")?.get("kind")?.as_str()
    }
}
