//! The conversation turn loop.
//!
//! One user message triggers exactly one loop: send persona + full history
//! to the model, execute any tool calls it issues, append the results, and
//! repeat until the model produces a final answer or the iteration budget
//! runs out. All intermediate tool traffic stays in history, so later turns
//! see everything earlier turns did.

use crate::error::TurnError;
use crate::message::{Message, MessageRole, ToolCall};
use crate::persona::PERSONA;
use crate::router::ToolRouter;
use crate::session::Session;
use crate::tools::builtin_tools;
use party_line_ai::{ChatMessage, ChatRequest, ChatRole, LlmBackend, ToolCallRequest};
use std::sync::Arc;

/// Default bound on tool-call iterations within a single turn.
const DEFAULT_MAX_TOOL_ITERATIONS: u32 = 10;

/// Final answer used when the iteration budget is exhausted.
const BUDGET_EXHAUSTED_REPLY: &str = "I'm sorry, I wasn't able to finish that request. \
Could you try again, maybe one step at a time?";

/// Drives the model/tool loop for a session.
pub struct ConversationOrchestrator {
    backend: Arc<dyn LlmBackend>,
    router: ToolRouter,
    persona: String,
    max_tool_iterations: u32,
}

impl ConversationOrchestrator {
    /// Creates an orchestrator with the default persona and iteration bound.
    #[must_use]
    pub fn new(backend: Arc<dyn LlmBackend>, router: ToolRouter) -> Self {
        Self {
            backend,
            router,
            persona: PERSONA.to_string(),
            max_tool_iterations: DEFAULT_MAX_TOOL_ITERATIONS,
        }
    }

    /// Overrides the persona text.
    #[must_use]
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    /// Overrides the tool-call iteration bound.
    #[must_use]
    pub fn with_max_tool_iterations(mut self, max_tool_iterations: u32) -> Self {
        self.max_tool_iterations = max_tool_iterations;
        self
    }

    /// Runs one turn: user message in, final natural-language answer out.
    ///
    /// Takes `&mut Session` so two turns of the same session can never
    /// interleave; independent sessions run concurrently.
    ///
    /// # Errors
    ///
    /// Returns `TurnError::ModelUnavailable` if a model call fails. Tool
    /// failures never end the turn; they are appended as structured results
    /// for the model to explain.
    pub async fn run_turn(
        &self,
        session: &mut Session,
        user_text: &str,
    ) -> Result<String, TurnError> {
        session.push(Message::user(user_text));

        for iteration in 0..self.max_tool_iterations {
            let request = self.build_request(session);
            let response = self
                .backend
                .chat(&request)
                .await
                .map_err(TurnError::ModelUnavailable)?;

            if !response.has_tool_calls() {
                let answer = response.content.unwrap_or_default();
                session.push(Message::assistant(answer.clone()));
                return Ok(answer);
            }

            let mut assistant = Message::assistant(response.content.clone().unwrap_or_default());
            for call in &response.tool_calls {
                assistant = assistant.with_tool_call(ToolCall::new(
                    &call.id,
                    &call.name,
                    call.arguments.clone(),
                ));
            }
            session.push(assistant);

            for call in &response.tool_calls {
                let tool_call = ToolCall::new(&call.id, &call.name, call.arguments.clone());
                let result = self.router.dispatch(&tool_call).await;
                tracing::debug!(
                    tool = %call.name,
                    iteration,
                    success = result.is_success(),
                    "tool call dispatched"
                );
                session.push(Message::tool(result));
            }
        }

        tracing::warn!(
            max_tool_iterations = self.max_tool_iterations,
            session = %session.id,
            "tool iteration budget exhausted, ending turn"
        );
        session.push(Message::assistant(BUDGET_EXHAUSTED_REPLY));
        Ok(BUDGET_EXHAUSTED_REPLY.to_string())
    }

    fn build_request(&self, session: &Session) -> ChatRequest {
        let messages = session.messages.iter().map(to_chat_message).collect();
        ChatRequest::new(messages)
            .with_system(self.persona.clone())
            .with_tools(builtin_tools())
    }
}

/// Maps a history message to the model wire shape, preserving order and
/// content exactly.
fn to_chat_message(message: &Message) -> ChatMessage {
    match message.role {
        MessageRole::User => ChatMessage::user(message.content.clone()),
        MessageRole::System => ChatMessage {
            role: ChatRole::System,
            content: message.content.clone(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        },
        MessageRole::Assistant => {
            let tool_calls = message
                .tool_calls
                .iter()
                .map(|call| ToolCallRequest {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    arguments: call.arguments.clone(),
                })
                .collect::<Vec<_>>();
            if tool_calls.is_empty() {
                ChatMessage::assistant(message.content.clone())
            } else {
                ChatMessage::assistant_with_tool_calls(message.content.clone(), tool_calls)
            }
        }
        MessageRole::Tool => match &message.tool_result {
            Some(result) => ChatMessage::tool(
                result.tool_call_id.clone(),
                result.result.to_string(),
            ),
            None => ChatMessage::tool("", message.content.clone()),
        },
    }
}
