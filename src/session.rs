//! Session-scoped analysis state.
//!
//! One interactive session owns one enriched table, its liquidity summary and
//! one conversation transcript. Nothing here is shared across sessions, so no
//! locking is involved; the whole object is dropped when the session ends.

use crate::schema::{EnrichedTable, LiquidityRatio};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Synthesized data-context turn, injected once per request and never
    /// stored in the transcript.
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only chat transcript in chronological submission order.
///
/// Turns are never reordered or deduplicated. Failed external calls are
/// recorded too: the error text goes in as an assistant turn so a later
/// viewer of the transcript sees exactly what happened.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationSession {
    history: Vec<ChatTurn>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_user_turn(&mut self, content: impl Into<String>) {
        self.history.push(ChatTurn::user(content));
    }

    pub fn record_assistant_turn(&mut self, content: impl Into<String>) {
        self.history.push(ChatTurn::assistant(content));
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Builds the per-request payload: a synthesized system-context turn
    /// followed by the full history in submission order. The system turn is
    /// rebuilt on every request, not persisted.
    pub fn build_request_payload(&self, system_context: &str) -> Vec<ChatTurn> {
        let mut payload = Vec::with_capacity(self.history.len() + 1);
        payload.push(ChatTurn::system(system_context));
        payload.extend(self.history.iter().cloned());
        payload
    }
}

/// The session context object: enriched table, liquidity summary and chat
/// transcript, created on first ingest and owned by one interactive session.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    table: EnrichedTable,
    liquidity: Option<LiquidityRatio>,
    conversation: ConversationSession,
}

impl AnalysisSession {
    pub fn new(table: EnrichedTable, liquidity: Option<LiquidityRatio>) -> Self {
        Self {
            table,
            liquidity,
            conversation: ConversationSession::new(),
        }
    }

    pub fn table(&self) -> &EnrichedTable {
        &self.table
    }

    pub fn liquidity(&self) -> Option<&LiquidityRatio> {
        self.liquidity.as_ref()
    }

    pub fn conversation(&self) -> &ConversationSession {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut ConversationSession {
        &mut self.conversation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape_after_mixed_turns() {
        let mut session = ConversationSession::new();
        session.append_user_turn("What drove asset growth?");
        session.record_assistant_turn("Mostly current assets.");
        session.append_user_turn("And liquidity?");
        session.record_assistant_turn("Liabilities went to zero.");
        session.append_user_turn("Is that sustainable?");
        session.append_user_turn("Summarize in one line.");

        // 1 system turn + 5 prior turns + the new user turn = 7 entries.
        let payload = session.build_request_payload("data context");
        assert_eq!(payload.len(), 7);
        assert_eq!(payload[0].role, ChatRole::System);
        assert_eq!(payload[0].content, "data context");
        assert_eq!(payload[1].role, ChatRole::User);
        assert_eq!(payload[2].role, ChatRole::Assistant);
        assert_eq!(payload[6].content, "Summarize in one line.");
    }

    #[test]
    fn test_history_preserves_submission_order() {
        let mut session = ConversationSession::new();
        session.append_user_turn("same question");
        session.record_assistant_turn("answer");
        session.append_user_turn("same question");

        let history = session.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].content, "same question");
        assert_eq!(history[2].content, "same question");
    }

    #[test]
    fn test_system_turn_is_not_persisted() {
        let mut session = ConversationSession::new();
        session.append_user_turn("hello");
        let _ = session.build_request_payload("context A");
        let _ = session.build_request_payload("context B");

        assert_eq!(session.history().len(), 1);
        assert!(session
            .history()
            .iter()
            .all(|turn| turn.role != ChatRole::System));
    }

    #[test]
    fn test_error_text_recorded_as_assistant_turn() {
        let mut session = ConversationSession::new();
        session.append_user_turn("question");
        session.record_assistant_turn("Gemini API error (status 429): quota exceeded");

        let last = session.history().last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert!(last.content.contains("429"));
    }
}
