use crate::error::Result;
use crate::llm::client::GeminiClient;
use crate::llm::types::Content;
use crate::report::{chat_system_context, narrative_prompt, ANALYST_PERSONA};
use crate::schema::{EnrichedTable, LiquidityRatio};
use crate::session::{AnalysisSession, ChatRole, ChatTurn};
use log::info;

/// Drives the two AI features over a [`GeminiClient`]: the one-shot
/// narrative assessment and the follow-up Q&A chat.
pub struct StatementAnalyst {
    client: GeminiClient,
}

impl StatementAnalyst {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Asks the model for a narrative assessment of the analyzed statement.
    pub async fn narrate(
        &self,
        table: &EnrichedTable,
        liquidity: Option<&LiquidityRatio>,
    ) -> Result<String> {
        let prompt = narrative_prompt(table, liquidity);
        info!("requesting narrative analysis from {}", self.client.model());
        self.client
            .generate(ANALYST_PERSONA, vec![Content::user(prompt)])
            .await
    }

    /// Submits one chat turn for the session.
    ///
    /// The user turn is appended first; on success the reply is recorded and
    /// returned. On failure the human-readable error text is still recorded
    /// as an assistant turn before the error propagates, so the transcript
    /// shows the failure instead of silently dropping the exchange.
    pub async fn chat(&self, session: &mut AnalysisSession, question: &str) -> Result<String> {
        session.conversation_mut().append_user_turn(question);

        let context = chat_system_context(session.table(), session.liquidity());
        let payload = session.conversation().build_request_payload(&context);
        let (system_instruction, messages) = split_payload(payload);

        match self.client.generate(&system_instruction, messages).await {
            Ok(reply) => {
                session.conversation_mut().record_assistant_turn(reply.clone());
                Ok(reply)
            }
            Err(err) => {
                session
                    .conversation_mut()
                    .record_assistant_turn(err.to_string());
                Err(err)
            }
        }
    }
}

/// Splits a session payload into the Gemini shape: the leading system turn
/// becomes the system instruction, the rest become `user`/`model` contents.
fn split_payload(payload: Vec<ChatTurn>) -> (String, Vec<Content>) {
    let mut system_instruction = String::new();
    let mut messages = Vec::with_capacity(payload.len());

    for turn in payload {
        match turn.role {
            ChatRole::System => system_instruction = turn.content,
            ChatRole::User => messages.push(Content::user(turn.content)),
            ChatRole::Assistant => messages.push(Content::model(turn.content)),
        }
    }

    (system_instruction, messages)
}
