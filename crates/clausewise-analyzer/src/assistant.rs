//! Follow-up questions about a single clause

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::prompt::ClausePrompt;
use crate::types::ChatOutcome;
use clausewise_domain::traits::LlmProvider;
use clausewise_domain::{ChatSession, PendingQuestion, SubmitRejection};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;
use tracing::{debug, error};

/// Message recorded on the session when a question fails
pub const CHAT_ERROR_MESSAGE: &str = "Failed to get an answer. Please try again.";

static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("emphasis pattern is valid"));

/// Strip `**bold**` markers from an answer, keeping the enclosed text
///
/// Markers are only paired within a line.
pub fn sanitize_answer(answer: &str) -> String {
    EMPHASIS.replace_all(answer, "$1").into_owned()
}

/// Answers questions about the clause selected in a [`ChatSession`]
pub struct ClauseAssistant<L> {
    llm: L,
    config: AnalyzerConfig,
}

impl<L> ClauseAssistant<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new assistant
    pub fn new(llm: L, config: AnalyzerConfig) -> Self {
        Self { llm, config }
    }

    /// Ask the model about a pending question, returning the sanitized answer
    pub async fn answer(&self, ticket: &PendingQuestion) -> Result<String, AnalyzerError> {
        if !self.llm.is_configured() {
            return Err(AnalyzerError::ConfigurationMissing);
        }

        let request = ClausePrompt::new(&ticket.clause_text, &ticket.question).request(&self.config);
        let answer = self
            .llm
            .generate(&request)
            .await
            .map_err(|e| AnalyzerError::ModelRequest(e.to_string()))?;

        Ok(sanitize_answer(&answer))
    }

    /// Submit a question on the session and record the result
    ///
    /// # Errors
    ///
    /// Returns the rejection when the session does not accept the question
    /// (no clause selected, empty question, or a request already pending).
    /// Model failures are not errors here: they are recorded on the session.
    pub async fn ask(
        &self,
        session: &mut ChatSession,
        question: &str,
    ) -> Result<ChatOutcome, SubmitRejection> {
        let ticket = session.submit(question)?;
        Ok(self.resolve(session, &ticket).await)
    }

    /// Fetch the answer for an already-submitted question and apply it
    pub async fn resolve(&self, session: &mut ChatSession, ticket: &PendingQuestion) -> ChatOutcome {
        match self.answer(ticket).await {
            Ok(answer) => {
                if session.complete(ticket, answer) {
                    ChatOutcome::Answered
                } else {
                    debug!("Dropping answer for a clause that is no longer selected");
                    ChatOutcome::Discarded
                }
            }
            Err(e) => {
                error!("Clause question failed: {}", e);
                if session.fail(ticket, CHAT_ERROR_MESSAGE) {
                    ChatOutcome::Failed
                } else {
                    ChatOutcome::Discarded
                }
            }
        }
    }
}
