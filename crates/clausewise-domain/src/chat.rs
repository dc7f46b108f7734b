//! Per-clause chat session state machine
//!
//! ```text
//! Idle --select--> Open --submit--> Awaiting --complete--> Open
//!                   ^                  |
//!                   +------fail--------+   (error recorded, transcript kept)
//! ```
//!
//! Selecting a clause always starts a fresh transcript. At most one question
//! is outstanding per session; a pending question is a ticket tied to the
//! selection that issued it, so an answer arriving after the user moved to a
//! different clause is dropped instead of leaking into the new transcript.

use crate::view::FlatClause;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opening assistant message of every session
pub const GREETING: &str =
    "Hi! I'm here to help you understand this clause. Ask a question or pick a suggested one below.";

/// Follow-up questions offered when a session opens
pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "What does this clause mean in simple terms?",
    "Is this clause standard for this kind of agreement?",
    "What could go wrong for me because of this clause?",
    "How could I negotiate a better version of this clause?",
];

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person asking
    User,
    /// The model's answer
    Assistant,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author
    pub role: ChatRole,
    /// Plain text
    pub text: String,
}

impl ChatMessage {
    /// A user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    /// An assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// Why a submission was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// No clause is selected
    NoClauseSelected,
    /// The question is empty after trimming
    EmptyQuestion,
    /// A question is already awaiting its answer
    RequestPending,
}

impl fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejection::NoClauseSelected => f.write_str("no clause selected"),
            SubmitRejection::EmptyQuestion => f.write_str("question is empty"),
            SubmitRejection::RequestPending => f.write_str("a question is already pending"),
        }
    }
}

impl std::error::Error for SubmitRejection {}

/// Ticket for an outstanding question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    generation: u64,
    /// Verbatim text of the selected clause
    pub clause_text: String,
    /// The trimmed question
    pub question: String,
}

/// Chat state for one selected clause
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    clause: Option<FlatClause>,
    transcript: Vec<ChatMessage>,
    pending: bool,
    error: Option<String>,
    generation: u64,
}

impl ChatSession {
    /// Create an idle session (no clause selected)
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a clause is selected
    pub fn is_open(&self) -> bool {
        self.clause.is_some()
    }

    /// The selected clause
    pub fn selected(&self) -> Option<&FlatClause> {
        self.clause.as_ref()
    }

    /// The transcript, oldest first
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Whether a question is awaiting its answer
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Error from the last failed question
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the input accepts a new question
    pub fn input_enabled(&self) -> bool {
        self.is_open() && !self.pending
    }

    /// Select a clause, discarding any previous transcript
    pub fn select(&mut self, clause: FlatClause) {
        self.generation += 1;
        self.clause = Some(clause);
        self.transcript = vec![ChatMessage::assistant(GREETING)];
        self.pending = false;
        self.error = None;
    }

    /// Close the session and return to idle
    pub fn close(&mut self) {
        self.generation += 1;
        self.clause = None;
        self.transcript.clear();
        self.pending = false;
        self.error = None;
    }

    /// Submit a question
    ///
    /// On success the question is appended to the transcript and the session
    /// waits for [`complete`](Self::complete) or [`fail`](Self::fail).
    pub fn submit(&mut self, input: &str) -> Result<PendingQuestion, SubmitRejection> {
        let clause = self.clause.as_ref().ok_or(SubmitRejection::NoClauseSelected)?;
        if self.pending {
            return Err(SubmitRejection::RequestPending);
        }
        let question = input.trim();
        if question.is_empty() {
            return Err(SubmitRejection::EmptyQuestion);
        }

        let ticket = PendingQuestion {
            generation: self.generation,
            clause_text: clause.original_text.clone(),
            question: question.to_string(),
        };

        self.error = None;
        self.pending = true;
        self.transcript.push(ChatMessage::user(question));
        Ok(ticket)
    }

    /// Record the answer to a pending question
    ///
    /// Returns `false` and changes nothing if the ticket is stale.
    pub fn complete(&mut self, ticket: &PendingQuestion, answer: impl Into<String>) -> bool {
        if !self.owns(ticket) {
            return false;
        }
        self.transcript.push(ChatMessage::assistant(answer));
        self.pending = false;
        true
    }

    /// Record a failed question; the transcript is left as is
    ///
    /// Returns `false` and changes nothing if the ticket is stale.
    pub fn fail(&mut self, ticket: &PendingQuestion, message: impl Into<String>) -> bool {
        if !self.owns(ticket) {
            return false;
        }
        self.error = Some(message.into());
        self.pending = false;
        true
    }

    fn owns(&self, ticket: &PendingQuestion) -> bool {
        self.pending && ticket.generation == self.generation
    }
}
