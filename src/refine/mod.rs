//! Rule-based refinement chat over an existing UML model.
//!
//! Feedback is lowercased once and run through an ordered rule table
//! (`rules::RULES`); the first rule that returns a reply wins. When no rule
//! acts, `fallback::converse` answers with a canned message and, for vague
//! input, clarifying questions.
//!
//! The caller's model is never modified: edits come back as a new `Model`
//! in `RefineReply::updated_model`.

pub mod fallback;
pub mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::devlog::InputId;
use crate::model::Model;

/// One prior chat message. Extra fields sent by UI clients are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineReply {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_model: Option<Model>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarifications: Option<Vec<String>>,
}

impl RefineReply {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            updated_model: None,
            clarifications: None,
        }
    }

    pub fn edit(message: impl Into<String>, model: Model) -> Self {
        Self {
            message: message.into(),
            updated_model: Some(model),
            clarifications: None,
        }
    }

    pub fn with_clarifications(mut self, questions: &[&str]) -> Self {
        if !questions.is_empty() {
            self.clarifications = Some(questions.iter().map(|q| q.to_string()).collect());
        }
        self
    }
}

/// Which rule produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    AddClass,
    AddRelationship,
    ChangeRelationship,
    Conversation,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddClass => "add_class",
            Self::AddRelationship => "add_relationship",
            Self::ChangeRelationship => "change_relationship",
            Self::Conversation => "conversation",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub intent: Intent,
    pub reply: RefineReply,
}

/// Feedback text as typed plus its lowercased form used for matching.
#[derive(Debug, Clone)]
pub struct Feedback {
    raw: String,
    lower: String,
}

impl Feedback {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            lower: raw.to_lowercase(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.lower.contains(n))
    }
}

/// Resolve feedback against `model`. `history` is accepted for context only.
pub fn resolve(model: &Model, feedback: &str, history: &[ChatTurn]) -> Resolution {
    let fb = Feedback::new(feedback);

    let (intent, reply) = rules::RULES
        .iter()
        .find_map(|(intent, rule)| rule(model, &fb).map(|reply| (*intent, reply)))
        .unwrap_or_else(|| (Intent::Conversation, fallback::converse(model, &fb)));

    debug!(
        target: "refine",
        id = %InputId::of(feedback),
        intent = intent.as_str(),
        edited = reply.updated_model.is_some(),
        history = history.len(),
        "resolved"
    );
    Resolution { intent, reply }
}

pub fn refine(model: &Model, feedback: &str, history: &[ChatTurn]) -> RefineReply {
    resolve(model, feedback, history).reply
}
