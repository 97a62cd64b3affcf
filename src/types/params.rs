//! Intent parameter types.
//!
//! One immutable value type per completion intent. Values are constructed by
//! the caller for a single request-construction call and discarded afterwards;
//! nothing here is shared or mutated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A referenced file attached to a chat turn: path plus full contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileReference {
    /// Path shown to the model (workspace-relative or absolute, caller's choice).
    pub path: String,
    /// File contents, verbatim.
    pub content: String,
}

impl FileReference {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// One completed user/assistant exchange from earlier in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exchange {
    pub prompt: String,
    pub response: String,
}

impl Exchange {
    pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response: response.into(),
        }
    }
}

/// The current chat message: the literal prompt plus prior turns.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConversationMessage {
    /// The user's literal prompt for this turn.
    pub prompt: String,
    /// Completed exchanges preceding this turn, oldest first.
    pub history: Vec<Exchange>,
}

impl ConversationMessage {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            history: Vec::new(),
        }
    }

    /// Attach prior exchanges, oldest first.
    pub fn with_history(mut self, history: Vec<Exchange>) -> Self {
        self.history = history;
        self
    }
}

/// Parameters for an interactive chat request.
///
/// `referenced_files` is always present and possibly empty; an empty list
/// means the literal prompt passes through without context folding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatParameters {
    pub message: ConversationMessage,
    pub referenced_files: Vec<FileReference>,
    pub conversation_id: Uuid,
}

impl ChatParameters {
    pub fn new(message: ConversationMessage) -> Self {
        Self {
            message,
            referenced_files: Vec::new(),
            conversation_id: Uuid::new_v4(),
        }
    }

    pub fn with_referenced_files(mut self, files: Vec<FileReference>) -> Self {
        self.referenced_files = files;
        self
    }

    pub fn with_conversation_id(mut self, id: Uuid) -> Self {
        self.conversation_id = id;
        self
    }
}

/// Parameters for a code-edit instruction request.
///
/// `selected_text` and `prompt` are concatenated verbatim into the request;
/// the caller is responsible for any sanitization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditCodeParameters {
    /// The source text the user selected.
    pub selected_text: String,
    /// The edit instruction.
    pub prompt: String,
}

impl EditCodeParameters {
    pub fn new(selected_text: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            selected_text: selected_text.into(),
            prompt: prompt.into(),
        }
    }
}

/// Parameters for a commit-message generation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitMessageParameters {
    /// Raw diff text, passed through as the user prompt.
    pub git_diff: String,
    /// Caller-supplied system prompt, passed through verbatim.
    pub system_prompt: String,
}

impl CommitMessageParameters {
    pub fn new(git_diff: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            git_diff: git_diff.into(),
            system_prompt: system_prompt.into(),
        }
    }
}

/// Parameters for a short lookup-name generation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LookupParameters {
    pub prompt: String,
}

impl LookupParameters {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}
