//! Parameter and request value types.

mod params;
mod request;

pub use params::{
    ChatParameters, CommitMessageParameters, ConversationMessage, EditCodeParameters, Exchange,
    FileReference, LookupParameters,
};
pub use request::CompletionRequest;
