//! Fixed system prompts and prompt-composition helpers.
//!
//! Everything here is a pure function over its inputs. Provider builders call
//! [`prompt_with_files_context`] to fold referenced files into a chat prompt;
//! the intent defaults in [`crate::builder`] use the prompt constants.

use crate::types::{ChatParameters, FileReference};

/// Default persona used for chat requests when the caller has not configured
/// their own.
pub const PERSONA_SYSTEM_PROMPT: &str = "You are an expert software developer working inside \
the user's code editor. Provide clear, accurate and concise answers. When you answer with \
code, use markdown code blocks with the correct language tag.";

/// System prompt for code-edit instruction requests.
pub const EDIT_CODE_SYSTEM_PROMPT: &str = "You are an AI code editor. The user provides a \
piece of code and an instruction describing how to change it. Apply the instruction and \
respond with the full modified code only, without explanations, comments about the change, \
or markdown fences.";

/// System prompt for short lookup-name generation requests.
pub const LOOKUP_SYSTEM_PROMPT: &str = "You are an assistant that generates short, \
descriptive lookup names. Given the following text, respond with a single concise name in \
the dominant naming convention of the text, and nothing else.";

/// Render the final chat prompt for a turn.
///
/// With no referenced files the literal prompt passes through unchanged;
/// otherwise the files are folded in via [`prompt_with_context`].
pub fn prompt_with_files_context(params: &ChatParameters) -> String {
    if params.referenced_files.is_empty() {
        params.message.prompt.clone()
    } else {
        prompt_with_context(&params.referenced_files, &params.message.prompt)
    }
}

/// Fold referenced-file contents into a prompt.
///
/// Files render in list order, each as a path header plus fenced contents,
/// and the literal prompt comes last. Contents are embedded verbatim.
pub fn prompt_with_context(files: &[FileReference], prompt: &str) -> String {
    let mut context = String::new();
    for file in files {
        context.push_str(&format!(
            "File Path: {}\nFile Content:\n```\n{}\n```\n\n",
            file.path, file.content
        ));
    }
    format!(
        "Use the following context to answer the question at the end:\n\n{context}Question: {prompt}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConversationMessage;

    #[test]
    fn empty_file_list_passes_prompt_through() {
        let params = ChatParameters::new(ConversationMessage::new("what does this do?"));
        assert_eq!(prompt_with_files_context(&params), "what does this do?");
    }

    #[test]
    fn file_contents_appear_before_the_literal_prompt() {
        let params = ChatParameters::new(ConversationMessage::new("explain"))
            .with_referenced_files(vec![FileReference::new("src/a.rs", "fn a() {}")]);
        let prompt = prompt_with_files_context(&params);
        let content_at = prompt.find("fn a() {}").unwrap();
        let prompt_at = prompt.find("explain").unwrap();
        assert!(content_at < prompt_at);
        assert!(prompt.contains("File Path: src/a.rs"));
    }

    #[test]
    fn files_render_in_list_order() {
        let files = vec![
            FileReference::new("one.rs", "first"),
            FileReference::new("two.rs", "second"),
        ];
        let prompt = prompt_with_context(&files, "q");
        assert!(prompt.find("first").unwrap() < prompt.find("second").unwrap());
    }
}
