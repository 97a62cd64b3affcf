//! Chat-request construction: context folding and history shaping.

use promptwire::prelude::*;
use promptwire::providers::openai::OpenAiRequestBuilder;

fn builder() -> OpenAiRequestBuilder {
    OpenAiRequestBuilder::new(OpenAiSettings::default().with_model("gpt-4o"))
}

#[test]
fn no_referenced_files_passes_the_literal_prompt_through() {
    let params = ChatParameters::new(ConversationMessage::new("what is a trait object?"))
        .with_referenced_files(vec![]);
    let request = builder().chat_request(&params).unwrap();
    assert_eq!(request.user_prompt(), Some("what is a trait object?"));
}

#[test]
fn referenced_file_contents_come_before_the_literal_prompt() {
    let params = ChatParameters::new(ConversationMessage::new("explain this"))
        .with_referenced_files(vec![FileReference::new(
            "src/lib.rs",
            "pub fn answer() -> u32 { 42 }",
        )]);
    let request = builder().chat_request(&params).unwrap();

    let prompt = request.user_prompt().unwrap();
    let content_at = prompt.find("pub fn answer() -> u32 { 42 }").unwrap();
    let literal_at = prompt.find("explain this").unwrap();
    assert!(content_at < literal_at);
    assert!(prompt.contains("src/lib.rs"));
}

#[test]
fn history_is_interleaved_between_system_and_final_prompt() {
    let message = ConversationMessage::new("and now?")
        .with_history(vec![Exchange::new("first question", "first answer")]);
    let request = builder()
        .chat_request(&ChatParameters::new(message))
        .unwrap();

    let CompletionRequest::OpenAi(body) = request else {
        panic!("expected OpenAI-shaped request");
    };
    let roles: Vec<&str> = body.messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, ["system", "user", "assistant", "user"]);
    assert_eq!(body.messages[1].content, "first question");
    assert_eq!(body.messages[2].content, "first answer");
    assert_eq!(body.messages[3].content, "and now?");
    assert!(body.stream);
}

#[test]
fn chat_requests_leave_the_token_budget_to_the_backend() {
    let request = builder()
        .chat_request(&ChatParameters::new(ConversationMessage::new("hi")))
        .unwrap();
    assert_eq!(request.max_output_tokens(), None);
}
