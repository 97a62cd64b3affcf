//! Serialized payload shapes, field by field, per backend.

use std::sync::Arc;

use promptwire::prelude::*;
use promptwire::providers::llama_cpp::ChatTemplate;
use serde_json::json;

fn factory() -> RequestFactory {
    let settings = ServiceSettings {
        platform: Some(PlatformSettings::default().with_model("gpt-4o")),
        openai: Some(OpenAiSettings::default().with_model("gpt-4o")),
        custom_openai: Some(
            CustomOpenAiSettings::default()
                .with_url("https://gateway.example.com/v1/chat/completions")
                .with_header("Authorization", "Bearer $API_KEY")
                .with_body_field("model", json!("mixtral")),
        ),
        azure: Some(
            AzureSettings::default()
                .with_resource_name("prod-openai")
                .with_deployment_id("gpt-4o-deploy")
                .with_api_version("2024-02-01")
                .with_api_key_auth(true),
        ),
        anthropic: Some(AnthropicSettings::default().with_model("claude-3-5-sonnet-latest")),
        google: Some(GoogleSettings::default().with_model("gemini-2.0-flash")),
        ollama: Some(OllamaSettings::default().with_model("llama3.1")),
        local_openai: Some(LocalOpenAiSettings::default().with_model("codellama")),
        llama_cpp: Some(LlamaCppSettings::default().with_chat_template(ChatTemplate::ChatMl)),
    };
    let credentials =
        StaticCredentialStore::new().with_credential(CredentialKey::CustomServiceApiKey, "sk-custom");
    RequestFactory::new(settings, Arc::new(credentials))
}

fn lookup(kind: ServiceKind) -> CompletionRequest {
    factory()
        .resolve(kind)
        .unwrap()
        .lookup_request(&LookupParameters::new("reverse a string"))
        .unwrap()
}

#[test]
fn openai_body_carries_model_and_messages() {
    let CompletionRequest::OpenAi(body) = lookup(ServiceKind::OpenAi) else {
        panic!("expected OpenAI-shaped request");
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["model"], "gpt-4o");
    assert_eq!(json["messages"][1]["content"], "reverse a string");
    assert_eq!(json["stream"], false);
    assert_eq!(json["max_tokens"], 512);
}

#[test]
fn azure_body_has_no_model_field() {
    let CompletionRequest::OpenAi(body) = lookup(ServiceKind::Azure) else {
        panic!("expected OpenAI-shaped request");
    };
    let json = serde_json::to_value(&body).unwrap();
    assert!(json.get("model").is_none());
    assert_eq!(json["max_tokens"], 512);
}

#[test]
fn anthropic_body_keeps_system_as_a_top_level_field() {
    let CompletionRequest::Anthropic(body) = lookup(ServiceKind::Anthropic) else {
        panic!("expected Anthropic-shaped request");
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["model"], "claude-3-5-sonnet-latest");
    assert!(json["system"].as_str().unwrap().contains("lookup names"));
    assert_eq!(json["messages"].as_array().unwrap().len(), 1);
    assert_eq!(json["max_tokens"], 512);
}

#[test]
fn google_body_uses_camel_case_generation_config() {
    let CompletionRequest::Google(body) = lookup(ServiceKind::Google) else {
        panic!("expected Google-shaped request");
    };
    assert_eq!(body.model, "gemini-2.0-flash");
    let json = serde_json::to_value(&body).unwrap();
    assert!(json.get("model").is_none());
    assert!(json.get("stream").is_none());
    assert_eq!(json["generationConfig"]["maxOutputTokens"], 512);
    let contents = json["contents"].as_array().unwrap();
    assert_eq!(contents[0]["role"], "user");
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(
        contents.last().unwrap()["parts"][0]["text"],
        "reverse a string"
    );
}

#[test]
fn custom_request_is_fully_addressed() {
    let CompletionRequest::CustomOpenAi(req) = lookup(ServiceKind::CustomOpenAi) else {
        panic!("expected custom request");
    };
    assert_eq!(req.url, "https://gateway.example.com/v1/chat/completions");
    assert_eq!(req.headers["Authorization"], "Bearer sk-custom");
    assert_eq!(req.body["model"], json!("mixtral"));
    assert_eq!(req.body["max_tokens"], json!(512));
    assert_eq!(req.body["stream"], json!(false));
}

#[test]
fn llama_cpp_request_flattens_the_conversation() {
    let CompletionRequest::LlamaCpp(body) = lookup(ServiceKind::LlamaCpp) else {
        panic!("expected llama.cpp request");
    };
    assert!(body.prompt.starts_with("<|im_start|>system"));
    assert!(body.prompt.contains("reverse a string"));
    assert_eq!(body.n_predict, Some(512));
    assert!(!body.stream);
}

#[test]
fn local_hosts_reuse_the_openai_shape_with_their_own_model() {
    let CompletionRequest::OpenAi(ollama) = lookup(ServiceKind::Ollama) else {
        panic!("expected OpenAI-shaped request");
    };
    assert_eq!(ollama.model.as_deref(), Some("llama3.1"));

    let CompletionRequest::OpenAi(local) = lookup(ServiceKind::LocalOpenAi) else {
        panic!("expected OpenAI-shaped request");
    };
    assert_eq!(local.model.as_deref(), Some("codellama"));
}

#[test]
fn platform_chat_serializes_the_session_id() {
    let params = ChatParameters::new(ConversationMessage::new("hello"));
    let request = factory()
        .resolve(ServiceKind::Platform)
        .unwrap()
        .chat_request(&params)
        .unwrap();

    let CompletionRequest::Platform(body) = request else {
        panic!("expected platform request");
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["model"], "gpt-4o");
    assert_eq!(
        json["sessionId"],
        serde_json::to_value(params.conversation_id).unwrap()
    );
}
