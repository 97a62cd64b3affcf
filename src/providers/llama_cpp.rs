//! llama.cpp server builder.
//!
//! The server hosts one loaded model and accepts a raw text prompt, so the
//! system prompt, history, and user prompt are flattened into a single string
//! through the configured [`ChatTemplate`].

use serde::{Deserialize, Serialize};

use crate::builder::{RequestBuilder, validate_prompts};
use crate::config::LlamaCppSettings;
use crate::error::Result;
use crate::prompts::{PERSONA_SYSTEM_PROMPT, prompt_with_files_context};
use crate::types::{ChatParameters, CompletionRequest, Exchange};

/// Text chat template used to flatten a conversation into one prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChatTemplate {
    /// Llama-style `[INST]` markers with a `<<SYS>>` block.
    #[default]
    Llama,
    /// ChatML `<|im_start|>` / `<|im_end|>` markers.
    ChatMl,
    /// Alpaca `### Instruction` / `### Response` sections.
    Alpaca,
}

impl ChatTemplate {
    /// Render system prompt, prior exchanges, and the final user prompt into
    /// one text prompt, in template order.
    pub fn render(&self, system_prompt: &str, history: &[Exchange], user_prompt: &str) -> String {
        match self {
            Self::Llama => {
                let mut prompt = format!("<<SYS>>{system_prompt}<</SYS>>");
                for exchange in history {
                    prompt.push_str(&format!(
                        "\n[INST]{}[/INST]\n{}",
                        exchange.prompt, exchange.response
                    ));
                }
                prompt.push_str(&format!("\n[INST]{user_prompt}[/INST]"));
                prompt
            }
            Self::ChatMl => {
                let mut prompt = format!("<|im_start|>system\n{system_prompt}<|im_end|>");
                for exchange in history {
                    prompt.push_str(&format!(
                        "\n<|im_start|>user\n{}<|im_end|>\n<|im_start|>assistant\n{}<|im_end|>",
                        exchange.prompt, exchange.response
                    ));
                }
                prompt.push_str(&format!(
                    "\n<|im_start|>user\n{user_prompt}<|im_end|>\n<|im_start|>assistant\n"
                ));
                prompt
            }
            Self::Alpaca => {
                let mut prompt = system_prompt.to_string();
                for exchange in history {
                    prompt.push_str(&format!(
                        "\n\n### Instruction\n{}\n\n### Response\n{}",
                        exchange.prompt, exchange.response
                    ));
                }
                prompt.push_str(&format!("\n\n### Instruction\n{user_prompt}\n\n### Response\n"));
                prompt
            }
        }
    }
}

/// llama.cpp completion request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LlamaCompletionRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_predict: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Clone)]
pub struct LlamaCppRequestBuilder {
    settings: LlamaCppSettings,
}

impl LlamaCppRequestBuilder {
    pub fn new(settings: LlamaCppSettings) -> Self {
        Self { settings }
    }

    fn request(
        &self,
        prompt: String,
        n_predict: Option<u32>,
        stream: bool,
    ) -> Result<CompletionRequest> {
        let caps = self.capabilities();
        Ok(CompletionRequest::LlamaCpp(LlamaCompletionRequest {
            prompt,
            n_predict: n_predict.map(|n| caps.apply_max_tokens(n)),
            stream: caps.apply_stream(stream),
        }))
    }
}

impl RequestBuilder for LlamaCppRequestBuilder {
    fn basic_completion_request(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        stream: bool,
    ) -> Result<CompletionRequest> {
        validate_prompts(system_prompt, user_prompt)?;
        let prompt = self
            .settings
            .chat_template
            .render(system_prompt, &[], user_prompt);
        self.request(prompt, Some(max_tokens), stream)
    }

    fn chat_request(&self, params: &ChatParameters) -> Result<CompletionRequest> {
        let user_prompt = prompt_with_files_context(params);
        let prompt = self.settings.chat_template.render(
            PERSONA_SYSTEM_PROMPT,
            &params.message.history,
            &user_prompt,
        );
        self.request(prompt, None, true)
    }
}
