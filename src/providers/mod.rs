//! Concrete request builders, one module per backend.

pub mod anthropic;
pub mod azure;
pub mod custom_openai;
pub mod google;
pub mod llama_cpp;
pub mod local_openai;
pub mod ollama;
pub mod openai;
pub mod platform;
