//! Commit message generation through an OpenAI-compatible chat completion API.

pub mod generator;
pub mod prompt;
pub mod types;

pub use generator::{ChatCompletionGenerator, MessageGenerator};
pub use prompt::{SYSTEM_INSTRUCTION, build_messages, build_user_prompt};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role};

#[cfg(test)]
pub use generator::MockMessageGenerator;
