// Generative-text call shapes: role inference, confidence scoring, question
// generation and answer coaching. Every call goes through `llm_client::TextGenerator`.

pub mod coaching;
pub mod confidence;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod role;
