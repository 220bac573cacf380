//! LLM completion capability.
//!
//! The pipeline depends on the `LlmProvider` trait only; the networked
//! Ollama implementation degrades to deterministic mock payloads whenever the
//! inference backend is unreachable, so the service stays fully functional
//! with zero external dependencies.

mod ollama;
mod provider;

pub use ollama::OllamaProvider;
pub use provider::{LlmProvider, LlmResponse};
