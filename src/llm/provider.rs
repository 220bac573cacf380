use async_trait::async_trait;

/// Result of a single completion call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Raw model output.
    pub text: String,

    /// Model the completion ran against.
    pub model: String,

    /// Prompt ID the caller rendered the prompt from.
    pub prompt_id: String,

    /// Wall-clock duration of the call in milliseconds.
    pub duration_ms: f64,
}

/// A completion capability.
///
/// `complete` never fails from the caller's perspective: implementations are
/// expected to absorb transport errors and degrade to usable output (see
/// `OllamaProvider`). Test doubles are injected at service construction time
/// instead of patching any ambient global.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(&self, prompt: &str, model: &str, prompt_id: &str) -> LlmResponse;

    /// Whether the inference backend is reachable. Used by the health probe
    /// only; non-networked implementations are always "available".
    async fn is_available(&self) -> bool {
        true
    }
}
