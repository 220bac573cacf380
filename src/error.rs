use std::path::PathBuf;

/// Error taxonomy for the whole service.
///
/// `NotFound` maps to HTTP 404, `Validation` to 400; everything else is a
/// server-side failure (500). LLM transport errors never appear here at all,
/// the provider absorbs them (see `llm::OllamaProvider`).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("unknown prompt ID: {0}")]
    UnknownPrompt(String),

    #[error("prompt template not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("database error: {0}")]
    Database(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}
