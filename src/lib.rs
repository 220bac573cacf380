pub mod cases;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod llm;
pub mod prompts;
pub mod session;
pub mod storage;
pub mod summary;
pub mod system;

pub use cases::{CaseRecord, CaseService, CaseSummary};
pub use config::Config;
pub use db::Database;
pub use error::{AppError, Result};
pub use http::{create_router, AppState};
pub use llm::{LlmProvider, LlmResponse, OllamaProvider};
pub use prompts::PromptStore;
pub use session::{SessionService, SessionStatus, SessionView};
pub use storage::StorageLayout;
pub use summary::validate_summary;
pub use system::{SettingsPatch, SettingsStore, SystemSettings};
