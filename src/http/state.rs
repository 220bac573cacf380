use std::sync::Arc;

use crate::cases::CaseService;
use crate::db::Database;
use crate::llm::LlmProvider;
use crate::prompts::PromptStore;
use crate::session::SessionService;
use crate::storage::StorageLayout;
use crate::system::SettingsStore;

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionService>,
    pub cases: Arc<CaseService>,
    pub settings: Arc<SettingsStore>,
    pub llm: Arc<dyn LlmProvider>,
}

impl AppState {
    pub fn new(
        db: Database,
        layout: StorageLayout,
        prompts: PromptStore,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionService::new(
                db.clone(),
                layout,
                prompts,
                llm.clone(),
            )),
            cases: Arc::new(CaseService::new(db.clone())),
            settings: Arc::new(SettingsStore::new(db)),
            llm,
        }
    }
}
