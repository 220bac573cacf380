#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;

use caseflow::{AppState, Database, LlmProvider, LlmResponse, PromptStore, StorageLayout};

/// Provider that replays pre-programmed response texts in sequence and counts
/// calls, for deterministic pipeline tests without a running backend.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(&self, _prompt: &str, model: &str, prompt_id: &str) -> LlmResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        LlmResponse {
            text,
            model: model.to_string(),
            prompt_id: prompt_id.to_string(),
            duration_ms: 1.0,
        }
    }
}

/// Fresh application state over a temp data root, an in-memory database, the
/// crate's real prompt templates and a scripted provider.
pub fn test_state(responses: &[&str]) -> (TempDir, AppState, Arc<ScriptedProvider>) {
    let tmp = tempfile::tempdir().unwrap();
    let db = Database::in_memory().unwrap();
    let layout = StorageLayout::new(tmp.path());
    let prompts = PromptStore::new(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts"));
    let provider = Arc::new(ScriptedProvider::new(responses));
    let state = AppState::new(db, layout, prompts, provider.clone());
    (tmp, state, provider)
}

/// A well-formed summary artifact as the model should emit it.
pub fn valid_artifact_text() -> String {
    json!({
        "title": "T",
        "participants": [],
        "key_points": [],
        "action_items": [],
        "summary": "S"
    })
    .to_string()
}
