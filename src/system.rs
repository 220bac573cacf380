//! Process-wide system configuration, persisted as a flat key-value record.
//!
//! Lazily initialized with documented defaults, read and written as a whole,
//! last write wins. No versioning.

use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::Result;

pub const DEFAULT_PROVIDER: &str = "ollama";
pub const DEFAULT_MODEL: &str = "llama3.2:3b";
pub const DEFAULT_WHISPER_MODEL: &str = "base";

/// The flat system config record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSettings {
    pub provider: String,
    pub model: String,
    pub debug: bool,
    pub whisper_model: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPatch {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub debug: Option<bool>,
    pub whisper_model: Option<String>,
}

/// A selectable LLM provider and its models.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub models: &'static [&'static str],
}

/// Static provider catalog.
pub fn providers() -> Vec<ProviderInfo> {
    vec![ProviderInfo {
        id: "ollama",
        name: "Ollama",
        models: &["llama3.2", "llama3.1", "mistral", "codellama"],
    }]
}

/// Static speech-model catalog.
pub fn whisper_models() -> &'static [&'static str] {
    &["tiny", "base", "small", "medium", "large"]
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    db: Database,
}

impl SettingsStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn get(&self) -> Result<SystemSettings> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT key, value FROM config")?;
            let rows: Vec<(String, String)> = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<std::result::Result<_, _>>()?;

            let lookup = |key: &str| -> Option<&str> {
                rows.iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.as_str())
            };

            Ok(SystemSettings {
                provider: lookup("provider").unwrap_or(DEFAULT_PROVIDER).to_string(),
                model: lookup("model").unwrap_or(DEFAULT_MODEL).to_string(),
                debug: lookup("debug").unwrap_or("false") == "true",
                whisper_model: lookup("whisper_model")
                    .unwrap_or(DEFAULT_WHISPER_MODEL)
                    .to_string(),
            })
        })
    }

    pub fn patch(&self, patch: SettingsPatch) -> Result<SystemSettings> {
        self.db.with_conn(|conn| {
            let set = |key: &str, value: &str| -> Result<()> {
                conn.execute(
                    "INSERT OR REPLACE INTO config (key, value) VALUES (?1, ?2)",
                    rusqlite::params![key, value],
                )?;
                Ok(())
            };

            if let Some(provider) = &patch.provider {
                set("provider", provider)?;
            }
            if let Some(model) = &patch.model {
                set("model", model)?;
            }
            if let Some(debug) = patch.debug {
                set("debug", if debug { "true" } else { "false" })?;
            }
            if let Some(whisper_model) = &patch.whisper_model {
                set("whisper_model", whisper_model)?;
            }
            Ok(())
        })?;
        self.get()
    }
}
