use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Root of the case/session file tree.
    pub data_root: String,
    /// SQLite metadata index.
    pub db_path: String,
    /// Directory holding the prompt template files.
    pub prompts_root: String,
}

#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the local inference endpoint.
    pub base_url: String,
}

impl Config {
    /// Load from a config file, with `CASEFLOW_*` environment overrides
    /// (e.g. `CASEFLOW_STORAGE__DATA_ROOT`).
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("CASEFLOW").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
