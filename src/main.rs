use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use caseflow::{AppState, Config, Database, OllamaProvider, PromptStore, StorageLayout};

#[derive(Debug, Parser)]
#[command(name = "caseflow", about = "Record-keeping API for audio sessions")]
struct Cli {
    /// Config file (without extension)
    #[arg(long, default_value = "config/caseflow")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let db = Database::open(Path::new(&cfg.storage.db_path))?;
    let layout = StorageLayout::new(&cfg.storage.data_root);
    layout.ensure_root()?;
    let prompts = PromptStore::new(&cfg.storage.prompts_root);
    let llm = Arc::new(OllamaProvider::new(&cfg.llm.base_url));

    let state = AppState::new(db, layout, prompts, llm);
    let app = caseflow::create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
