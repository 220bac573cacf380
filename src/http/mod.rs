//! HTTP API server.
//!
//! This module provides the REST surface over the session/case services:
//! - POST /api/sessions - Create a session (optionally under a case)
//! - GET  /api/sessions - List sessions (optional case filter)
//! - GET  /api/sessions/:id - Fetch one session
//! - POST /api/sessions/:id/audio - Attach audio (multipart)
//! - PUT  /api/sessions/:id/transcript - Store a transcript
//! - POST /api/sessions/:id/summarize - Run the summarize pipeline
//! - POST /api/sessions/:id/unlink - Detach from its case
//! - GET/POST /api/cases, GET /api/cases/:id - Case queries and creation
//! - POST /api/cases/:id/sessions/:sid - Link a session to a case
//! - GET/PATCH /api/system/config - System configuration
//! - GET  /api/system/providers, /api/system/whisper-models - Catalogs
//! - GET  /health - Liveness plus inference backend reachability

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
