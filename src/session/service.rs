use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::llm::LlmProvider;
use crate::prompts::{PromptStore, FIX_JSON_PROMPT, SUMMARY_PROMPT};
use crate::storage::{StorageLayout, SUMMARY_FILENAME, UNLINKED_BUCKET};
use crate::summary::validate_summary;
use crate::system::SettingsStore;

use super::view::{SessionRow, SessionStatus, SessionView};

/// Owns session state transitions and the summarize pipeline.
///
/// The LLM capability is an explicit constructor dependency so tests inject
/// scripted providers instead of patching ambient state.
pub struct SessionService {
    db: Database,
    layout: StorageLayout,
    prompts: PromptStore,
    settings: SettingsStore,
    llm: Arc<dyn LlmProvider>,
}

impl SessionService {
    pub fn new(
        db: Database,
        layout: StorageLayout,
        prompts: PromptStore,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        let settings = SettingsStore::new(db.clone());
        Self {
            db,
            layout,
            prompts,
            settings,
            llm,
        }
    }

    /// Create a new draft session, optionally under a case. The reserved
    /// `_unlinked` sentinel and the empty string both mean "no case".
    pub fn create(&self, case_id: Option<&str>) -> Result<SessionView> {
        let case_id = case_id.filter(|c| !c.is_empty() && *c != UNLINKED_BUCKET);
        if let Some(case) = case_id {
            // Fail early instead of tripping the foreign key on insert.
            self.require_case(case)?;
        }

        let session_id = format!("SESSION-{}", uuid::Uuid::new_v4().simple());
        let now = Utc::now().to_rfc3339();

        self.layout.create_session_dir(case_id, &session_id)?;
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO sessions (session_id, case_id, created_at, audio_path, status)
                 VALUES (?1, ?2, ?3, '', 'draft')",
                rusqlite::params![session_id, case_id, now],
            )?;
            Ok(())
        })?;

        info!(session_id, case_id, "session created");
        self.get(&session_id)
    }

    /// Fetch one session view.
    pub fn get(&self, session_id: &str) -> Result<SessionView> {
        let row = self.load_row(session_id)?;
        Ok(self.row_to_view(row))
    }

    /// List sessions, optionally filtered by case, most recent first.
    pub fn list(&self, case_id: Option<&str>) -> Result<Vec<SessionView>> {
        let rows: Vec<SessionRow> = self.db.with_conn(|conn| {
            let sql_all = "SELECT session_id, case_id, created_at, audio_path, summary_path,
                                  file_size, duration, status, transcript
                           FROM sessions ORDER BY created_at DESC";
            let sql_case = "SELECT session_id, case_id, created_at, audio_path, summary_path,
                                   file_size, duration, status, transcript
                            FROM sessions WHERE case_id = ?1 ORDER BY created_at DESC";

            let mut stmt = conn.prepare(if case_id.is_some() { sql_case } else { sql_all })?;
            let rows = match case_id {
                Some(case) => stmt.query_map([case], Self::map_row)?,
                None => stmt.query_map([], Self::map_row)?,
            };
            Ok(rows.collect::<std::result::Result<_, _>>()?)
        })?;

        Ok(rows.into_iter().map(|r| self.row_to_view(r)).collect())
    }

    /// Store audio bytes in the session directory and mark the session
    /// `uploaded`. Re-uploading is allowed at any status and is idempotent
    /// with respect to the status.
    pub fn attach_audio(&self, session_id: &str, extension: &str, bytes: &[u8]) -> Result<SessionView> {
        let row = self.load_row(session_id)?;
        let dir = self
            .layout
            .create_session_dir(row.case_id.as_deref(), session_id)?;

        let filename = if extension.is_empty() {
            "audio".to_string()
        } else {
            format!("audio.{extension}")
        };
        let dest = dir.join(&filename);
        std::fs::write(&dest, bytes)?;
        let rel = self.layout.relative(&dest)?;

        self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE sessions SET audio_path = ?1, file_size = ?2, status = 'uploaded'
                 WHERE session_id = ?3",
                rusqlite::params![rel, bytes.len() as i64, session_id],
            )?;
            Ok(())
        })?;

        info!(session_id, file_size = bytes.len(), "audio attached");
        self.get(session_id)
    }

    /// Store the transcript verbatim. Never changes the status.
    pub fn set_transcript(&self, session_id: &str, transcript: &str) -> Result<SessionView> {
        self.load_row(session_id)?;
        self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE sessions SET transcript = ?1 WHERE session_id = ?2",
                rusqlite::params![transcript, session_id],
            )?;
            Ok(())
        })?;
        self.get(session_id)
    }

    /// The summarize pipeline: transcript -> prompt -> completion -> parse ->
    /// validate, with exactly one repair retry. On success the artifact is
    /// written to the session directory and the status becomes `summarized`;
    /// on failure nothing is persisted and the stored row is untouched.
    pub async fn summarize(&self, session_id: &str) -> Result<SessionView> {
        let row = self.load_row(session_id)?;
        let transcript = row.transcript.as_deref().unwrap_or("");
        if transcript.trim().is_empty() {
            return Err(AppError::Validation(
                "No transcript to summarize".to_string(),
            ));
        }

        let settings = self.settings.get()?;
        let model = settings.model.as_str();

        let prompt = self
            .prompts
            .render(SUMMARY_PROMPT, &[("transcript", transcript)])?;
        let resp = self.llm.complete(&prompt, model, SUMMARY_PROMPT).await;
        self.log_completion(settings.debug, &resp.prompt_id, model, resp.duration_ms, resp.text.len());

        // Parse failure and schema failure take the same repair path.
        let artifact = match Self::parse_and_validate(&resp.text) {
            Ok(value) => value,
            Err(err) => {
                warn!(session_id, error = %err, "summary invalid, attempting repair");

                let fix_prompt = self
                    .prompts
                    .render(FIX_JSON_PROMPT, &[("invalid_json", &resp.text)])?;
                let resp2 = self.llm.complete(&fix_prompt, model, FIX_JSON_PROMPT).await;
                self.log_completion(settings.debug, &resp2.prompt_id, model, resp2.duration_ms, resp2.text.len());

                let value = serde_json::from_str::<Value>(&resp2.text).map_err(|_| {
                    AppError::Validation(format!(
                        "Summary validation failed: {err}. Repair failed."
                    ))
                })?;
                validate_summary(&value).map_err(|e| {
                    AppError::Validation(format!("Summary validation failed after repair: {e}"))
                })?;
                value
            }
        };

        let dir = self
            .layout
            .create_session_dir(row.case_id.as_deref(), session_id)?;
        let summary_path = dir.join(SUMMARY_FILENAME);
        std::fs::write(&summary_path, serde_json::to_string_pretty(&artifact)?)?;
        let rel = self.layout.relative(&summary_path)?;

        self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE sessions SET summary_path = ?1, status = 'summarized'
                 WHERE session_id = ?2",
                rusqlite::params![rel, session_id],
            )?;
            Ok(())
        })?;

        info!(session_id, "session summarized");
        self.get(session_id)
    }

    /// Link a session to a case: relocate its directory into the case bucket,
    /// then update the row. The row is only updated after the move succeeded;
    /// if the row update fails, the move is undone best-effort so database
    /// and filesystem do not diverge observably.
    pub fn link(&self, session_id: &str, case_id: &str) -> Result<()> {
        let row = self.load_row(session_id)?;
        self.require_case(case_id)?;

        if row.case_id.as_deref() == Some(case_id) {
            return Ok(());
        }

        self.layout
            .move_session(session_id, row.case_id.as_deref(), Some(case_id))?;

        let updated = self.update_location(&row, Some(case_id));
        if let Err(e) = updated {
            let _ = self
                .layout
                .move_session(session_id, Some(case_id), row.case_id.as_deref());
            return Err(e);
        }

        info!(session_id, case_id, "session linked");
        Ok(())
    }

    /// Detach a session from its case, relocating its directory into the
    /// unlinked bucket. Unlinking an already-unlinked session is a no-op.
    pub fn unlink(&self, session_id: &str) -> Result<()> {
        let row = self.load_row(session_id)?;
        let Some(from_case) = row.case_id.as_deref() else {
            return Ok(());
        };

        self.layout.move_session(session_id, Some(from_case), None)?;

        let updated = self.update_location(&row, None);
        if let Err(e) = updated {
            let _ = self.layout.move_session(session_id, None, Some(from_case));
            return Err(e);
        }

        info!(session_id, "session unlinked");
        Ok(())
    }

    /// Rewrite the case reference and the stored relative paths after a
    /// directory move, so the row never points into a bucket the files have
    /// left.
    fn update_location(&self, row: &SessionRow, case_id: Option<&str>) -> Result<()> {
        let rebase = |rel: &str| -> String {
            match std::path::Path::new(rel).file_name().and_then(|n| n.to_str()) {
                Some(file) => self
                    .layout
                    .relative(&self.layout.session_dir(case_id, &row.session_id).join(file))
                    .unwrap_or_else(|_| rel.to_string()),
                None => rel.to_string(),
            }
        };

        let audio_path = if row.audio_path.is_empty() {
            String::new()
        } else {
            rebase(&row.audio_path)
        };
        let summary_path = row.summary_path.as_deref().map(rebase);

        self.db.with_conn(|conn| {
            conn.execute(
                "UPDATE sessions SET case_id = ?1, audio_path = ?2, summary_path = ?3
                 WHERE session_id = ?4",
                rusqlite::params![case_id, audio_path, summary_path, row.session_id],
            )?;
            Ok(())
        })
    }

    /// Parse raw model output and check it against the artifact schema.
    /// Returns the error text that feeds the repair prompt diagnostics.
    fn parse_and_validate(text: &str) -> std::result::Result<Value, String> {
        let value =
            serde_json::from_str::<Value>(text).map_err(|_| "Invalid JSON".to_string())?;
        validate_summary(&value)?;
        Ok(value)
    }

    fn log_completion(&self, debug: bool, prompt_id: &str, model: &str, duration_ms: f64, output_len: usize) {
        if debug {
            info!(prompt_id, model, duration_ms, output_len, "llm completion");
        }
    }

    fn require_case(&self, case_id: &str) -> Result<()> {
        let exists: bool = self.db.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM cases WHERE case_id = ?1",
                [case_id],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })?;
        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Case not found: {case_id}")))
        }
    }

    fn load_row(&self, session_id: &str) -> Result<SessionRow> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT session_id, case_id, created_at, audio_path, summary_path,
                        file_size, duration, status, transcript
                 FROM sessions WHERE session_id = ?1",
                [session_id],
                Self::map_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    AppError::NotFound(format!("Session not found: {session_id}"))
                }
                other => other.into(),
            })
        })
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SessionRow> {
        let status: String = row.get(7)?;
        Ok(SessionRow {
            session_id: row.get(0)?,
            case_id: row.get(1)?,
            created_at: row.get(2)?,
            audio_path: row.get(3)?,
            summary_path: row.get(4)?,
            file_size: row.get(5)?,
            duration: row.get(6)?,
            status: SessionStatus::from_str(&status).unwrap_or(SessionStatus::Draft),
            transcript: row.get(8)?,
        })
    }

    /// Compose a row with the on-disk summary artifact. A recorded summary
    /// path whose file is missing, unreadable or corrupt simply yields no
    /// summary in the view; reads never fail on it.
    fn row_to_view(&self, row: SessionRow) -> SessionView {
        let summary = row.summary_path.as_deref().and_then(|rel| {
            let path = self.layout.absolute(rel);
            let text = std::fs::read_to_string(path).ok()?;
            serde_json::from_str::<Value>(&text).ok()
        });

        SessionView {
            session_id: row.session_id,
            case_id: row.case_id,
            created_at: row.created_at,
            audio_path: row.audio_path,
            summary_path: row.summary_path,
            file_size: row.file_size,
            duration: row.duration,
            status: row.status,
            transcript: row.transcript,
            summary,
        }
    }
}
