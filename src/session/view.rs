use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle status of a session. Transitions move forward only in normal
/// operation and are asserted by the lifecycle operations, never set directly
/// by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No audio yet.
    Draft,
    /// Audio present.
    Uploaded,
    /// Summary artifact exists.
    Summarized,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Uploaded => write!(f, "uploaded"),
            Self::Summarized => write!(f, "summarized"),
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "uploaded" => Ok(Self::Uploaded),
            "summarized" => Ok(Self::Summarized),
            other => Err(format!("unknown session status: {other}")),
        }
    }
}

/// A session as returned to callers: the stored row composed with the parsed
/// summary artifact when one is present and readable on disk.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub case_id: Option<String>,
    pub created_at: String,
    pub audio_path: String,
    pub summary_path: Option<String>,
    pub file_size: i64,
    pub duration: Option<f64>,
    pub status: SessionStatus,
    pub transcript: Option<String>,
    pub summary: Option<Value>,
}

/// The raw database row, mapped field by field.
#[derive(Debug, Clone)]
pub(super) struct SessionRow {
    pub session_id: String,
    pub case_id: Option<String>,
    pub created_at: String,
    pub audio_path: String,
    pub summary_path: Option<String>,
    pub file_size: i64,
    pub duration: Option<f64>,
    pub status: SessionStatus,
    pub transcript: Option<String>,
}
