/// SQL DDL for the caseflow metadata database.
/// WAL mode + foreign keys enabled at connection time.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS config (
    key TEXT PRIMARY KEY,
    value TEXT
);

CREATE TABLE IF NOT EXISTS cases (
    case_id TEXT PRIMARY KEY,
    alias TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    session_id TEXT PRIMARY KEY,
    case_id TEXT REFERENCES cases(case_id),
    created_at TEXT NOT NULL,
    audio_path TEXT NOT NULL DEFAULT '',
    summary_path TEXT,
    file_size INTEGER NOT NULL DEFAULT 0,
    duration REAL,
    status TEXT NOT NULL DEFAULT 'draft',
    transcript TEXT
);

CREATE INDEX IF NOT EXISTS idx_sessions_case ON sessions(case_id);

INSERT OR IGNORE INTO config (key, value) VALUES
    ('provider', 'ollama'),
    ('model', 'llama3.2:3b'),
    ('debug', 'false'),
    ('whisper_model', 'base');
"#;

pub const PRAGMAS: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
PRAGMA busy_timeout = 5000;
"#;
