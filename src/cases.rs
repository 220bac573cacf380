//! Case records: year-scoped sequential identifiers grouping sessions.

use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::db::Database;
use crate::error::{AppError, Result};

/// A stored case row.
#[derive(Debug, Clone, Serialize)]
pub struct CaseRecord {
    pub case_id: String,
    pub alias: String,
    pub created_at: String,
}

/// Case with a computed session count, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct CaseSummary {
    pub case_id: String,
    pub alias: String,
    pub created_at: String,
    pub session_count: i64,
}

#[derive(Debug, Clone)]
pub struct CaseService {
    db: Database,
}

impl CaseService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a case with the next sequential identifier for the current
    /// year: `CASE-<year>-<4-digit-seq>`, seq = count of existing cases with
    /// that year prefix plus one. Count and insert run under one connection
    /// lock, so concurrent in-process creations cannot allocate duplicates;
    /// the cross-process race window of the count+1 scheme remains.
    pub fn create(&self, alias: &str) -> Result<CaseRecord> {
        let year = Utc::now().year();
        let now = Utc::now().to_rfc3339();

        self.db.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM cases WHERE case_id LIKE ?1",
                [format!("CASE-{year}-%")],
                |row| row.get(0),
            )?;
            let case_id = format!("CASE-{year}-{:04}", count + 1);

            conn.execute(
                "INSERT INTO cases (case_id, alias, created_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![case_id, alias, now],
            )?;

            Ok(CaseRecord {
                case_id,
                alias: alias.to_string(),
                created_at: now.clone(),
            })
        })
    }

    /// Fetch one case by ID.
    pub fn get(&self, case_id: &str) -> Result<CaseRecord> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT case_id, alias, created_at FROM cases WHERE case_id = ?1",
                [case_id],
                |row| {
                    Ok(CaseRecord {
                        case_id: row.get(0)?,
                        alias: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    AppError::NotFound(format!("Case not found: {case_id}"))
                }
                other => other.into(),
            })
        })
    }

    /// All cases, most recent first, with computed session counts.
    pub fn list(&self) -> Result<Vec<CaseSummary>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.case_id, c.alias, c.created_at, COUNT(s.session_id)
                 FROM cases c
                 LEFT JOIN sessions s ON s.case_id = c.case_id
                 GROUP BY c.case_id
                 ORDER BY c.created_at DESC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(CaseSummary {
                        case_id: row.get(0)?,
                        alias: row.get(1)?,
                        created_at: row.get(2)?,
                        session_count: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<_, _>>()?;
            Ok(rows)
        })
    }
}
