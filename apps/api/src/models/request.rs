use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One processed application. Immutable once written; keyed for
/// deduplication by (user_id, request_hash).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequestRow {
    pub id: Uuid,
    pub user_id: Uuid,
    /// SHA-256 fingerprint of (resume, job description), lowercase hex.
    pub request_hash: String,
    /// Resume exactly as submitted (self-describing encoded blob).
    pub resume: String,
    pub job_description: String,
    /// Markdown with `<ins>`/`<del>` change highlights.
    pub optimized_resume: String,
    /// Clean, compilable LaTeX version.
    pub optimized_resume_latex: String,
    pub cover_letter: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Trimmed listing row for a user's request history.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RequestSummaryRow {
    pub id: Uuid,
    pub job_description: String,
    pub created_at: DateTime<Utc>,
}
