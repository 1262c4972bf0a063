//! Application orchestrator — fingerprints the submission, serves exact
//! duplicates from storage, and otherwise fans out to the prompt adapters
//! and persists the assembled result.
//!
//! Flow: fingerprint → cache lookup → (optimize ∥ skills) → cover letter →
//!       insert request → bump usage counter → return payload.
//!
//! Ordering choice: the cover-letter flow runs AFTER resume optimization and
//! receives the optimized text. A fully parallel variant (cover letter from
//! the original blob) trades letter quality for latency; we take the
//! sequential variant.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::request::RequestRow;
use crate::models::user::UserRow;
use crate::pipeline::fingerprint::fingerprint;
use crate::pipeline::flows::{AiFlows, PersonalInfo};

/// Raw inputs for one application, validated at the handler boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationInput {
    /// Self-describing encoded blob, e.g. a base64 data URI.
    pub resume: String,
    pub job_description: String,
}

/// Assembled result returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedApplication {
    /// Handle to the stored request record.
    pub request_id: Uuid,
    pub optimized_resume: String,
    pub optimized_resume_latex: String,
    pub cover_letter: String,
    pub skills: Vec<String>,
    /// True when the payload came from a previously stored request.
    pub cached: bool,
}

impl ProcessedApplication {
    fn from_row(row: RequestRow, cached: bool) -> Self {
        Self {
            request_id: row.id,
            optimized_resume: row.optimized_resume,
            optimized_resume_latex: row.optimized_resume_latex,
            cover_letter: row.cover_letter,
            skills: row.skills,
            cached,
        }
    }
}

/// Everything the adapters produced for one cache miss.
#[derive(Debug, Clone)]
pub struct GeneratedBundle {
    pub optimized_resume: String,
    pub optimized_resume_latex: String,
    pub cover_letter: String,
    pub skills: Vec<String>,
}

/// Persistence seam for processed requests. `PgPool` is the production
/// implementation; tests substitute an in-memory store.
#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn find_by_fingerprint(
        &self,
        user_id: Uuid,
        request_hash: &str,
    ) -> Result<Option<RequestRow>, AppError>;

    async fn insert_request(
        &self,
        user_id: Uuid,
        request_hash: &str,
        input: &ApplicationInput,
        bundle: &GeneratedBundle,
    ) -> Result<ProcessedApplication, AppError>;

    async fn increment_request_count(&self, user_id: Uuid) -> Result<(), AppError>;
}

/// Processes one application end to end.
///
/// A stored request for this user and fingerprint short-circuits the whole
/// generation step: no adapter is invoked and the stored payload is returned
/// unchanged. Either path counts toward the user's usage counter.
pub async fn process_application(
    store: &dyn RequestStore,
    flows: &dyn AiFlows,
    user: &UserRow,
    input: ApplicationInput,
) -> Result<ProcessedApplication, AppError> {
    let request_hash = fingerprint(&input.resume, &input.job_description);

    if let Some(cached) = store.find_by_fingerprint(user.id, &request_hash).await? {
        info!("Cache hit for user {} (hash {})", user.id, &request_hash[..12]);
        store.increment_request_count(user.id).await?;
        return Ok(ProcessedApplication::from_row(cached, true));
    }

    info!("Cache miss for user {}; invoking flows", user.id);
    let personal = PersonalInfo::from_user(user);
    let bundle = generate_bundle(flows, &input.resume, &input.job_description, &personal).await?;

    let stored = store
        .insert_request(user.id, &request_hash, &input, &bundle)
        .await?;
    store.increment_request_count(user.id).await?;

    info!(
        "Stored request {} for user {} ({} skills)",
        stored.request_id,
        user.id,
        stored.skills.len()
    );

    // `stored.cached` is true only when a concurrent identical submission
    // won the insert race and we adopted its row.
    Ok(stored)
}

/// Runs the three prompt adapters for a cache miss. Fail-fast: any adapter
/// error or empty required output aborts before anything is persisted.
///
/// optimize-resume and extract-key-skills depend only on the raw inputs and
/// run concurrently; the cover letter needs the optimized text and runs after.
pub(crate) async fn generate_bundle(
    flows: &dyn AiFlows,
    resume: &str,
    job_description: &str,
    personal: &PersonalInfo,
) -> Result<GeneratedBundle, AppError> {
    let (optimized, skills) = tokio::try_join!(
        flows.optimize_resume(resume, job_description),
        flows.extract_key_skills(job_description),
    )?;

    if optimized.optimized_resume.trim().is_empty() {
        return Err(AppError::Llm(
            "Resume optimization returned an empty resume".to_string(),
        ));
    }
    if optimized.optimized_resume_latex.trim().is_empty() {
        return Err(AppError::Llm(
            "Resume optimization returned an empty LaTeX document".to_string(),
        ));
    }

    let cover = flows
        .generate_cover_letter(&optimized.optimized_resume, job_description, personal)
        .await?;

    if cover.cover_letter.trim().is_empty() {
        return Err(AppError::Llm(
            "Cover letter generation returned an empty letter".to_string(),
        ));
    }

    Ok(GeneratedBundle {
        optimized_resume: optimized.optimized_resume,
        optimized_resume_latex: optimized.optimized_resume_latex,
        cover_letter: cover.cover_letter,
        skills: skills.skills,
    })
}

#[async_trait]
impl RequestStore for PgPool {
    async fn find_by_fingerprint(
        &self,
        user_id: Uuid,
        request_hash: &str,
    ) -> Result<Option<RequestRow>, AppError> {
        let row: Option<RequestRow> =
            sqlx::query_as("SELECT * FROM requests WHERE user_id = $1 AND request_hash = $2")
                .bind(user_id)
                .bind(request_hash)
                .fetch_optional(self)
                .await?;
        Ok(row)
    }

    /// Inserts the request under the (user_id, request_hash) unique
    /// constraint. On conflict a concurrent identical submission already
    /// stored its row; we adopt that row instead of failing.
    async fn insert_request(
        &self,
        user_id: Uuid,
        request_hash: &str,
        input: &ApplicationInput,
        bundle: &GeneratedBundle,
    ) -> Result<ProcessedApplication, AppError> {
        let id = Uuid::new_v4();

        let inserted = sqlx::query(
            r#"
            INSERT INTO requests
                (id, user_id, request_hash, resume, job_description,
                 optimized_resume, optimized_resume_latex, cover_letter, skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id, request_hash) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(request_hash)
        .bind(&input.resume)
        .bind(&input.job_description)
        .bind(&bundle.optimized_resume)
        .bind(&bundle.optimized_resume_latex)
        .bind(&bundle.cover_letter)
        .bind(&bundle.skills)
        .execute(self)
        .await?
        .rows_affected();

        if inserted == 1 {
            return Ok(ProcessedApplication {
                request_id: id,
                optimized_resume: bundle.optimized_resume.clone(),
                optimized_resume_latex: bundle.optimized_resume_latex.clone(),
                cover_letter: bundle.cover_letter.clone(),
                skills: bundle.skills.clone(),
                cached: false,
            });
        }

        let existing = self
            .find_by_fingerprint(user_id, request_hash)
            .await?
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "Request insert conflicted but no stored row found for hash {request_hash}"
                ))
            })?;
        Ok(ProcessedApplication::from_row(existing, true))
    }

    /// Usage counter bump. A single atomic UPDATE, safe under concurrent
    /// submissions from the same user.
    async fn increment_request_count(&self, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users SET request_count = request_count + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .execute(self)
        .await?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
