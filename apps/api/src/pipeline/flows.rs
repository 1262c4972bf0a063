//! Prompt adapters — boundary contracts around the generative-text calls
//! behind the application pipeline and the resume builder.
//!
//! `AppState` holds an `Arc<dyn AiFlows>`: production wires `LlmFlows`,
//! tests substitute a mock to exercise the orchestrator without network.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::user::UserRow;
use crate::pipeline::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM, CREATE_RESUME_PROMPT_TEMPLATE,
    CREATE_RESUME_SYSTEM, OPTIMIZE_RESUME_PROMPT_TEMPLATE, OPTIMIZE_RESUME_SYSTEM,
    SKILLS_PROMPT_TEMPLATE, SKILLS_SYSTEM,
};

// ────────────────────────────────────────────────────────────────────────────
// Adapter output contracts
// ────────────────────────────────────────────────────────────────────────────

/// Output of the optimize-resume flow. Both fields must be non-empty on
/// success; the orchestrator fails fast otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedResume {
    /// Markdown with `<ins>`/`<del>` change highlights.
    pub optimized_resume: String,
    /// Clean, compilable LaTeX document with all changes applied.
    pub optimized_resume_latex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverLetter {
    pub cover_letter: String,
}

/// An empty skill list is a valid result, not a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSkills {
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Output of the create-resume flow. Both fields must be non-empty on
/// success, same rule as `OptimizedResume`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResume {
    pub resume_markdown: String,
    /// Clean, compilable LaTeX document.
    pub resume_latex: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Resume-builder input
// ────────────────────────────────────────────────────────────────────────────

/// One job entry in the resume-builder payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: String,
    /// Absent means the role is current.
    pub end_date: Option<String>,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
}

/// Structured input for building a resume from scratch, as submitted by
/// the resume-builder form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeDraft {
    pub personal_info: PersonalInfo,
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl ResumeDraft {
    /// Renders the experience section for the prompt, one entry per block.
    pub(crate) fn experience_block(&self) -> String {
        self.experience
            .iter()
            .map(|e| {
                let mut block = format!("- **{}** at {}", e.title, e.company);
                if let Some(location) = &e.location {
                    block.push_str(&format!(" ({location})"));
                }
                block.push_str(&format!(
                    "\n  {} - {}",
                    e.start_date,
                    e.end_date.as_deref().unwrap_or("Present")
                ));
                for responsibility in &e.responsibilities {
                    block.push_str(&format!("\n  - {responsibility}"));
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn education_block(&self) -> String {
        self.education
            .iter()
            .map(|e| {
                let mut block = format!("- **{}**, {}", e.degree, e.school);
                if let Some(location) = &e.location {
                    block.push_str(&format!(" ({location})"));
                }
                block.push_str(&format!(
                    "\n  {} - {}",
                    e.start_date,
                    e.end_date.as_deref().unwrap_or("Present")
                ));
                block
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn skills_block(&self) -> String {
        self.skills
            .iter()
            .map(|s| format!("- {s}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Personal contact info for cover-letter generation
// ────────────────────────────────────────────────────────────────────────────

/// Contact fields threaded into the cover-letter prompt. Required vs.
/// optional is explicit here; built once from the authenticated user and
/// never re-validated downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
}

impl PersonalInfo {
    pub fn from_user(user: &UserRow) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            website: user.website.clone(),
            linkedin: user.linkedin.clone(),
        }
    }

    /// Renders the letterhead block, skipping absent optional fields.
    pub fn contact_block(&self) -> String {
        let mut lines = vec![self.name.clone()];
        if let Some(address) = &self.address {
            lines.push(address.clone());
        }
        if let Some(phone) = &self.phone {
            lines.push(phone.clone());
        }
        lines.push(self.email.clone());
        if let Some(website) = &self.website {
            lines.push(website.clone());
        }
        if let Some(linkedin) = &self.linkedin {
            lines.push(linkedin.clone());
        }
        lines.join("\n")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The prompt adapters behind the API. Each is an opaque call to the
/// generative-text service with a fixed input/output schema.
#[async_trait]
pub trait AiFlows: Send + Sync {
    async fn optimize_resume(
        &self,
        resume: &str,
        job_description: &str,
    ) -> Result<OptimizedResume, AppError>;

    /// Takes the *optimized* resume text, not the original blob — the
    /// cover letter is tailored to the rewrite the applicant will submit.
    async fn generate_cover_letter(
        &self,
        resume_text: &str,
        job_description: &str,
        personal: &PersonalInfo,
    ) -> Result<CoverLetter, AppError>;

    async fn extract_key_skills(
        &self,
        job_description: &str,
    ) -> Result<ExtractedSkills, AppError>;

    /// Builds a resume from scratch out of structured profile data —
    /// the flow behind the resume-builder form, independent of the
    /// optimization pipeline.
    async fn create_resume(&self, draft: &ResumeDraft) -> Result<CreatedResume, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Production implementation
// ────────────────────────────────────────────────────────────────────────────

/// Production flows backed by the shared `LlmClient`.
pub struct LlmFlows {
    llm: LlmClient,
}

impl LlmFlows {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AiFlows for LlmFlows {
    async fn optimize_resume(
        &self,
        resume: &str,
        job_description: &str,
    ) -> Result<OptimizedResume, AppError> {
        let prompt = OPTIMIZE_RESUME_PROMPT_TEMPLATE
            .replace("{resume}", resume)
            .replace("{job_description}", job_description);
        self.llm
            .call_json::<OptimizedResume>(&prompt, OPTIMIZE_RESUME_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Resume optimization failed: {e}")))
    }

    async fn generate_cover_letter(
        &self,
        resume_text: &str,
        job_description: &str,
        personal: &PersonalInfo,
    ) -> Result<CoverLetter, AppError> {
        let prompt = COVER_LETTER_PROMPT_TEMPLATE
            .replace("{contact_block}", &personal.contact_block())
            .replace("{resume_text}", resume_text)
            .replace("{job_description}", job_description);
        self.llm
            .call_json::<CoverLetter>(&prompt, COVER_LETTER_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))
    }

    async fn extract_key_skills(
        &self,
        job_description: &str,
    ) -> Result<ExtractedSkills, AppError> {
        let prompt = SKILLS_PROMPT_TEMPLATE.replace("{job_description}", job_description);
        self.llm
            .call_json::<ExtractedSkills>(&prompt, SKILLS_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Skill extraction failed: {e}")))
    }

    async fn create_resume(&self, draft: &ResumeDraft) -> Result<CreatedResume, AppError> {
        let prompt = CREATE_RESUME_PROMPT_TEMPLATE
            .replace("{contact_block}", &draft.personal_info.contact_block())
            .replace("{summary}", &draft.summary)
            .replace("{experience_block}", &draft.experience_block())
            .replace("{education_block}", &draft.education_block())
            .replace("{skills_block}", &draft.skills_block());
        self.llm
            .call_json::<CreatedResume>(&prompt, CREATE_RESUME_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Resume creation failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_optionals() -> PersonalInfo {
        PersonalInfo {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+44 20 7946 0000".to_string()),
            address: None,
            website: Some("https://ada.dev".to_string()),
            linkedin: None,
        }
    }

    #[test]
    fn test_contact_block_skips_missing_optionals() {
        let block = user_with_optionals().contact_block();
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Ada Lovelace",
                "+44 20 7946 0000",
                "ada@example.com",
                "https://ada.dev"
            ]
        );
    }

    #[test]
    fn test_extracted_skills_defaults_to_empty_list() {
        // The model may legitimately return no skills field at all.
        let parsed: ExtractedSkills = serde_json::from_str("{}").unwrap();
        assert!(parsed.skills.is_empty());
    }

    #[test]
    fn test_experience_block_defaults_open_ended_roles_to_present() {
        let draft = ResumeDraft {
            personal_info: user_with_optionals(),
            summary: "Engineer".to_string(),
            experience: vec![ExperienceEntry {
                title: "Staff Engineer".to_string(),
                company: "Analytical Engines Ltd".to_string(),
                location: None,
                start_date: "2021-03".to_string(),
                end_date: None,
                responsibilities: vec!["Led the compute team".to_string()],
            }],
            education: vec![],
            skills: vec![],
        };
        let block = draft.experience_block();
        assert!(block.contains("**Staff Engineer** at Analytical Engines Ltd"));
        assert!(block.contains("2021-03 - Present"));
        assert!(block.contains("- Led the compute team"));
        // No location supplied, no empty parens.
        assert!(!block.contains("()"));
    }

    #[test]
    fn test_education_and_skills_blocks_render_all_entries() {
        let draft = ResumeDraft {
            personal_info: user_with_optionals(),
            summary: "Engineer".to_string(),
            experience: vec![],
            education: vec![EducationEntry {
                school: "University of London".to_string(),
                degree: "BSc Mathematics".to_string(),
                location: Some("London".to_string()),
                start_date: "1833".to_string(),
                end_date: Some("1836".to_string()),
            }],
            skills: vec!["Go".to_string(), "LaTeX".to_string()],
        };
        assert!(draft
            .education_block()
            .contains("**BSc Mathematics**, University of London (London)"));
        assert_eq!(draft.skills_block(), "- Go\n- LaTeX");
    }

    #[test]
    fn test_resume_draft_sections_default_to_empty() {
        let json = r#"{
            "personal_info": {"name": "Ada Lovelace", "email": "ada@example.com",
                              "phone": null, "address": null, "website": null, "linkedin": null},
            "summary": "Mathematician and programmer"
        }"#;
        let draft: ResumeDraft = serde_json::from_str(json).unwrap();
        assert!(draft.experience.is_empty());
        assert!(draft.education.is_empty());
        assert!(draft.skills.is_empty());
    }

    #[test]
    fn test_optimized_resume_requires_both_fields() {
        let bad = r#"{"optimized_resume": "text only"}"#;
        assert!(serde_json::from_str::<OptimizedResume>(bad).is_err());

        let good = r##"{
            "optimized_resume": "# Resume\n<ins>Go</ins>",
            "optimized_resume_latex": "\\documentclass{article}"
        }"##;
        let parsed: OptimizedResume = serde_json::from_str(good).unwrap();
        assert!(parsed.optimized_resume_latex.starts_with("\\documentclass"));
    }
}
