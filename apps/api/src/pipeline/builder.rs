//! Resume builder — generates a resume from scratch out of structured
//! profile data. Unlike the application pipeline there is no fingerprint
//! cache and nothing is persisted; every submission generates fresh output.

use crate::errors::AppError;
use crate::pipeline::flows::{AiFlows, CreatedResume, ResumeDraft};

/// Runs the create-resume flow and enforces its output contract.
/// Fail-fast: an empty required field aborts with a stage-identifying error.
pub async fn build_resume(
    flows: &dyn AiFlows,
    draft: &ResumeDraft,
) -> Result<CreatedResume, AppError> {
    let created = flows.create_resume(draft).await?;

    if created.resume_markdown.trim().is_empty() {
        return Err(AppError::Llm(
            "Resume creation returned an empty resume".to_string(),
        ));
    }
    if created.resume_latex.trim().is_empty() {
        return Err(AppError::Llm(
            "Resume creation returned an empty LaTeX document".to_string(),
        ));
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::pipeline::flows::{
        CoverLetter, ExtractedSkills, OptimizedResume, PersonalInfo,
    };

    struct MockBuilderFlows {
        create_calls: AtomicU32,
        resume_markdown: String,
        resume_latex: String,
    }

    impl MockBuilderFlows {
        fn new() -> Self {
            Self {
                create_calls: AtomicU32::new(0),
                resume_markdown: "# Ada Lovelace\n## Experience".to_string(),
                resume_latex: "\\documentclass{article}".to_string(),
            }
        }
    }

    #[async_trait]
    impl AiFlows for MockBuilderFlows {
        async fn optimize_resume(
            &self,
            _resume: &str,
            _job_description: &str,
        ) -> Result<OptimizedResume, AppError> {
            unreachable!("the builder never optimizes an uploaded resume")
        }

        async fn generate_cover_letter(
            &self,
            _resume_text: &str,
            _job_description: &str,
            _personal: &PersonalInfo,
        ) -> Result<CoverLetter, AppError> {
            unreachable!("the builder never generates a cover letter")
        }

        async fn extract_key_skills(
            &self,
            _job_description: &str,
        ) -> Result<ExtractedSkills, AppError> {
            unreachable!("the builder never extracts skills")
        }

        async fn create_resume(&self, _draft: &ResumeDraft) -> Result<CreatedResume, AppError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            Ok(CreatedResume {
                resume_markdown: self.resume_markdown.clone(),
                resume_latex: self.resume_latex.clone(),
            })
        }
    }

    fn draft() -> ResumeDraft {
        ResumeDraft {
            personal_info: PersonalInfo {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
                address: None,
                website: None,
                linkedin: None,
            },
            summary: "Mathematician and programmer".to_string(),
            experience: vec![],
            education: vec![],
            skills: vec!["analysis".to_string()],
        }
    }

    #[tokio::test]
    async fn test_build_resume_invokes_flow_once_and_returns_both_formats() {
        let flows = MockBuilderFlows::new();
        let created = build_resume(&flows, &draft()).await.unwrap();

        assert_eq!(flows.create_calls.load(Ordering::SeqCst), 1);
        assert!(created.resume_markdown.starts_with("# Ada Lovelace"));
        assert!(created.resume_latex.starts_with("\\documentclass"));
    }

    #[tokio::test]
    async fn test_build_resume_fails_on_empty_markdown() {
        let flows = MockBuilderFlows {
            resume_markdown: "  ".to_string(),
            ..MockBuilderFlows::new()
        };
        let result = build_resume(&flows, &draft()).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    #[tokio::test]
    async fn test_build_resume_fails_on_empty_latex() {
        let flows = MockBuilderFlows {
            resume_latex: String::new(),
            ..MockBuilderFlows::new()
        };
        let result = build_resume(&flows, &draft()).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
