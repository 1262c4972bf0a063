// All LLM prompt constants for the processing pipeline.

/// System prompt for resume optimization — enforces JSON-only output.
pub const OPTIMIZE_RESUME_SYSTEM: &str =
    "You are an expert resume writer specializing in tailoring resumes to specific \
    job descriptions and optimizing them for applicant tracking systems (ATS). \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume optimization prompt template.
/// Replace `{resume}` and `{job_description}` before sending.
pub const OPTIMIZE_RESUME_PROMPT_TEMPLATE: &str = r#"Rewrite the resume below to be ATS-friendly and to highlight the skills and experiences most relevant to the job description.

Return a JSON object with this EXACT schema (no extra fields):
{
  "optimized_resume": "<Markdown resume with changes highlighted>",
  "optimized_resume_latex": "<full compilable LaTeX document>"
}

Rules:
- "optimized_resume" is a Markdown version of the resume. You MUST highlight every change: use <ins> tags for additions and <del> tags for deletions, e.g. "I have experience with <del>React</del><ins>React.js</ins>." Preserve the original structure as much as possible.
- "optimized_resume_latex" is the clean, final resume with all changes applied, as one complete LaTeX document using the standard article class. Do NOT highlight changes in the LaTeX version. It must be ready for compilation.
- Both fields are required and must be non-empty.

RESUME (self-describing encoded document):
{resume}

JOB DESCRIPTION:
{job_description}"#;

/// System prompt for cover-letter generation — enforces JSON-only output.
pub const COVER_LETTER_SYSTEM: &str =
    "You are an expert cover letter writer producing strict, professional \
    business letters. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include commentary before or after the letter.";

/// Cover-letter prompt template.
/// Replace `{contact_block}`, `{resume_text}`, and `{job_description}`.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Generate a cover letter in strict professional business letter format, tailored to the resume and job description below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "cover_letter": "<the complete cover letter text>"
}

The letter MUST follow this structure exactly, including blank lines between blocks:
1. Applicant contact information, exactly these lines:
{contact_block}
2. Date, written as "Month Day, Year".
3. Recipient block: hiring manager name if the job description provides one, otherwise "Hiring Manager", then company name and address when available.
4. Salutation: "Dear [Hiring Manager Name]," or "Dear Hiring Manager,".
5. Body: an introduction naming the position applied for; two or three paragraphs matching the applicant's most relevant skills and experience to the key requirements, with specific examples; a closing paragraph reiterating interest and requesting an interview.
6. Closing: "Sincerely," followed by the applicant's typed name.

The tone must be professional and confident. Use only facts present in the resume.

RESUME (already optimized for this role):
{resume_text}

JOB DESCRIPTION:
{job_description}"#;

/// System prompt for the resume builder — enforces JSON-only output.
pub const CREATE_RESUME_SYSTEM: &str =
    "You are an expert resume writer creating professional, well-formatted \
    resumes from structured information, following standard resume-writing \
    best practices. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent facts not present in the provided information.";

/// Resume-builder prompt template.
/// Replace `{contact_block}`, `{summary}`, `{experience_block}`,
/// `{education_block}`, and `{skills_block}`.
pub const CREATE_RESUME_PROMPT_TEMPLATE: &str = r#"Create a professional resume from the structured information below. The resume should be clear, concise, and follow standard resume-writing best practices. Start experience bullet points with action verbs and quantify achievements whenever possible.

Return a JSON object with this EXACT schema (no extra fields):
{
  "resume_markdown": "<the full resume in Markdown>",
  "resume_latex": "<full compilable LaTeX document>"
}

Rules:
- "resume_markdown" uses standard Markdown for headings, bold text, italics, and bullet points.
- "resume_latex" is one complete LaTeX document using the standard article class, clean and ready for compilation.
- Both fields are required and must be non-empty.

### Personal Information
{contact_block}

### Professional Summary
{summary}

### Work Experience
{experience_block}

### Education
{education_block}

### Skills
{skills_block}"#;

/// System prompt for skill extraction — enforces JSON-only output.
pub const SKILLS_SYSTEM: &str =
    "You are an expert in extracting key skills from job descriptions. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Skill extraction prompt template. Replace `{job_description}`.
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Extract the key skills from the following job description.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": ["<skill>", "<skill>"]
}

Include languages, frameworks, tools, and domain concepts the role asks for. An empty array is acceptable if the text names no concrete skills.

JOB DESCRIPTION:
{job_description}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimize_template_placeholders_fill() {
        let prompt = OPTIMIZE_RESUME_PROMPT_TEMPLATE
            .replace("{resume}", "data:text/plain;base64,Zm9v")
            .replace("{job_description}", "Rust engineer");
        assert!(prompt.contains("data:text/plain;base64,Zm9v"));
        assert!(prompt.contains("Rust engineer"));
        assert!(!prompt.contains("{resume}"));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_cover_letter_template_placeholders_fill() {
        let prompt = COVER_LETTER_PROMPT_TEMPLATE
            .replace("{contact_block}", "Ada Lovelace\nada@example.com")
            .replace("{resume_text}", "# Resume")
            .replace("{job_description}", "Go engineer");
        assert!(prompt.contains("Ada Lovelace"));
        assert!(!prompt.contains("{contact_block}"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_create_resume_template_placeholders_fill() {
        let prompt = CREATE_RESUME_PROMPT_TEMPLATE
            .replace("{contact_block}", "Ada Lovelace\nada@example.com")
            .replace("{summary}", "Mathematician")
            .replace("{experience_block}", "- **Analyst** at AEL")
            .replace("{education_block}", "- **BSc**, UoL")
            .replace("{skills_block}", "- Go");
        assert!(prompt.contains("Mathematician"));
        assert!(!prompt.contains("{summary}"));
        assert!(!prompt.contains("{experience_block}"));
        assert!(!prompt.contains("{education_block}"));
        assert!(!prompt.contains("{skills_block}"));
    }

    #[test]
    fn test_all_system_prompts_forbid_fences() {
        for system in [
            OPTIMIZE_RESUME_SYSTEM,
            COVER_LETTER_SYSTEM,
            CREATE_RESUME_SYSTEM,
            SKILLS_SYSTEM,
        ] {
            assert!(system.contains("valid JSON only"));
            assert!(system.contains("code fences"));
        }
    }
}
