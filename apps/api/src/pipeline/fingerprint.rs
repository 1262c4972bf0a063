//! Content fingerprint used as the deduplication key for processed
//! applications.

use sha2::{Digest, Sha256};

/// SHA-256 over the resume blob followed by the job description text,
/// lowercase hex. Deterministic and unsalted — the digest is a cache key,
/// not a security boundary.
pub fn fingerprint(resume: &str, job_description: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(resume.as_bytes());
    hasher.update(job_description.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "data:application/pdf;base64,JVBERi0xLjQK";
    const JD: &str = "Senior Go engineer, 5 years, distributed systems";

    #[test]
    fn test_fingerprint_is_deterministic() {
        assert_eq!(fingerprint(RESUME, JD), fingerprint(RESUME, JD));
    }

    #[test]
    fn test_fingerprint_is_64_hex_chars() {
        let digest = fingerprint(RESUME, JD);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, digest.to_lowercase());
    }

    #[test]
    fn test_fingerprint_changes_on_resume_perturbation() {
        let mut perturbed = RESUME.to_string();
        perturbed.replace_range(perturbed.len() - 1.., "X");
        assert_ne!(fingerprint(RESUME, JD), fingerprint(&perturbed, JD));
    }

    #[test]
    fn test_fingerprint_changes_on_jd_perturbation() {
        assert_ne!(
            fingerprint(RESUME, JD),
            fingerprint(RESUME, "Senior Go engineer, 6 years, distributed systems")
        );
    }

    #[test]
    fn test_fingerprint_depends_on_input_order() {
        // (resume, jd) and (jd, resume) must not collide for distinct inputs.
        assert_ne!(fingerprint(RESUME, JD), fingerprint(JD, RESUME));
    }
}
