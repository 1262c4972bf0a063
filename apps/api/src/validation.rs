//! Field-level validation for request payloads, applied once at the
//! handler boundary.

use crate::errors::AppError;

pub fn validate_name(name: &str) -> Result<(), AppError> {
    let len = name.trim().chars().count();
    if len < 2 {
        return Err(AppError::Validation(
            "Name must be at least 2 characters".to_string(),
        ));
    }
    if len > 50 {
        return Err(AppError::Validation(
            "Name cannot exceed 50 characters".to_string(),
        ));
    }
    Ok(())
}

/// Shape check only — deliverability is not our problem.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AppError::Validation("Invalid email address".to_string()));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_role(role: &str) -> Result<(), AppError> {
    match role {
        "user" | "admin" => Ok(()),
        other => Err(AppError::Validation(format!("Invalid role '{other}'"))),
    }
}

/// Accepts an absent or blank field, or an http(s) URL.
pub fn validate_url_field(field: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        None => Ok(()),
        Some(v) if v.is_empty() => Ok(()),
        Some(v) if v.starts_with("http://") || v.starts_with("https://") => Ok(()),
        Some(_) => Err(AppError::Validation(format!("{field} must be a valid URL"))),
    }
}

pub fn validate_bio(bio: Option<&str>) -> Result<(), AppError> {
    if let Some(bio) = bio {
        if bio.chars().count() > 500 {
            return Err(AppError::Validation(
                "Bio cannot exceed 500 characters".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_bounds() {
        assert!(validate_name("Al").is_ok());
        assert!(validate_name("A").is_err());
        assert!(validate_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("ada.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@").is_err());
        assert!(validate_email("ada@localhost").is_err());
        assert!(validate_email("a da@example.com").is_err());
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_role_whitelist() {
        assert!(validate_role("user").is_ok());
        assert!(validate_role("admin").is_ok());
        assert!(validate_role("superuser").is_err());
    }

    #[test]
    fn test_url_field_accepts_absent_empty_and_http() {
        assert!(validate_url_field("avatar", None).is_ok());
        assert!(validate_url_field("avatar", Some("")).is_ok());
        assert!(validate_url_field("avatar", Some("https://a.dev/x.png")).is_ok());
        assert!(validate_url_field("avatar", Some("ftp://a.dev")).is_err());
        assert!(validate_url_field("avatar", Some("not a url")).is_err());
    }

    #[test]
    fn test_bio_length_cap() {
        assert!(validate_bio(Some(&"x".repeat(500))).is_ok());
        assert!(validate_bio(Some(&"x".repeat(501))).is_err());
        assert!(validate_bio(None).is_ok());
    }
}
