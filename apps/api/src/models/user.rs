use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

// Rows only ever travel outward (DB → JSON response), so no Deserialize.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Argon2 hash. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// `user` or `admin`.
    pub role: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    /// Total processed applications, cache hits included.
    pub request_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$secret".to_string(),
            role: "user".to_string(),
            bio: None,
            avatar_url: None,
            address: None,
            phone: None,
            website: None,
            linkedin: None,
            request_count: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_serialized_user_never_exposes_password_hash() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn test_is_admin_checks_role() {
        let mut u = user();
        assert!(!u.is_admin());
        u.role = "admin".to_string();
        assert!(u.is_admin());
    }
}
