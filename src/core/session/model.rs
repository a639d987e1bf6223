//! Session data: roles, the cached user, and the request payloads that create a session

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Account role, fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[display("freelancer")]
    Freelancer,
    #[display("recruiter")]
    Recruiter,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Freelancer, Role::Recruiter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Freelancer => "freelancer",
            Role::Recruiter => "recruiter",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Freelancer => "Freelancer",
            Role::Recruiter => "Recruiter",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "freelancer" => Ok(Role::Freelancer),
            "recruiter" => Ok(Role::Recruiter),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Snapshot of the authenticated principal as returned by the backend.
///
/// The backend names the role field `user_type`; `role` is accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "user_type", alias = "role")]
    pub role: Role,
}

impl User {
    /// Human readable name: full name, then username, then email
    pub fn display_name(&self) -> String {
        let full_name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !full_name.is_empty() {
            full_name
        } else if !self.username.trim().is_empty() {
            self.username.clone()
        } else if !self.email.trim().is_empty() {
            self.email.clone()
        } else {
            format!("User #{}", self.id)
        }
    }

    /// Single letter for avatar badges
    pub fn initial(&self) -> char {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

/// Tokens plus cached identity of one signed-in user
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Login payload
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Account registration payload
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_accepts_backend_shape() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "username": "ada",
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "user_type": "recruiter",
            "is_active": 1
        }))
        .unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.role, Role::Recruiter);
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_user_accepts_minimal_shape_with_role_field() {
        let user: User = serde_json::from_value(json!({"id": 1, "role": "freelancer"})).unwrap();

        assert_eq!(user.role, Role::Freelancer);
        assert_eq!(user.username, "");
        assert_eq!(user.display_name(), "User #1");
        assert_eq!(user.initial(), 'U');
    }

    #[test]
    fn test_user_rejects_unknown_role() {
        let result = serde_json::from_value::<User>(json!({"id": 1, "user_type": "admin"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user: User =
            serde_json::from_value(json!({"id": 3, "user_type": "freelancer"})).unwrap();
        user.email = "grace@example.com".to_string();
        assert_eq!(user.display_name(), "grace@example.com");

        user.username = "grace".to_string();
        assert_eq!(user.display_name(), "grace");

        user.first_name = Some("Grace".to_string());
        user.last_name = Some("  ".to_string());
        assert_eq!(user.display_name(), "Grace");
        assert_eq!(user.initial(), 'G');
    }

    #[test]
    fn test_user_serializes_role_as_user_type() {
        let user: User = serde_json::from_value(json!({"id": 1, "role": "freelancer"})).unwrap();
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(value["user_type"], "freelancer");
        assert!(value.get("role").is_none());
        assert!(value.get("first_name").is_none());
    }

    #[test]
    fn test_role_strings() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
            assert_eq!(role.to_string(), role.as_str());
        }
        assert_eq!("admin".parse::<Role>(), Err("Invalid role: admin".to_string()));
        assert_eq!(Role::Recruiter.display_name(), "Recruiter");
    }

    #[test]
    fn test_registration_serializes_user_type() {
        let registration = Registration {
            username: "sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "Secret#123".to_string(),
            first_name: "Sam".to_string(),
            last_name: "Hill".to_string(),
            user_type: Role::Freelancer,
        };
        let value = serde_json::to_value(&registration).unwrap();

        assert_eq!(value["user_type"], "freelancer");
        assert_eq!(value["email"], "sam@example.com");
    }
}
