// Users - records for the people editing the map
//
// Storage sits behind UserRepository; the in-memory implementation keeps
// users in creation order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    #[error("Invalid user: {0}")]
    InvalidUser(String),
}

/// A stored user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

pub trait UserRepository {
    fn create(&mut self, new_user: NewUser) -> Result<User, UserError>;

    fn find_all(&self) -> Vec<User>;
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Vec<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn create(&mut self, new_user: NewUser) -> Result<User, UserError> {
        let name = new_user.name.trim();
        if name.is_empty() {
            return Err(UserError::InvalidUser("name cannot be empty".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: new_user.email,
            created_at: Utc::now(),
        };
        log::debug!("created user {}", user.id);
        self.users.push(user.clone());

        Ok(user)
    }

    fn find_all(&self) -> Vec<User> {
        self.users.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_find_all() {
        let mut repo = InMemoryUserRepository::new();
        let ada = repo
            .create(NewUser {
                name: "Ada".to_string(),
                email: Some("ada@example.org".to_string()),
            })
            .unwrap();
        repo.create(NewUser {
            name: " Grace ".to_string(),
            email: None,
        })
        .unwrap();

        let users = repo.find_all();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0], ada);
        assert_eq!(users[1].name, "Grace");
    }

    #[test]
    fn test_rejects_empty_name() {
        let mut repo = InMemoryUserRepository::new();
        let result = repo.create(NewUser {
            name: "  ".to_string(),
            email: None,
        });

        assert!(matches!(result, Err(UserError::InvalidUser(_))));
        assert!(repo.find_all().is_empty());
    }

    #[test]
    fn test_new_user_from_request_body() {
        let new_user: NewUser = serde_json::from_str(r#"{"name":"Lin"}"#).unwrap();
        assert_eq!(new_user.email, None);
    }

    #[test]
    fn test_email_is_stored_as_given() {
        let mut repo = InMemoryUserRepository::new();
        let user = repo
            .create(NewUser {
                name: "Kim".to_string(),
                email: Some("kim at survey office".to_string()),
            })
            .unwrap();

        assert_eq!(user.email.as_deref(), Some("kim at survey office"));
    }
}
