use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::timestamp;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    #[serde(with = "timestamp")]
    pub date_joined: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        password_hash: String,
    ) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password_hash,
            date_joined: timestamp::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("johndoe", "john@example.com", "John", "Doe", "hash".into());
        assert_eq!(user.username, "johndoe");
        assert_eq!(user.full_name(), "John Doe");
        assert!(Uuid::parse_str(&user.id).is_ok());
    }

    #[test]
    fn test_full_name_without_names() {
        let user = User::new("anon", "anon@example.com", "", "", "hash".into());
        assert_eq!(user.full_name(), "");
    }
}
