use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{timestamp, Difficulty};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty_level: Difficulty,
    pub category: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Topic {
    pub fn new(name: &str, description: &str, category: &str, difficulty_level: Difficulty) -> Self {
        Topic {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            difficulty_level,
            category: category.to_string(),
            created_at: timestamp::now(),
        }
    }
}
