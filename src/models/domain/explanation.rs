use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{timestamp, LearningStyle};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Explanation {
    pub id: String,
    pub user_id: String,
    pub topic_id: String,
    pub explanation_text: String,
    pub key_points: Vec<String>,
    pub diagrams: Vec<String>,
    pub real_world_applications: Vec<String>,
    pub learning_style: LearningStyle,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Explanation {
    pub fn new(user_id: &str, topic_id: &str, learning_style: LearningStyle) -> Self {
        Explanation {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            topic_id: topic_id.to_string(),
            explanation_text: String::new(),
            key_points: Vec::new(),
            diagrams: Vec::new(),
            real_world_applications: Vec::new(),
            learning_style,
            created_at: timestamp::now(),
        }
    }
}
