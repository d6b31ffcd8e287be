use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::timestamp;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TeachBackSubmission {
    pub id: String,
    pub user_id: String,
    pub topic_id: String,
    pub student_explanation: String,
    pub correctness_score: f64,
    pub ai_feedback: String,
    pub improvement_suggestions: Vec<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl TeachBackSubmission {
    pub fn new(
        user_id: &str,
        topic_id: &str,
        student_explanation: &str,
        correctness_score: f64,
        ai_feedback: String,
        improvement_suggestions: Vec<String>,
    ) -> Self {
        TeachBackSubmission {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            topic_id: topic_id.to_string(),
            student_explanation: student_explanation.to_string(),
            correctness_score: correctness_score.clamp(0.0, 1.0),
            ai_feedback,
            improvement_suggestions,
            created_at: timestamp::now(),
        }
    }
}
