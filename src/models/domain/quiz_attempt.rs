use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{timestamp, Difficulty, QuizQuestion};

/// A single graded answer. Never updated once written.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub user_id: String,
    pub question_id: String,
    pub topic_id: String,
    pub difficulty_level: Difficulty,
    #[serde(default)]
    pub selected_option_id: Option<String>,
    #[serde(default)]
    pub user_answer: Option<String>,
    pub is_correct: bool,
    pub score: i32,
    pub time_taken: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn record(
        user_id: &str,
        question: &QuizQuestion,
        selected_option_id: Option<String>,
        user_answer: Option<String>,
        is_correct: bool,
        time_taken: i64,
    ) -> Self {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            question_id: question.id.clone(),
            topic_id: question.topic_id.clone(),
            difficulty_level: question.difficulty_level,
            selected_option_id,
            user_answer,
            is_correct,
            score: if is_correct { question.points * 10 } else { 0 },
            time_taken,
            created_at: timestamp::now(),
        }
    }
}
