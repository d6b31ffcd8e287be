use serde::Deserialize;
use validator::Validate;

use crate::models::domain::LearningStyle;

pub const DEFAULT_NUM_QUESTIONS: i64 = 5;
pub const MAX_NUM_QUESTIONS: i64 = 20;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    pub password_confirm: Option<String>,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub first_name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub last_name: Option<String>,

    #[serde(default)]
    pub learning_style: Option<LearningStyle>,

    #[serde(default)]
    #[validate(range(min = 1, max = 3, message = "Difficulty must be between 1 and 3"))]
    pub preferred_difficulty: Option<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body of both the refresh and the logout endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExplainTopicRequest {
    #[validate(length(min = 1, max = 200, message = "Topic name must be between 1 and 200 characters"))]
    pub topic_name: String,

    #[serde(default)]
    pub learning_style: Option<LearningStyle>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdaptiveQuizQuery {
    pub topic_id: String,
    #[serde(default = "default_num_questions")]
    pub num_questions: i64,
}

impl AdaptiveQuizQuery {
    pub fn clamped_count(&self) -> usize {
        self.num_questions.clamp(1, MAX_NUM_QUESTIONS) as usize
    }
}

fn default_num_questions() -> i64 {
    DEFAULT_NUM_QUESTIONS
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, message = "quiz_id is required"))]
    pub quiz_id: String,

    #[serde(default)]
    pub selected_option_id: Option<String>,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub user_answer: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "time_taken must not be negative"))]
    pub time_taken: i64,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0, message = "confidence must be between 0 and 1"))]
    pub confidence: Option<f64>,

    #[serde(default)]
    #[validate(range(min = 1, max = 3, message = "Difficulty must be between 1 and 3"))]
    pub current_difficulty: Option<u8>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TeachBackRequest {
    #[validate(length(min = 1, message = "topic_id is required"))]
    pub topic_id: String,

    #[validate(length(min = 1, max = 10000, message = "Explanation must be between 1 and 10000 characters"))]
    pub student_explanation: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmotionDetectRequest {
    #[validate(length(min = 1, message = "image_data is required"))]
    pub image_data: String,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExamReadinessRequest {
    #[validate(length(min = 1, message = "topic_id is required"))]
    pub topic_id: String,

    #[serde(default = "default_include_mock_test")]
    pub include_mock_test: bool,
}

fn default_include_mock_test() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub learning_style: Option<LearningStyle>,

    #[serde(default)]
    #[validate(range(min = 1, max = 3, message = "Difficulty must be between 1 and 3"))]
    pub preferred_difficulty: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str) -> RegisterRequest {
        RegisterRequest {
            username: "learner".to_string(),
            email: "learner@example.com".to_string(),
            password: password.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn short_password_fails_validation() {
        assert!(register("short").validate().is_err());
        assert!(register("long-enough").validate().is_ok());
    }

    #[test]
    fn preferred_difficulty_out_of_range_fails_validation() {
        let mut request = register("long-enough");
        request.preferred_difficulty = Some(4);
        assert!(request.validate().is_err());
    }

    #[test]
    fn num_questions_is_clamped() {
        let query: AdaptiveQuizQuery =
            serde_json::from_str(r#"{"topic_id":"t","num_questions":100}"#).unwrap();
        assert_eq!(query.clamped_count(), 20);

        let query: AdaptiveQuizQuery = serde_json::from_str(r#"{"topic_id":"t"}"#).unwrap();
        assert_eq!(query.clamped_count(), 5);

        let query: AdaptiveQuizQuery =
            serde_json::from_str(r#"{"topic_id":"t","num_questions":-3}"#).unwrap();
        assert_eq!(query.clamped_count(), 1);
    }

    #[test]
    fn confidence_must_be_a_probability() {
        let submit: SubmitAnswerRequest =
            serde_json::from_str(r#"{"quiz_id":"q","time_taken":3,"confidence":1.5}"#).unwrap();
        assert!(submit.validate().is_err());
    }

    #[test]
    fn mock_test_is_included_by_default() {
        let request: ExamReadinessRequest = serde_json::from_str(r#"{"topic_id":"t"}"#).unwrap();
        assert!(request.include_mock_test);
    }
}
