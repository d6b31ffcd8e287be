pub mod fixtures {
    use chrono::{Duration, Utc};

    use crate::models::domain::{
        Difficulty, QuestionType, QuizAttempt, QuizOption, QuizQuestion, Topic, User,
    };

    /// Creates a standard test user. The hash is not a real bcrypt hash.
    pub fn test_user() -> User {
        test_user_with_username("testuser")
    }

    pub fn test_user_with_username(username: &str) -> User {
        User::new(
            username,
            &format!("{}@example.com", username),
            "Test",
            "User",
            "not-a-bcrypt-hash".to_string(),
        )
    }

    pub fn topic(name: &str) -> Topic {
        Topic::new(
            name,
            &format!("An introduction to {}", name),
            "Programming",
            Difficulty::BEGINNER,
        )
    }

    /// Four-option multiple choice question worth `level` points; the first
    /// option is the correct one.
    pub fn choice_question(id: &str, topic_id: &str, level: u8) -> QuizQuestion {
        let difficulty_level = Difficulty::new(level).unwrap_or_default();
        QuizQuestion {
            id: id.to_string(),
            topic_id: topic_id.to_string(),
            question_text: format!("Question {} at level {}", id, level),
            question_type: QuestionType::MultipleChoice,
            difficulty_level,
            points: i32::from(difficulty_level.level()),
            options: vec![
                QuizOption::new("Option A", true),
                QuizOption::new("Option B", false),
                QuizOption::new("Option C", false),
                QuizOption::new("Option D", false),
            ],
        }
    }

    /// A graded attempt `age_minutes` in the past at the given level.
    pub fn attempt(
        user_id: &str,
        topic_id: &str,
        level: u8,
        is_correct: bool,
        age_minutes: i64,
    ) -> QuizAttempt {
        let question = choice_question(&format!("{}-{}", topic_id, level), topic_id, level);
        let mut attempt = QuizAttempt::record(user_id, &question, None, None, is_correct, 30);
        attempt.created_at = Utc::now() - Duration::minutes(age_minutes);
        attempt
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_user() {
        let user = test_user();
        assert_eq!(user.username, "testuser");
        assert_eq!(user.email, "testuser@example.com");
    }

    #[test]
    fn test_choice_question_has_one_correct_option() {
        let question = choice_question("q-1", "t-1", 2);
        assert_eq!(question.correct_options().count(), 1);
        assert_eq!(question.points, 2);
    }

    #[test]
    fn test_attempt_is_backdated() {
        let attempt = attempt("u", "t", 3, true, 10);
        assert!(attempt.created_at < chrono::Utc::now());
        assert_eq!(attempt.score, 30);
    }
}
