use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::Difficulty;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

impl QuestionType {
    /// Choice questions are graded by option id, short answers by text.
    pub fn is_choice(&self) -> bool {
        !matches!(self, QuestionType::ShortAnswer)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizOption {
    pub id: String,
    pub option_text: String,
    pub is_correct: bool,
}

impl QuizOption {
    pub fn new(option_text: &str, is_correct: bool) -> Self {
        QuizOption {
            id: Uuid::new_v4().to_string(),
            option_text: option_text.to_string(),
            is_correct,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: String,
    pub topic_id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub difficulty_level: Difficulty,
    pub points: i32,
    pub options: Vec<QuizOption>,
}

impl QuizQuestion {
    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    pub fn correct_options(&self) -> impl Iterator<Item = &QuizOption> {
        self.options.iter().filter(|o| o.is_correct)
    }

    /// Case-insensitive match of a free-text answer against the correct options.
    pub fn accepts_text(&self, answer: &str) -> bool {
        let answer = answer.trim().to_lowercase();
        !answer.is_empty()
            && self
                .correct_options()
                .any(|o| o.option_text.trim().to_lowercase() == answer)
    }
}
