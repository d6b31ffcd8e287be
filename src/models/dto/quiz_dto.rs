use serde::Serialize;

use crate::models::domain::{Difficulty, QuestionType, QuizAttempt, QuizOption, QuizQuestion};

/// Option as served to learners, without its correctness flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOptionDto {
    pub id: String,
    pub option_text: String,
}

impl From<QuizOption> for QuizOptionDto {
    fn from(option: QuizOption) -> Self {
        QuizOptionDto {
            id: option.id,
            option_text: option.option_text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestionDto {
    pub id: String,
    pub topic_id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub difficulty_level: Difficulty,
    pub difficulty_text: &'static str,
    pub points: i32,
    pub options: Vec<QuizOptionDto>,
}

impl From<QuizQuestion> for QuizQuestionDto {
    fn from(question: QuizQuestion) -> Self {
        QuizQuestionDto {
            id: question.id,
            topic_id: question.topic_id,
            question_text: question.question_text,
            question_type: question.question_type,
            difficulty_level: question.difficulty_level,
            difficulty_text: question.difficulty_level.label(),
            points: question.points,
            options: question.options.into_iter().map(QuizOptionDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdaptiveQuestionsResponse {
    pub message: String,
    pub questions: Vec<QuizQuestionDto>,
    pub current_difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerResult {
    pub is_correct: bool,
    pub score: i32,
    pub feedback: &'static str,
    pub new_difficulty: Difficulty,
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    pub message: String,
    pub result: AnswerResult,
    pub quiz_attempt: QuizAttempt,
}
