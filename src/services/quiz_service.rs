use std::{collections::HashSet, sync::Arc};

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Difficulty, QuizAttempt, QuizQuestion},
        dto::{
            quiz_dto::{AdaptiveQuestionsResponse, AnswerResult, QuizQuestionDto, SubmitAnswerResponse},
            request::{AdaptiveQuizQuery, SubmitAnswerRequest},
        },
    },
    repositories::{QuizAttemptRepository, QuizQuestionRepository, TopicRepository},
    services::{difficulty_stepper::DifficultyStepper, profile_service::ProfileService},
};

const DEFAULT_CONFIDENCE: f64 = 0.5;

pub struct QuizService {
    topics: Arc<dyn TopicRepository>,
    questions: Arc<dyn QuizQuestionRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    profiles: Arc<ProfileService>,
    stepper: DifficultyStepper,
}

impl QuizService {
    pub fn new(
        topics: Arc<dyn TopicRepository>,
        questions: Arc<dyn QuizQuestionRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        profiles: Arc<ProfileService>,
        stepper: DifficultyStepper,
    ) -> Self {
        Self {
            topics,
            questions,
            attempts,
            profiles,
            stepper,
        }
    }

    pub async fn next_questions(
        &self,
        user_id: &str,
        query: AdaptiveQuizQuery,
    ) -> AppResult<AdaptiveQuestionsResponse> {
        if self.topics.find_by_id(&query.topic_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Topic with id '{}' not found",
                query.topic_id
            )));
        }

        let current_difficulty = self
            .profiles
            .get_or_create(user_id)
            .await?
            .preferred_difficulty;

        let pool = self.questions.find_by_topic(&query.topic_id).await?;
        let answered: HashSet<String> = self
            .attempts
            .find_by_user_and_topic(user_id, &query.topic_id)
            .await?
            .into_iter()
            .map(|attempt| attempt.question_id)
            .collect();

        let questions = select_questions(pool, &answered, current_difficulty, query.clamped_count())
            .into_iter()
            .map(QuizQuestionDto::from)
            .collect();

        Ok(AdaptiveQuestionsResponse {
            message: "Adaptive quiz questions retrieved successfully".to_string(),
            questions,
            current_difficulty,
        })
    }

    pub async fn submit_answer(
        &self,
        user_id: &str,
        request: SubmitAnswerRequest,
    ) -> AppResult<SubmitAnswerResponse> {
        request.validate()?;

        let question = self
            .questions
            .find_by_id(&request.quiz_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz question with id '{}' not found", request.quiz_id))
            })?;

        let is_correct = grade(
            &question,
            request.selected_option_id.as_deref(),
            request.user_answer.as_deref(),
        )?;

        let history = self
            .attempts
            .find_by_user_and_topic(user_id, &question.topic_id)
            .await?;
        let current = match request.current_difficulty.and_then(Difficulty::new) {
            Some(level) => level,
            None => self.profiles.get_or_create(user_id).await?.preferred_difficulty,
        };
        let outcomes: Vec<bool> = std::iter::once(is_correct)
            .chain(history.iter().map(|a| a.is_correct))
            .collect();
        let new_difficulty = self.stepper.next(current, &outcomes);

        let attempt = self
            .attempts
            .create(QuizAttempt::record(
                user_id,
                &question,
                request.selected_option_id.clone(),
                request.user_answer.clone(),
                is_correct,
                request.time_taken,
            ))
            .await?;
        self.profiles
            .set_preferred_difficulty(user_id, new_difficulty)
            .await?;

        if current != new_difficulty {
            log::info!(
                "User {} moved from difficulty {} to {}",
                user_id,
                current,
                new_difficulty
            );
        }

        Ok(SubmitAnswerResponse {
            message: "Quiz submitted successfully".to_string(),
            result: AnswerResult {
                is_correct,
                score: attempt.score,
                feedback: feedback(
                    is_correct,
                    request.time_taken,
                    request.confidence.unwrap_or(DEFAULT_CONFIDENCE),
                ),
                new_difficulty,
            },
            quiz_attempt: attempt,
        })
    }
}

/// Orders the pool by distance from `current`, unanswered before answered,
/// easier before harder at equal distance, and keeps the first `count`.
pub fn select_questions(
    mut pool: Vec<QuizQuestion>,
    answered: &HashSet<String>,
    current: Difficulty,
    count: usize,
) -> Vec<QuizQuestion> {
    pool.sort_by(|a, b| {
        let key = |q: &QuizQuestion| {
            (
                q.difficulty_level.distance(current),
                answered.contains(&q.id),
                q.difficulty_level,
            )
        };
        key(a).cmp(&key(b)).then_with(|| a.id.cmp(&b.id))
    });
    pool.truncate(count);
    pool
}

pub fn grade(
    question: &QuizQuestion,
    selected_option_id: Option<&str>,
    user_answer: Option<&str>,
) -> AppResult<bool> {
    if !question.question_type.is_choice() {
        return Ok(user_answer.is_some_and(|answer| question.accepts_text(answer)));
    }

    match selected_option_id {
        None => Ok(false),
        Some(option_id) => question
            .option(option_id)
            .map(|option| option.is_correct)
            .ok_or_else(|| {
                AppError::ValidationError(
                    "Selected option does not belong to this question".to_string(),
                )
            }),
    }
}

pub fn feedback(is_correct: bool, time_taken: i64, confidence: f64) -> &'static str {
    match (is_correct, time_taken) {
        (true, t) if t < 60 => "Excellent! You answered quickly and correctly.",
        (true, t) if t < 180 => "Great job! You got the right answer.",
        (true, _) => "Correct answer, but try to be a bit faster next time.",
        (false, _) if confidence > 0.7 => {
            "You were confident but incorrect. Review the concept carefully."
        }
        (false, _) => {
            "Don't worry! This is a learning opportunity. Review the material and try again."
        }
    }
}
