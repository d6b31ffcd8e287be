use std::sync::Arc;

use crate::{db::Database, errors::AppResult};

pub mod emotion_session_repository;
pub mod explanation_repository;
pub mod memory;
pub mod quiz_attempt_repository;
pub mod quiz_question_repository;
pub mod readiness_report_repository;
pub mod refresh_token_repository;
pub mod skill_gap_repository;
pub mod teach_back_repository;
pub mod topic_repository;
pub mod user_profile_repository;
pub mod user_repository;

pub use emotion_session_repository::{EmotionSessionRepository, MongoEmotionSessionRepository};
pub use explanation_repository::{ExplanationRepository, MongoExplanationRepository};
pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_question_repository::{MongoQuizQuestionRepository, QuizQuestionRepository};
pub use readiness_report_repository::{MongoReadinessReportRepository, ReadinessReportRepository};
pub use refresh_token_repository::{MongoRefreshTokenRepository, RefreshTokenRepository};
pub use skill_gap_repository::{MongoSkillGapRepository, SkillGapRepository};
pub use teach_back_repository::{MongoTeachBackRepository, TeachBackRepository};
pub use topic_repository::{MongoTopicRepository, TopicRepository};
pub use user_profile_repository::{MongoUserProfileRepository, UserProfileRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

/// Every repository the services need, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn UserProfileRepository>,
    pub topics: Arc<dyn TopicRepository>,
    pub questions: Arc<dyn QuizQuestionRepository>,
    pub attempts: Arc<dyn QuizAttemptRepository>,
    pub explanations: Arc<dyn ExplanationRepository>,
    pub teach_backs: Arc<dyn TeachBackRepository>,
    pub emotion_sessions: Arc<dyn EmotionSessionRepository>,
    pub readiness_reports: Arc<dyn ReadinessReportRepository>,
    pub skill_gaps: Arc<dyn SkillGapRepository>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
}

impl Repositories {
    pub fn mongo(db: &Database) -> Self {
        Self {
            users: Arc::new(MongoUserRepository::new(db)),
            profiles: Arc::new(MongoUserProfileRepository::new(db)),
            topics: Arc::new(MongoTopicRepository::new(db)),
            questions: Arc::new(MongoQuizQuestionRepository::new(db)),
            attempts: Arc::new(MongoQuizAttemptRepository::new(db)),
            explanations: Arc::new(MongoExplanationRepository::new(db)),
            teach_backs: Arc::new(MongoTeachBackRepository::new(db)),
            emotion_sessions: Arc::new(MongoEmotionSessionRepository::new(db)),
            readiness_reports: Arc::new(MongoReadinessReportRepository::new(db)),
            skill_gaps: Arc::new(MongoSkillGapRepository::new(db)),
            refresh_tokens: Arc::new(MongoRefreshTokenRepository::new(db)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(memory::InMemoryUserRepository::default()),
            profiles: Arc::new(memory::InMemoryUserProfileRepository::default()),
            topics: Arc::new(memory::InMemoryTopicRepository::default()),
            questions: Arc::new(memory::InMemoryQuizQuestionRepository::default()),
            attempts: Arc::new(memory::InMemoryQuizAttemptRepository::default()),
            explanations: Arc::new(memory::InMemoryExplanationRepository::default()),
            teach_backs: Arc::new(memory::InMemoryTeachBackRepository::default()),
            emotion_sessions: Arc::new(memory::InMemoryEmotionSessionRepository::default()),
            readiness_reports: Arc::new(memory::InMemoryReadinessReportRepository::default()),
            skill_gaps: Arc::new(memory::InMemorySkillGapRepository::default()),
            refresh_tokens: Arc::new(memory::InMemoryRefreshTokenRepository::default()),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.users.ensure_indexes().await?;
        self.profiles.ensure_indexes().await?;
        self.topics.ensure_indexes().await?;
        self.questions.ensure_indexes().await?;
        self.attempts.ensure_indexes().await?;
        self.explanations.ensure_indexes().await?;
        self.skill_gaps.ensure_indexes().await?;
        self.refresh_tokens.ensure_indexes().await?;
        Ok(())
    }
}
