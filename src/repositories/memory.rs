//! In-process repository implementations backed by `RwLock`ed collections.
//! They mirror the Mongo repositories' ordering and upsert semantics and back
//! the test suites and `Repositories::in_memory`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        EmotionSession, ExamReadinessReport, Explanation, QuizAttempt, QuizQuestion,
        RefreshToken, SkillGap, TeachBackSubmission, Topic, User, UserProfile,
    },
    repositories::{
        EmotionSessionRepository, ExplanationRepository, QuizAttemptRepository,
        QuizQuestionRepository, ReadinessReportRepository, RefreshTokenRepository,
        SkillGapRepository, TeachBackRepository, TopicRepository, UserProfileRepository,
        UserRepository,
    },
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(AppError::AlreadyExists(format!(
                "User '{}' already exists",
                user.username
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserProfileRepository {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

#[async_trait]
impl UserProfileRepository for InMemoryUserProfileRepository {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, profile: UserProfile) -> AppResult<UserProfile> {
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTopicRepository {
    topics: RwLock<HashMap<String, Topic>>,
}

#[async_trait]
impl TopicRepository for InMemoryTopicRepository {
    async fn create(&self, topic: Topic) -> AppResult<Topic> {
        let mut topics = self.topics.write().await;
        if topics.values().any(|t| t.name == topic.name) {
            return Err(AppError::AlreadyExists(format!(
                "Topic '{}' already exists",
                topic.name
            )));
        }
        topics.insert(topic.id.clone(), topic.clone());
        Ok(topic)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Topic>> {
        Ok(self.topics.read().await.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Topic>> {
        let topics = self.topics.read().await;
        Ok(topics.values().find(|t| t.name == name).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Topic>> {
        let mut topics: Vec<Topic> = self.topics.read().await.values().cloned().collect();
        topics.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(topics)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuizQuestionRepository {
    questions: RwLock<HashMap<String, QuizQuestion>>,
}

#[async_trait]
impl QuizQuestionRepository for InMemoryQuizQuestionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizQuestion>> {
        Ok(self.questions.read().await.get(id).cloned())
    }

    async fn find_by_topic(&self, topic_id: &str) -> AppResult<Vec<QuizQuestion>> {
        let mut questions: Vec<QuizQuestion> = self
            .questions
            .read()
            .await
            .values()
            .filter(|q| q.topic_id == topic_id)
            .cloned()
            .collect();
        questions.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(questions)
    }

    async fn upsert(&self, question: QuizQuestion) -> AppResult<QuizQuestion> {
        self.questions
            .write()
            .await
            .insert(question.id.clone(), question.clone());
        Ok(question)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

fn newest_first<T, F>(items: &[T], keep: F, created_at: fn(&T) -> chrono::DateTime<Utc>) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    // Insertion order breaks timestamp ties, newest insert first.
    let mut selected: Vec<(usize, T)> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| keep(item))
        .map(|(i, item)| (i, item.clone()))
        .collect();
    selected.sort_by(|(ia, a), (ib, b)| created_at(b).cmp(&created_at(a)).then(ib.cmp(ia)));
    selected.into_iter().map(|(_, item)| item).collect()
}

#[derive(Default)]
pub struct InMemoryQuizAttemptRepository {
    attempts: RwLock<Vec<QuizAttempt>>,
}

#[async_trait]
impl QuizAttemptRepository for InMemoryQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.attempts.write().await.push(attempt.clone());
        Ok(attempt)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(newest_first(&attempts, |a| a.user_id == user_id, |a| a.created_at))
    }

    async fn find_by_user_and_topic(
        &self,
        user_id: &str,
        topic_id: &str,
    ) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(newest_first(
            &attempts,
            |a| a.user_id == user_id && a.topic_id == topic_id,
            |a| a.created_at,
        ))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryExplanationRepository {
    explanations: RwLock<Vec<Explanation>>,
}

#[async_trait]
impl ExplanationRepository for InMemoryExplanationRepository {
    async fn create(&self, explanation: Explanation) -> AppResult<Explanation> {
        self.explanations.write().await.push(explanation.clone());
        Ok(explanation)
    }

    async fn latest_for_user_topic(
        &self,
        user_id: &str,
        topic_id: &str,
    ) -> AppResult<Option<Explanation>> {
        let explanations = self.explanations.read().await;
        Ok(newest_first(
            &explanations,
            |e| e.user_id == user_id && e.topic_id == topic_id,
            |e| e.created_at,
        )
        .into_iter()
        .next())
    }

    async fn recent_for_user(&self, user_id: &str, limit: usize) -> AppResult<Vec<Explanation>> {
        let explanations = self.explanations.read().await;
        let mut recent = newest_first(&explanations, |e| e.user_id == user_id, |e| e.created_at);
        recent.truncate(limit);
        Ok(recent)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTeachBackRepository {
    submissions: RwLock<Vec<TeachBackSubmission>>,
}

#[async_trait]
impl TeachBackRepository for InMemoryTeachBackRepository {
    async fn create(&self, submission: TeachBackSubmission) -> AppResult<TeachBackSubmission> {
        self.submissions.write().await.push(submission.clone());
        Ok(submission)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<TeachBackSubmission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryEmotionSessionRepository {
    sessions: RwLock<Vec<EmotionSession>>,
}

#[async_trait]
impl EmotionSessionRepository for InMemoryEmotionSessionRepository {
    async fn create(&self, session: EmotionSession) -> AppResult<EmotionSession> {
        self.sessions.write().await.push(session.clone());
        Ok(session)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<EmotionSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryReadinessReportRepository {
    reports: RwLock<Vec<ExamReadinessReport>>,
}

#[async_trait]
impl ReadinessReportRepository for InMemoryReadinessReportRepository {
    async fn create(&self, report: ExamReadinessReport) -> AppResult<ExamReadinessReport> {
        self.reports.write().await.push(report.clone());
        Ok(report)
    }

    async fn find_by_user_and_topic(
        &self,
        user_id: &str,
        topic_id: &str,
    ) -> AppResult<Vec<ExamReadinessReport>> {
        let reports = self.reports.read().await;
        Ok(reports
            .iter()
            .filter(|r| r.user_id == user_id && r.topic_id == topic_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemorySkillGapRepository {
    gaps: RwLock<HashMap<(String, String), SkillGap>>,
}

#[async_trait]
impl SkillGapRepository for InMemorySkillGapRepository {
    async fn upsert(&self, gap: SkillGap) -> AppResult<SkillGap> {
        self.gaps
            .write()
            .await
            .insert((gap.user_id.clone(), gap.topic_id.clone()), gap.clone());
        Ok(gap)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<SkillGap>> {
        let gaps = self.gaps.read().await;
        let mut found: Vec<SkillGap> = gaps
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.topic_id.cmp(&b.topic_id));
        Ok(found)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: RwLock<HashMap<String, RefreshToken>>,
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        self.tokens
            .write()
            .await
            .insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token_hash(&self, hash: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.tokens.read().await.get(hash).cloned())
    }

    async fn consume(&self, hash: &str, user_id: &str) -> AppResult<Option<RefreshToken>> {
        let mut tokens = self.tokens.write().await;
        match tokens.get_mut(hash) {
            Some(token) if token.is_valid() && token.user_id == user_id => {
                let consumed = token.clone();
                token.revoked = true;
                Ok(Some(consumed))
            }
            _ => Ok(None),
        }
    }

    async fn revoke(&self, hash: &str) -> AppResult<bool> {
        let mut tokens = self.tokens.write().await;
        Ok(tokens.get_mut(hash).map(|token| token.revoked = true).is_some())
    }

    async fn delete_expired(&self) -> AppResult<u64> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        let now = Utc::now();
        tokens.retain(|_, token| token.expires_at >= now);
        Ok((before - tokens.len()) as u64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
