use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::{
        domain::ProficiencyBand,
        dto::response::{DashboardData, DashboardResponse, PerformanceSummary, RecentActivity},
    },
    repositories::{ExplanationRepository, QuizAttemptRepository},
    services::{
        analytics_service::{count_band, round_to, AnalyticsService},
        profile_service::ProfileService,
    },
};

const RECENT_ATTEMPTS: usize = 5;
const RECENT_EXPLANATIONS: usize = 3;

pub struct DashboardService {
    attempts: Arc<dyn QuizAttemptRepository>,
    explanations: Arc<dyn ExplanationRepository>,
    profiles: Arc<ProfileService>,
    analytics: Arc<AnalyticsService>,
}

impl DashboardService {
    pub fn new(
        attempts: Arc<dyn QuizAttemptRepository>,
        explanations: Arc<dyn ExplanationRepository>,
        profiles: Arc<ProfileService>,
        analytics: Arc<AnalyticsService>,
    ) -> Self {
        Self {
            attempts,
            explanations,
            profiles,
            analytics,
        }
    }

    pub async fn dashboard(&self, user_id: &str) -> AppResult<DashboardResponse> {
        let user_profile = self.profiles.get_profile(user_id).await?;
        let attempts = self.attempts.find_by_user(user_id).await?;
        let explanations = self
            .explanations
            .recent_for_user(user_id, RECENT_EXPLANATIONS)
            .await?;
        let proficiencies = self.analytics.topic_proficiencies(user_id).await?;

        let total_quizzes = attempts.len();
        let correct_quizzes = attempts.iter().filter(|a| a.is_correct).count();
        let accuracy_percentage = if total_quizzes == 0 {
            0.0
        } else {
            round_to(correct_quizzes as f64 / total_quizzes as f64 * 100.0, 1)
        };

        let performance_summary = PerformanceSummary {
            total_quizzes,
            correct_quizzes,
            accuracy_percentage,
            strong_topics: count_band(&proficiencies, ProficiencyBand::Strong),
            weak_topics: count_band(&proficiencies, ProficiencyBand::Weak),
        };

        Ok(DashboardResponse {
            message: "Dashboard data retrieved successfully".to_string(),
            dashboard: DashboardData {
                user_profile,
                recent_activity: RecentActivity {
                    quiz_attempts: attempts.into_iter().take(RECENT_ATTEMPTS).collect(),
                    explanations,
                },
                performance_summary,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{Explanation, LearningStyle},
        repositories::Repositories,
        test_utils::fixtures,
    };

    #[tokio::test]
    async fn dashboard_summarises_recent_activity() {
        let store = Repositories::in_memory();
        let user = store.users.create(fixtures::test_user()).await.unwrap();
        let topic = store.topics.create(fixtures::topic("Rust")).await.unwrap();

        for i in 0..7 {
            store
                .attempts
                .create(fixtures::attempt(&user.id, &topic.id, 1, i % 3 != 0, 10 - i))
                .await
                .unwrap();
        }
        for _ in 0..4 {
            store
                .explanations
                .create(Explanation::new(&user.id, &topic.id, LearningStyle::Visual))
                .await
                .unwrap();
        }

        let profiles = Arc::new(ProfileService::new(store.users.clone(), store.profiles.clone()));
        let analytics = Arc::new(AnalyticsService::new(
            store.topics.clone(),
            store.attempts.clone(),
            store.skill_gaps.clone(),
        ));
        let service = DashboardService::new(
            store.attempts.clone(),
            store.explanations.clone(),
            profiles,
            analytics,
        );

        let dashboard = service.dashboard(&user.id).await.unwrap().dashboard;

        assert_eq!(dashboard.recent_activity.quiz_attempts.len(), 5);
        assert_eq!(dashboard.recent_activity.explanations.len(), 3);
        let newest = &dashboard.recent_activity.quiz_attempts[0];
        assert!(dashboard
            .recent_activity
            .quiz_attempts
            .iter()
            .all(|a| a.created_at <= newest.created_at));

        let summary = dashboard.performance_summary;
        assert_eq!(summary.total_quizzes, 7);
        assert_eq!(summary.correct_quizzes, 4);
        assert_eq!(summary.accuracy_percentage, 57.1);
        assert_eq!(summary.strong_topics, 0);
        assert_eq!(summary.weak_topics, 0);
        assert_eq!(dashboard.user_profile.user.username, "testuser");
    }
}
