use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::Repositories,
    seed,
    services::{
        analytics_service::AnalyticsService,
        auth_service::AuthService,
        dashboard_service::DashboardService,
        difficulty_stepper::DifficultyStepper,
        emotion_classifier::{DisabledEmotionClassifier, EmotionClassifier, HostedEmotionClassifier},
        emotion_service::EmotionService,
        explainer::{HostedTopicExplainer, TemplateTopicExplainer, TopicExplainer},
        model_service::ModelService,
        profile_service::ProfileService,
        quiz_service::QuizService,
        readiness_service::ReadinessService,
        teach_back_scorer::{HeuristicTeachBackScorer, HostedTeachBackScorer, TeachBackScorer},
        teach_back_service::TeachBackService,
        topic_service::TopicService,
    },
};

/// Model-backed collaborators. Hosted when an API key is configured,
/// local fallbacks otherwise.
#[derive(Clone)]
pub struct Providers {
    pub explainer: Arc<dyn TopicExplainer>,
    pub scorer: Arc<dyn TeachBackScorer>,
    pub classifier: Arc<dyn EmotionClassifier>,
}

impl Providers {
    pub fn from_config(config: &Config) -> Self {
        match &config.hf_api_key {
            Some(key) => {
                let model = ModelService::new(&config.llm_api_base, key, &config.llm_model);
                Self {
                    explainer: Arc::new(HostedTopicExplainer::new(model.clone())),
                    scorer: Arc::new(HostedTeachBackScorer::new(model)),
                    classifier: Arc::new(HostedEmotionClassifier::new(
                        &config.hf_inference_base_url,
                        &config.emotion_model,
                        key.clone(),
                    )),
                }
            }
            None => Self::offline(),
        }
    }

    pub fn offline() -> Self {
        Self {
            explainer: Arc::new(TemplateTopicExplainer),
            scorer: Arc::new(HeuristicTeachBackScorer),
            classifier: Arc::new(DisabledEmotionClassifier),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub profile_service: Arc<ProfileService>,
    pub topic_service: Arc<TopicService>,
    pub quiz_service: Arc<QuizService>,
    pub teach_back_service: Arc<TeachBackService>,
    pub emotion_service: Arc<EmotionService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub readiness_service: Arc<ReadinessService>,
    pub dashboard_service: Arc<DashboardService>,
    pub jwt_service: JwtService,
    pub config: Arc<Config>,
    /// Absent when the state was built over in-memory repositories.
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let repositories = Repositories::mongo(&db);
        repositories.ensure_indexes().await?;

        match repositories.refresh_tokens.delete_expired().await {
            Ok(0) => {}
            Ok(removed) => log::info!("Removed {} expired refresh tokens", removed),
            Err(e) => log::warn!("Failed to prune expired refresh tokens: {}", e),
        }

        if let Some(path) = &config.seed_catalog {
            let catalog = seed::load_catalog(path).await?;
            seed::apply_catalog(catalog, &repositories.topics, &repositories.questions).await?;
        }

        let providers = Providers::from_config(&config);
        let mut state = Self::from_parts(config, repositories, providers);
        state.db = Some(db);
        Ok(state)
    }

    /// Wires services over the given repositories without touching MongoDB.
    pub fn from_parts(config: Config, repositories: Repositories, providers: Providers) -> Self {
        let jwt_service = JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
            config.refresh_token_expiration_hours,
        );

        let profile_service = Arc::new(ProfileService::new(
            repositories.users.clone(),
            repositories.profiles.clone(),
        ));
        let analytics_service = Arc::new(AnalyticsService::new(
            repositories.topics.clone(),
            repositories.attempts.clone(),
            repositories.skill_gaps.clone(),
        ));

        let auth_service = Arc::new(AuthService::new(
            repositories.users.clone(),
            repositories.profiles.clone(),
            repositories.refresh_tokens.clone(),
            jwt_service.clone(),
            config.bcrypt_cost,
        ));
        let topic_service = Arc::new(TopicService::new(
            repositories.topics.clone(),
            repositories.explanations.clone(),
            profile_service.clone(),
            providers.explainer,
        ));
        let quiz_service = Arc::new(QuizService::new(
            repositories.topics.clone(),
            repositories.questions.clone(),
            repositories.attempts.clone(),
            profile_service.clone(),
            DifficultyStepper::new(config.quiz_promotion_streak),
        ));
        let teach_back_service = Arc::new(TeachBackService::new(
            repositories.topics.clone(),
            repositories.explanations.clone(),
            repositories.teach_backs.clone(),
            providers.scorer,
        ));
        let emotion_service = Arc::new(EmotionService::new(
            repositories.emotion_sessions.clone(),
            providers.classifier,
            config.max_image_bytes,
        ));
        let readiness_service = Arc::new(ReadinessService::new(
            repositories.topics.clone(),
            repositories.attempts.clone(),
            repositories.readiness_reports.clone(),
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            repositories.attempts.clone(),
            repositories.explanations.clone(),
            profile_service.clone(),
            analytics_service.clone(),
        ));

        Self {
            auth_service,
            profile_service,
            topic_service,
            quiz_service,
            teach_back_service,
            emotion_service,
            analytics_service,
            readiness_service,
            dashboard_service,
            jwt_service,
            config: Arc::new(config),
            db: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_offline_providers_without_api_key() {
        let config = Config::test_config();
        let providers = Providers::from_config(&config);
        let state = AppState::from_parts(config, Repositories::in_memory(), providers);
        assert!(state.db.is_none());
        assert_eq!(state.config.bcrypt_cost, 4);
    }
}
