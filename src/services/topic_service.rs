use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Difficulty, Explanation, Topic},
        dto::{request::ExplainTopicRequest, response::ExplainResponse},
    },
    repositories::{ExplanationRepository, TopicRepository},
    services::{explainer::TopicExplainer, profile_service::ProfileService},
};

const DESCRIPTION_CHARS: usize = 200;
const DEFAULT_CATEGORY: &str = "General";

pub struct TopicService {
    topics: Arc<dyn TopicRepository>,
    explanations: Arc<dyn ExplanationRepository>,
    profiles: Arc<ProfileService>,
    explainer: Arc<dyn TopicExplainer>,
}

impl TopicService {
    pub fn new(
        topics: Arc<dyn TopicRepository>,
        explanations: Arc<dyn ExplanationRepository>,
        profiles: Arc<ProfileService>,
        explainer: Arc<dyn TopicExplainer>,
    ) -> Self {
        Self {
            topics,
            explanations,
            profiles,
            explainer,
        }
    }

    pub async fn list_topics(&self) -> AppResult<Vec<Topic>> {
        self.topics.find_all().await
    }

    pub async fn get_topic(&self, id: &str) -> AppResult<Topic> {
        self.topics
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Topic with id '{}' not found", id)))
    }

    pub async fn explain(
        &self,
        user_id: &str,
        request: ExplainTopicRequest,
    ) -> AppResult<ExplainResponse> {
        request.validate()?;
        let topic_name = request.topic_name.trim();
        if topic_name.is_empty() {
            return Err(AppError::ValidationError(
                "Topic name must not be blank".to_string(),
            ));
        }

        let learning_style = match request.learning_style {
            Some(style) => style,
            None => self.profiles.get_or_create(user_id).await?.learning_style,
        };

        let content = self
            .explainer
            .explain(topic_name, learning_style)
            .await
            .map_err(|e| AppError::provider_failure("Topic explanation", e))?;

        let topic = self
            .get_or_create_by_name(topic_name, &content.explanation_text)
            .await?;

        let mut explanation = Explanation::new(user_id, &topic.id, learning_style);
        explanation.explanation_text = content.explanation_text.clone();
        explanation.key_points = content.key_points.clone();
        explanation.diagrams = content.diagrams.clone();
        explanation.real_world_applications = content.real_world_applications.clone();
        let explanation = self.explanations.create(explanation).await?;

        Ok(ExplainResponse {
            message: "Topic explanation generated successfully".to_string(),
            explanation,
            ai_data: content,
        })
    }

    async fn get_or_create_by_name(&self, name: &str, explanation_text: &str) -> AppResult<Topic> {
        if let Some(topic) = self.topics.find_by_name(name).await? {
            return Ok(topic);
        }

        let description: String = explanation_text.chars().take(DESCRIPTION_CHARS).collect();
        let topic = Topic::new(name, &description, DEFAULT_CATEGORY, Difficulty::BEGINNER);
        log::info!("Creating topic '{}' from explanation request", name);
        self.topics.create(topic).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{domain::LearningStyle, dto::response::ExplanationContent},
        repositories::Repositories,
        services::explainer::MockTopicExplainer,
    };

    fn service(explainer: MockTopicExplainer, store: &Repositories) -> TopicService {
        let profiles = Arc::new(ProfileService::new(store.users.clone(), store.profiles.clone()));
        TopicService::new(
            store.topics.clone(),
            store.explanations.clone(),
            profiles,
            Arc::new(explainer),
        )
    }

    fn request(name: &str) -> ExplainTopicRequest {
        ExplainTopicRequest {
            topic_name: name.to_string(),
            learning_style: None,
        }
    }

    #[tokio::test]
    async fn explain_creates_topic_from_explanation() {
        let store = Repositories::in_memory();
        let mut explainer = MockTopicExplainer::new();
        explainer
            .expect_explain()
            .withf(|name, style| name == "Rust" && *style == LearningStyle::Visual)
            .times(1)
            .returning(|_, style| {
                Ok(ExplanationContent {
                    explanation_text: "x".repeat(300),
                    key_points: vec!["Ownership".to_string()],
                    diagrams: vec![],
                    real_world_applications: vec![],
                    learning_style: style,
                })
            });

        let response = service(explainer, &store)
            .explain("user-1", request(" Rust "))
            .await
            .unwrap();

        let topic = store.topics.find_by_name("Rust").await.unwrap().unwrap();
        assert_eq!(topic.description.len(), 200);
        assert_eq!(topic.category, "General");
        assert_eq!(response.explanation.topic_id, topic.id);
        assert_eq!(response.ai_data.key_points, vec!["Ownership".to_string()]);
    }

    #[tokio::test]
    async fn explain_reports_provider_failure() {
        let store = Repositories::in_memory();
        let mut explainer = MockTopicExplainer::new();
        explainer
            .expect_explain()
            .returning(|_, _| Err(AppError::ExternalService("model offline".to_string())));

        let err = service(explainer, &store)
            .explain("user-1", request("Rust"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Topic explanation failed: model offline");
        assert!(store.topics.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_topic_missing_is_not_found() {
        let store = Repositories::in_memory();
        let err = service(MockTopicExplainer::new(), &store)
            .get_topic("nope")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
