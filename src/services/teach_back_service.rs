use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::TeachBackSubmission,
        dto::{request::TeachBackRequest, response::TeachBackResponse},
    },
    repositories::{ExplanationRepository, TeachBackRepository, TopicRepository},
    services::teach_back_scorer::TeachBackScorer,
};

pub struct TeachBackService {
    topics: Arc<dyn TopicRepository>,
    explanations: Arc<dyn ExplanationRepository>,
    submissions: Arc<dyn TeachBackRepository>,
    scorer: Arc<dyn TeachBackScorer>,
}

impl TeachBackService {
    pub fn new(
        topics: Arc<dyn TopicRepository>,
        explanations: Arc<dyn ExplanationRepository>,
        submissions: Arc<dyn TeachBackRepository>,
        scorer: Arc<dyn TeachBackScorer>,
    ) -> Self {
        Self {
            topics,
            explanations,
            submissions,
            scorer,
        }
    }

    pub async fn submit(
        &self,
        user_id: &str,
        request: TeachBackRequest,
    ) -> AppResult<TeachBackResponse> {
        request.validate()?;

        let topic = self
            .topics
            .find_by_id(&request.topic_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Topic with id '{}' not found", request.topic_id))
            })?;

        let reference = match self
            .explanations
            .latest_for_user_topic(user_id, &topic.id)
            .await?
        {
            Some(explanation) => explanation.explanation_text,
            None => topic.description.clone(),
        };

        let score = self
            .scorer
            .score(&topic.name, &reference, &request.student_explanation)
            .await
            .map_err(|e| AppError::provider_failure("Teach-back", e))?;

        let correctness = score.correctness_score.clamp(0.0, 1.0);
        let submission = TeachBackSubmission::new(
            user_id,
            &topic.id,
            &request.student_explanation,
            correctness,
            score.feedback,
            improvement_suggestions(correctness),
        );
        let submission = self.submissions.create(submission).await?;

        Ok(TeachBackResponse {
            message: "Teach-back submission evaluated successfully".to_string(),
            teach_back: submission,
        })
    }
}

pub fn improvement_suggestions(correctness_score: f64) -> Vec<String> {
    let suggestions: [&str; 3] = if correctness_score < 0.3 {
        [
            "Review the fundamental concepts",
            "Practice explaining to others",
            "Use more examples in your explanations",
        ]
    } else if correctness_score < 0.7 {
        [
            "Add more specific details",
            "Include real-world applications",
            "Connect concepts to related topics",
        ]
    } else {
        [
            "Excellent understanding!",
            "Consider teaching others",
            "Explore advanced applications",
        ]
    };
    suggestions.iter().map(|s| s.to_string()).collect()
}
