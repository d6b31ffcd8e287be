use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{
    constants::prompts::{teach_back_prompt, TEACH_BACK_SYSTEM_PROMPT},
    errors::AppResult,
    services::model_service::ModelService,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TeachBackScore {
    pub correctness_score: f64,
    pub feedback: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeachBackScorer: Send + Sync {
    async fn score(
        &self,
        topic_name: &str,
        reference: &str,
        student_explanation: &str,
    ) -> AppResult<TeachBackScore>;
}

#[derive(Debug, Deserialize, JsonSchema)]
struct GeneratedScore {
    /// Between 0.0 and 1.0.
    correctness_score: f64,
    feedback: String,
}

pub struct HostedTeachBackScorer {
    model: ModelService,
}

impl HostedTeachBackScorer {
    pub fn new(model: ModelService) -> Self {
        Self { model }
    }
}

#[async_trait]
impl TeachBackScorer for HostedTeachBackScorer {
    async fn score(
        &self,
        topic_name: &str,
        reference: &str,
        student_explanation: &str,
    ) -> AppResult<TeachBackScore> {
        let generated: GeneratedScore = self
            .model
            .complete_json(
                TEACH_BACK_SYSTEM_PROMPT,
                &teach_back_prompt(topic_name, reference, student_explanation),
            )
            .await?;

        let correctness_score = if generated.correctness_score.is_finite() {
            generated.correctness_score.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Ok(TeachBackScore {
            correctness_score,
            feedback: generated.feedback.trim().to_string(),
        })
    }
}

const KEY_TERMS: [&str; 5] = ["concept", "example", "application", "theory", "practice"];

/// Length and vocabulary based scorer for deployments without a model key.
pub struct HeuristicTeachBackScorer;

impl HeuristicTeachBackScorer {
    pub fn correctness(explanation: &str) -> f64 {
        let length = explanation.chars().count() as f64;
        let base = (length / 100.0).min(1.0);
        let lower = explanation.to_lowercase();
        let bonus = KEY_TERMS.iter().filter(|term| lower.contains(*term)).count() as f64 * 0.1;
        (base + bonus).min(1.0)
    }

    pub fn feedback(explanation: &str, topic_name: &str) -> String {
        let length = explanation.chars().count();
        if length < 50 {
            format!(
                "Your explanation of {} is quite brief. Try to include more details and examples.",
                topic_name
            )
        } else if length > 200 {
            format!(
                "Good detailed explanation of {}! You've covered many aspects comprehensively.",
                topic_name
            )
        } else {
            format!(
                "Nice explanation of {}! Consider adding specific examples to make it clearer.",
                topic_name
            )
        }
    }
}

#[async_trait]
impl TeachBackScorer for HeuristicTeachBackScorer {
    async fn score(
        &self,
        topic_name: &str,
        _reference: &str,
        student_explanation: &str,
    ) -> AppResult<TeachBackScore> {
        Ok(TeachBackScore {
            correctness_score: Self::correctness(student_explanation),
            feedback: Self::feedback(student_explanation, topic_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_explanations_score_low() {
        let score = HeuristicTeachBackScorer::correctness("Plants eat light.");
        assert!(score < 0.3);
    }

    #[test]
    fn key_terms_add_bonus() {
        let plain = HeuristicTeachBackScorer::correctness("abcdefghij");
        let rich = HeuristicTeachBackScorer::correctness("concept theory");
        assert!((plain - 0.1).abs() < 1e-9);
        assert!((rich - (0.14 + 0.2)).abs() < 1e-9);
    }

    #[test]
    fn score_never_exceeds_one() {
        let long = "concept example application theory practice ".repeat(20);
        assert_eq!(HeuristicTeachBackScorer::correctness(&long), 1.0);
    }

    #[tokio::test]
    async fn feedback_depends_on_length() {
        let brief = HeuristicTeachBackScorer
            .score("Gravity", "", "Things fall down.")
            .await
            .unwrap();
        assert!(brief.feedback.contains("quite brief"));

        let detailed = HeuristicTeachBackScorer
            .score("Gravity", "", &"Mass attracts mass. ".repeat(15))
            .await
            .unwrap();
        assert!(detailed.feedback.starts_with("Good detailed explanation of Gravity"));
    }
}
